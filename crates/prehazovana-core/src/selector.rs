//! Throw-type selection providers.
//!
//! The simulator asks a [`ThrowSelector`] which throw the attacker makes.
//! Interactive front ends read it from a human; [`FixedSelector`] and
//! [`ScriptedSelector`] cover unattended play and tests.

use std::collections::VecDeque;

use crate::error::InvalidSelectionError;
use crate::scoring::ThrowType;
use crate::simulation::StopSignal;

/// Supplies the throw type for an attacking character.
pub trait ThrowSelector {
    /// Returns the throw `character` makes this round.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSelectionError`] when the provider's answer is not one
    /// of Low, Mid, High. The round then scores nothing.
    fn select_throw(&mut self, character: &str) -> Result<ThrowType, InvalidSelectionError>;
}

impl<T: ThrowSelector + ?Sized> ThrowSelector for &mut T {
    fn select_throw(&mut self, character: &str) -> Result<ThrowType, InvalidSelectionError> {
        (**self).select_throw(character)
    }
}

/// Always selects the same throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSelector(pub ThrowType);

impl ThrowSelector for FixedSelector {
    fn select_throw(&mut self, _character: &str) -> Result<ThrowType, InvalidSelectionError> {
        Ok(self.0)
    }
}

/// Plays back raw selections in order.
///
/// Each entry is parsed like human input, so invalid entries produce
/// [`InvalidSelectionError`]. Once the script runs out the attached
/// [`StopSignal`] (if any) is raised and every further call is invalid.
///
/// # Example
///
/// ```
/// use prehazovana_core::scoring::ThrowType;
/// use prehazovana_core::selector::{ScriptedSelector, ThrowSelector};
///
/// let mut selector = ScriptedSelector::new(["High", "lob"]);
/// assert_eq!(selector.select_throw("Alice"), Ok(ThrowType::High));
/// assert!(selector.select_throw("Alice").is_err());
/// assert!(selector.is_exhausted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    script: VecDeque<String>,
    stop: Option<StopSignal>,
}

impl ScriptedSelector {
    /// Creates a selector from raw inputs.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: inputs.into_iter().map(Into::into).collect(),
            stop: None,
        }
    }

    /// Raises `stop` once the script is exhausted.
    #[must_use]
    pub fn stop_when_exhausted(mut self, stop: StopSignal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// True when every scripted entry has been used.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl ThrowSelector for ScriptedSelector {
    fn select_throw(&mut self, _character: &str) -> Result<ThrowType, InvalidSelectionError> {
        let Some(input) = self.script.pop_front() else {
            if let Some(stop) = &self.stop {
                stop.request_stop();
            }
            return Err(InvalidSelectionError::new(""));
        };
        input.parse()
    }
}
