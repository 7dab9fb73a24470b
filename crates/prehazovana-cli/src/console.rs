//! Terminal I/O: prompting for throws and printing match events.

use std::io::{self, BufRead, Write};

use prehazovana_core::{
    InvalidSelectionError, MatchEvent, MatchObserver, StopSignal, ThrowSelector, ThrowType,
};
use tracing::warn;

/// Input that ends an interactive match.
const QUIT: &str = "quit";

/// Asks the player for each throw.
///
/// End of input or `quit` raises the stop signal; the match ends before the
/// next round.
pub struct StdinSelector<I, O> {
    input: I,
    output: O,
    stop: StopSignal,
}

impl<I: BufRead, O: Write> StdinSelector<I, O> {
    /// Reads selections from `input`, writes prompts to `output`, and raises
    /// `stop` when the player leaves.
    pub fn new(input: I, output: O, stop: StopSignal) -> Self {
        Self {
            input,
            output,
            stop,
        }
    }

    fn prompt(&mut self, character: &str) -> io::Result<String> {
        write!(
            self.output,
            "\nSelect ball throw type for {character}: [Low/Mid/High] "
        )?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        Ok(line)
    }
}

impl<I: BufRead, O: Write> ThrowSelector for StdinSelector<I, O> {
    fn select_throw(&mut self, character: &str) -> Result<ThrowType, InvalidSelectionError> {
        let line = match self.prompt(character) {
            Ok(line) => line,
            Err(error) => {
                if error.kind() != io::ErrorKind::UnexpectedEof {
                    warn!(%error, "failed to read throw selection");
                }
                self.stop.request_stop();
                return Err(InvalidSelectionError::new(""));
            }
        };
        if line.trim().eq_ignore_ascii_case(QUIT) {
            self.stop.request_stop();
            return Err(InvalidSelectionError::new(line.trim()));
        }
        line.parse()
    }
}

/// Prints every event as game text.
pub struct ConsoleObserver<W> {
    out: W,
}

impl<W: Write> ConsoleObserver<W> {
    /// Prints to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MatchObserver for ConsoleObserver<W> {
    fn notify(&mut self, event: &MatchEvent) {
        let written = match event {
            MatchEvent::PositionChanged { .. } | MatchEvent::Pairing { .. } => {
                writeln!(self.out, "\n{event}")
            }
            MatchEvent::ScoreUpdated { .. } => writeln!(self.out, "{event}\n"),
            _ => writeln!(self.out, "{event}"),
        };
        if let Err(error) = written {
            warn!(%error, "failed to print match event");
        }
    }
}
