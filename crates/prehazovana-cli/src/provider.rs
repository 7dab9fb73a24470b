//! Roster storage on disk: one JSON file per character under
//! `<root>/<team>/`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use prehazovana_core::{CharacterRecord, RosterError, RosterProvider, TeamId};
use tracing::{debug, warn};

/// Roster provider reading `<root>/<team>/*.json`, one character per file.
#[derive(Debug, Clone)]
pub struct DirectoryRosterProvider {
    root: PathBuf,
}

impl DirectoryRosterProvider {
    /// Creates a provider rooted at `root`; nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The roster root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root and one folder per team when missing.
    pub fn ensure_layout(&self, teams: &[TeamId]) -> io::Result<()> {
        for team in teams {
            fs::create_dir_all(self.team_dir(team))?;
        }
        Ok(())
    }

    fn team_dir(&self, team: &TeamId) -> PathBuf {
        self.root.join(team.as_str())
    }

    fn read_team(&self, team: &TeamId) -> Result<Vec<CharacterRecord>, RosterError> {
        let dir = self.team_dir(team);
        if !dir.is_dir() {
            debug!(%team, path = %dir.display(), "no roster folder");
            return Ok(Vec::new());
        }
        let io_error = |path: &Path, source: io::Error| RosterError::Io {
            team: team.clone(),
            path: path.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| io_error(&dir, e))? {
            let path = entry.map_err(|e| io_error(&dir, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut records = Vec::with_capacity(files.len());
        for path in files {
            let raw = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
            match serde_json::from_str::<CharacterRecord>(&raw) {
                Ok(record) => records.push(record),
                Err(error) => {
                    let path = path.display();
                    warn!(%team, %path, %error, "skipping malformed character file");
                }
            }
        }
        Ok(records)
    }
}

impl RosterProvider for DirectoryRosterProvider {
    fn load_roster(
        &self,
        team_ids: &[TeamId],
    ) -> Result<BTreeMap<TeamId, Vec<CharacterRecord>>, RosterError> {
        team_ids
            .iter()
            .map(|team| Ok((team.clone(), self.read_team(team)?)))
            .collect()
    }
}
