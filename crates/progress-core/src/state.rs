use crate::error::{ProgressError, Result};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session state kept beside the catalog: which project is active.
///
/// Stored separately so the catalog file stays a plain name → project map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub active_project: Option<String>,
    pub last_updated: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: 1,
            active_project: None,
            last_updated: Utc::now(),
        }
    }
}

impl State {
    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Load state, or a fresh one if the file does not exist yet. Content
    /// that does not parse is `MalformedPersistedState`.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::state_path(root);
        let Some(data) = crate::io::read_optional(&path)? else {
            return Ok(Self::default());
        };
        serde_yaml::from_str(&data).map_err(|e| {
            ProgressError::MalformedPersistedState(format!("{}: {e}", paths::STATE_FILE))
        })
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::state_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn set_active(&mut self, name: Option<&str>) {
        self.active_project = name.map(str::to_string);
        self.last_updated = Utc::now();
    }
}
