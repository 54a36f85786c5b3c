use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PROGRESS_DIR: &str = ".progress";

pub const CATALOG_FILE: &str = ".progress/projects.json";
pub const CONFIG_FILE: &str = ".progress/config.yaml";
pub const STATE_FILE: &str = ".progress/state.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn progress_dir(root: &Path) -> PathBuf {
    root.join(PROGRESS_DIR)
}

pub fn catalog_path(root: &Path) -> PathBuf {
    root.join(CATALOG_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}
