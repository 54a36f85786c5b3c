use crate::config::{Config, MalformedPolicy, SavePolicy};
use crate::error::{ProgressError, Result};
use crate::io;
use crate::paths;
use crate::state::State;
use crate::store::Store;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A store bound to its files on disk.
///
/// Mutations go through [`Workspace::mutate`], which applies the configured
/// [`SavePolicy`]: with `every_mutation` the catalog and active pointer are
/// written before `mutate` returns; with `on_close` they are written by
/// [`Workspace::close`]. A failed mutation never writes anything.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
    store: Store,
    dirty: bool,
}

impl Workspace {
    /// Scaffold `.progress/` with a default config and an empty catalog.
    /// Existing files are left alone. Returns true if anything was created.
    pub fn init(root: &Path) -> Result<bool> {
        io::ensure_dir(&paths::progress_dir(root))?;
        let config = serde_yaml::to_string(&Config::default())?;
        let wrote_config = io::write_if_missing(&paths::config_path(root), config.as_bytes())?;
        let wrote_catalog = io::write_if_missing(&paths::catalog_path(root), b"{}\n")?;
        info!(root = %root.display(), wrote_config, wrote_catalog, "initialized");
        Ok(wrote_config || wrote_catalog)
    }

    pub fn open(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        let mut store = Store::new();

        let source = io::read_optional(&paths::catalog_path(root))?;
        if source.is_none() {
            debug!("no catalog file, starting empty");
        }
        match store.load(source.as_deref()) {
            Ok(()) => {}
            Err(ProgressError::MalformedPersistedState(reason))
                if config.on_malformed == MalformedPolicy::Reset =>
            {
                warn!(%reason, "catalog is malformed, starting from an empty catalog");
                store.load(None)?;
            }
            Err(e) => return Err(e),
        }

        let state = match State::load(root) {
            Ok(state) => state,
            Err(ProgressError::MalformedPersistedState(reason))
                if config.on_malformed == MalformedPolicy::Reset =>
            {
                warn!(%reason, "state file is malformed, no project selected");
                State::default()
            }
            Err(e) => return Err(e),
        };
        store.restore_active(state.active_project);

        Ok(Self {
            root: root.to_path_buf(),
            config,
            store,
            dirty: false,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run one store mutator and persist according to the save policy.
    ///
    /// If the save fails the store is rolled back, so memory never holds a
    /// change that was reported as failed.
    pub fn mutate<T>(&mut self, op: impl FnOnce(&mut Store) -> Result<T>) -> Result<T> {
        let snapshot = self.store.clone();
        let was_dirty = self.dirty;
        let value = op(&mut self.store)?;
        self.dirty = true;
        if self.config.save_policy == SavePolicy::EveryMutation {
            if let Err(e) = self.flush() {
                self.store = snapshot;
                self.dirty = was_dirty;
                return Err(e);
            }
        }
        Ok(value)
    }

    /// Write the catalog and active pointer now, regardless of policy.
    pub fn flush(&mut self) -> Result<()> {
        let text = self.store.save()?;
        io::atomic_write(&paths::catalog_path(&self.root), text.as_bytes())?;

        let mut state = State::default();
        state.set_active(self.store.active());
        state.save(&self.root)?;

        self.dirty = false;
        debug!(root = %self.root.display(), "saved workspace");
        Ok(())
    }

    /// Write any unsaved changes. Under `every_mutation` there are none left.
    pub fn close(mut self) -> Result<()> {
        if self.dirty {
            self.flush()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn with_policy(root: &Path, save: SavePolicy, malformed: MalformedPolicy) {
        Config {
            save_policy: save,
            on_malformed: malformed,
            ..Config::default()
        }
        .save(root)
        .unwrap();
    }

    #[test]
    fn absent_catalog_opens_empty() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::open(dir.path()).unwrap();
        assert!(ws.store().catalog().is_empty());
        assert_eq!(ws.store().active(), None);
    }

    #[test]
    fn every_mutation_saves_immediately() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::open(dir.path()).unwrap();
        ws.mutate(|s| s.create_project("Website")).unwrap();
        ws.mutate(|s| s.add_task(Some("Website"), "Design")).unwrap();
        assert!(!ws.is_dirty());

        // No close: simulates abnormal termination.
        drop(ws);
        let reopened = Workspace::open(dir.path()).unwrap();
        assert_eq!(reopened.store().active(), Some("Website"));
        assert_eq!(
            reopened.store().project("Website").unwrap().tasks,
            vec!["Design"]
        );
    }

    #[test]
    fn on_close_defers_until_close() {
        let dir = TempDir::new().unwrap();
        with_policy(dir.path(), SavePolicy::OnClose, MalformedPolicy::Fail);

        let mut ws = Workspace::open(dir.path()).unwrap();
        ws.mutate(|s| s.create_project("Website")).unwrap();
        assert!(ws.is_dirty());
        assert!(!paths::catalog_path(dir.path()).exists());

        ws.close().unwrap();
        let reopened = Workspace::open(dir.path()).unwrap();
        assert!(reopened.store().catalog().contains("Website"));
    }

    #[test]
    fn failed_mutation_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::open(dir.path()).unwrap();
        ws.mutate(|s| s.create_project("Website")).unwrap();
        let before = std::fs::read_to_string(paths::catalog_path(dir.path())).unwrap();

        assert!(ws.mutate(|s| s.create_project("Website")).is_err());
        assert!(!ws.is_dirty());
        let after = std::fs::read_to_string(paths::catalog_path(dir.path())).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn malformed_catalog_fails_by_default() {
        let dir = TempDir::new().unwrap();
        io::atomic_write(&paths::catalog_path(dir.path()), b"{ not json").unwrap();
        let err = Workspace::open(dir.path()).unwrap_err();
        assert!(matches!(err, ProgressError::MalformedPersistedState(_)));
        // The file is left for the operator.
        assert_eq!(
            std::fs::read_to_string(paths::catalog_path(dir.path())).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn malformed_catalog_resets_when_configured() {
        let dir = TempDir::new().unwrap();
        with_policy(dir.path(), SavePolicy::EveryMutation, MalformedPolicy::Reset);
        io::atomic_write(&paths::catalog_path(dir.path()), b"[1, 2").unwrap();
        let ws = Workspace::open(dir.path()).unwrap();
        assert!(ws.store().catalog().is_empty());
    }

    #[test]
    fn stale_active_pointer_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::open(dir.path()).unwrap();
        ws.mutate(|s| s.create_project("Website")).unwrap();
        drop(ws);

        // Catalog edited out from under the state file.
        io::atomic_write(&paths::catalog_path(dir.path()), b"{}").unwrap();
        let ws = Workspace::open(dir.path()).unwrap();
        assert_eq!(ws.store().active(), None);
    }

    #[test]
    fn failed_save_rolls_back_the_store() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::open(dir.path()).unwrap();
        // A plain file where the data directory should be makes every write fail.
        std::fs::write(paths::progress_dir(dir.path()), b"not a directory").unwrap();

        let err = ws.mutate(|s| s.create_project("Website")).unwrap_err();
        assert!(matches!(err, ProgressError::Io(_)));
        assert!(!ws.store().catalog().contains("Website"));
        assert_eq!(ws.store().active(), None);
        assert!(!ws.is_dirty());

        // Once the directory is usable again the same call succeeds.
        std::fs::remove_file(paths::progress_dir(dir.path())).unwrap();
        ws.mutate(|s| s.create_project("Website")).unwrap();
        assert!(paths::catalog_path(dir.path()).exists());
    }

    #[test]
    fn malformed_state_fails_by_default() {
        let dir = TempDir::new().unwrap();
        io::atomic_write(&paths::state_path(dir.path()), b"active_project: [unclosed").unwrap();
        let err = Workspace::open(dir.path()).unwrap_err();
        assert!(matches!(err, ProgressError::MalformedPersistedState(_)));
    }

    #[test]
    fn malformed_state_resets_when_configured() {
        let dir = TempDir::new().unwrap();
        with_policy(dir.path(), SavePolicy::EveryMutation, MalformedPolicy::Reset);
        io::atomic_write(&paths::catalog_path(dir.path()), br#"{"Website": {}}"#).unwrap();
        io::atomic_write(&paths::state_path(dir.path()), b"active_project: [unclosed").unwrap();

        let mut ws = Workspace::open(dir.path()).unwrap();
        assert_eq!(ws.store().active(), None);
        assert!(ws.store().catalog().contains("Website"));

        // The next save replaces the broken state file.
        ws.mutate(|s| s.select_project("Website")).unwrap();
        let reopened = Workspace::open(dir.path()).unwrap();
        assert_eq!(reopened.store().active(), Some("Website"));
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        assert!(Workspace::init(dir.path()).unwrap());
        assert!(!Workspace::init(dir.path()).unwrap());
        let ws = Workspace::open(dir.path()).unwrap();
        assert!(ws.store().catalog().is_empty());
    }
}
