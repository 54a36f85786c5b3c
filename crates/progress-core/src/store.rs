use crate::catalog::Catalog;
use crate::error::{ProgressError, Result};
use crate::project::{LogEntry, Project};
use tracing::{debug, info};

/// The catalog plus the name of the active project.
///
/// The active name is re-resolved against the catalog on every read, so a
/// removed project reads back as "none selected" instead of dangling.
/// Every mutator either succeeds completely or leaves the store untouched.
#[derive(Debug, Clone, Default)]
pub struct Store {
    catalog: Catalog,
    active: Option<String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            active: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Name of the active project, if it still exists.
    pub fn active(&self) -> Option<&str> {
        self.active
            .as_deref()
            .filter(|name| self.catalog.contains(name))
    }

    pub fn active_project(&self) -> Option<(&str, &Project)> {
        let name = self.active()?;
        self.catalog.get(name).map(|p| (name, p))
    }

    pub fn project(&self, name: &str) -> Result<&Project> {
        self.catalog
            .get(name)
            .ok_or_else(|| ProgressError::ProjectNotFound(name.to_string()))
    }

    // ---------------------------------------------------------------------------
    // Projects
    // ---------------------------------------------------------------------------

    pub fn create_project(&mut self, name: &str) -> Result<()> {
        // Blank names are reported as duplicates of the empty key.
        if name.trim().is_empty() {
            return Err(ProgressError::DuplicateName(name.to_string()));
        }
        if !self.catalog.insert(name, Project::new()) {
            return Err(ProgressError::DuplicateName(name.to_string()));
        }
        self.active = Some(name.to_string());
        debug!(project = name, "created project");
        Ok(())
    }

    pub fn remove_project(&mut self, name: &str) -> Result<()> {
        if self.catalog.remove(name).is_none() {
            return Err(ProgressError::ProjectNotFound(name.to_string()));
        }
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        debug!(project = name, "removed project");
        Ok(())
    }

    pub fn select_project(&mut self, name: &str) -> Result<()> {
        if !self.catalog.contains(name) {
            return Err(ProgressError::ProjectNotFound(name.to_string()));
        }
        self.active = Some(name.to_string());
        debug!(project = name, "selected project");
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Tasks
    // ---------------------------------------------------------------------------

    pub fn add_task(&mut self, project: Option<&str>, task: &str) -> Result<()> {
        let project = project.ok_or(ProgressError::NoActiveProject)?;
        if task.trim().is_empty() {
            return Err(ProgressError::EmptyName("task name"));
        }
        let p = self.project_mut(project)?;
        if !p.add_task(task) {
            return Err(ProgressError::DuplicateName(task.to_string()));
        }
        debug!(project, task, "added task");
        Ok(())
    }

    pub fn complete_task(&mut self, project: Option<&str>, task: &str) -> Result<()> {
        let project = project.ok_or(ProgressError::NoActiveProject)?;
        if !self.project_mut(project)?.complete_task(task) {
            return Err(task_not_found(project, task));
        }
        debug!(project, task, "completed task");
        Ok(())
    }

    pub fn remove_task(&mut self, project: Option<&str>, task: &str) -> Result<()> {
        let project = project.ok_or(ProgressError::NoActiveProject)?;
        if !self.project_mut(project)?.remove_task(task) {
            return Err(task_not_found(project, task));
        }
        debug!(project, task, "removed task");
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Logs
    // ---------------------------------------------------------------------------

    pub fn add_log(&mut self, project: Option<&str>, entry: LogEntry) -> Result<()> {
        let project = project.ok_or(ProgressError::NoActiveProject)?;
        if entry.text.trim().is_empty() {
            return Err(ProgressError::EmptyName("log text"));
        }
        self.project_mut(project)?.add_log(entry);
        debug!(project, "added log entry");
        Ok(())
    }

    pub fn logs(&self, project: Option<&str>) -> Result<&[LogEntry]> {
        let project = project.ok_or(ProgressError::NoActiveProject)?;
        Ok(&self.project(project)?.logs)
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Serialize the whole catalog. Output is deterministic for a given
    /// catalog.
    pub fn save(&self) -> Result<String> {
        let text = self.catalog.to_json()?;
        info!(projects = self.catalog.len(), "serialized catalog");
        Ok(text)
    }

    /// Replace the catalog with parsed content. `None` means there is no
    /// prior data and yields an empty catalog. On error the store is left
    /// unchanged.
    pub fn load(&mut self, source: Option<&str>) -> Result<()> {
        let catalog = match source {
            Some(text) => Catalog::from_json(text)?,
            None => Catalog::new(),
        };
        info!(projects = catalog.len(), "loaded catalog");
        self.catalog = catalog;
        Ok(())
    }

    /// Restore a previously persisted active name. Unknown names are kept
    /// but read back as none through [`Store::active`].
    pub fn restore_active(&mut self, name: Option<String>) {
        self.active = name;
    }

    fn project_mut(&mut self, name: &str) -> Result<&mut Project> {
        self.catalog
            .get_mut(name)
            .ok_or_else(|| ProgressError::ProjectNotFound(name.to_string()))
    }
}

fn task_not_found(project: &str, task: &str) -> ProgressError {
    ProgressError::TaskNotFound {
        project: project.to_string(),
        task: task.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
