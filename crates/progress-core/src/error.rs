use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("name already exists or is empty: '{0}'")]
    DuplicateName(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("task '{task}' not found in project '{project}'")]
    TaskNotFound { project: String, task: String },

    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    #[error("no active project: create or select one first")]
    NoActiveProject,

    #[error("malformed project data: {0}")]
    MalformedPersistedState(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ProgressError {
    /// True for both the project and the task flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProgressError::ProjectNotFound(_) | ProgressError::TaskNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProgressError>;
