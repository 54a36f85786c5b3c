pub mod chart;
pub mod config;
pub mod init;
pub mod log;
pub mod project;
pub mod status;
pub mod task;

use anyhow::Context;
use progress_core::workspace::Workspace;
use std::path::Path;

pub(crate) fn open(root: &Path) -> anyhow::Result<Workspace> {
    tracing::debug!(root = %root.display(), "opening workspace");
    Workspace::open(root).with_context(|| format!("failed to open workspace at {}", root.display()))
}

/// `--project` if given, otherwise the active project.
pub(crate) fn target(ws: &Workspace, explicit: Option<&str>) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| ws.store().active().map(str::to_string))
}
