//! Read-only views derived from a store snapshot.
//!
//! Nothing here is cached: each call walks the current catalog, so the views
//! always agree with the data they were computed from.

use crate::catalog::Catalog;
use crate::project::Project;
use crate::store::Store;
use serde::Serialize;
use std::fmt;

pub const COMPLETION_MARK: &str = "✓";

// ---------------------------------------------------------------------------
// Display list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEntry {
    pub name: String,
    pub completed: bool,
}

impl fmt::Display for DisplayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.completed {
            write!(f, "{} {COMPLETION_MARK}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Pending tasks in insertion order, then completed tasks in completion order.
pub fn display_list(project: &Project) -> Vec<DisplayEntry> {
    let pending = project.tasks.iter().map(|name| DisplayEntry {
        name: name.clone(),
        completed: false,
    });
    let done = project.completed.iter().map(|name| DisplayEntry {
        name: name.clone(),
        completed: true,
    });
    pending.chain(done).collect()
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// 0.0 ..= 100.0, and exactly 0.0 when there are no tasks. Serialized
    /// rounded to one decimal place.
    #[serde(serialize_with = "serialize_rounded")]
    pub percent: f64,
}

fn serialize_rounded<S>(percent: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round_tenth(*percent))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Progress {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Percent rounded to one decimal place, e.g. 33.3.
    pub fn percent_rounded(&self) -> f64 {
        round_tenth(self.percent)
    }
}

pub fn progress(project: &Project) -> Progress {
    let completed = project.completed_count();
    let total = project.total();
    let percent = if total == 0 {
        0.0
    } else {
        completed as f64 * 100.0 / total as f64
    };
    Progress {
        completed,
        total,
        percent,
    }
}

/// Progress of the active project, keeping "nothing selected" apart from
/// "selected but empty".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProgressView {
    NoProjectSelected,
    NoTasks { project: String },
    Tracking { project: String, progress: Progress },
}

pub fn active_progress(store: &Store) -> ProgressView {
    let Some((name, project)) = store.active_project() else {
        return ProgressView::NoProjectSelected;
    };
    let p = progress(project);
    if p.is_empty() {
        ProgressView::NoTasks {
            project: name.to_string(),
        }
    } else {
        ProgressView::Tracking {
            project: name.to_string(),
            progress: p,
        }
    }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTotal {
    pub name: String,
    pub completed: usize,
    pub pending: usize,
    pub total: usize,
}

/// Per-project task counts in catalog order.
pub fn project_totals(catalog: &Catalog) -> Vec<ProjectTotal> {
    catalog
        .iter()
        .map(|(name, p)| ProjectTotal {
            name: name.to_string(),
            completed: p.completed_count(),
            pending: p.pending_count(),
            total: p.total(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn website() -> Store {
        let mut s = Store::new();
        s.create_project("Website").unwrap();
        for t in ["Design", "Build", "Deploy"] {
            s.add_task(Some("Website"), t).unwrap();
        }
        s.complete_task(Some("Website"), "Design").unwrap();
        s
    }

    #[test]
    fn website_scenario() {
        let s = website();
        let p = s.project("Website").unwrap();

        let prog = progress(p);
        assert_eq!((prog.completed, prog.total), (1, 3));
        assert_eq!(prog.percent_rounded(), 33.3);

        let shown: Vec<String> = display_list(p).iter().map(|e| e.to_string()).collect();
        assert_eq!(shown, vec!["Build", "Deploy", "Design ✓"]);
    }

    #[test]
    fn percent_serializes_rounded() {
        let s = website();
        let json = serde_json::to_value(progress(s.project("Website").unwrap())).unwrap();
        assert_eq!(json["percent"], serde_json::json!(33.3));
        assert_eq!(json["completed"], 1);
        assert_eq!(json["total"], 3);
    }

    #[test]
    fn zero_tasks_is_zero_percent() {
        let p = progress(&Project::new());
        assert_eq!(p.percent, 0.0);
        assert!(!p.percent.is_nan());
        assert!(p.is_empty());
    }

    #[test]
    fn active_progress_distinguishes_states() {
        let mut s = Store::new();
        assert_eq!(active_progress(&s), ProgressView::NoProjectSelected);

        s.create_project("Empty").unwrap();
        assert_eq!(
            active_progress(&s),
            ProgressView::NoTasks {
                project: "Empty".into()
            }
        );

        s.add_task(Some("Empty"), "one").unwrap();
        assert!(matches!(
            active_progress(&s),
            ProgressView::Tracking { .. }
        ));

        s.remove_project("Empty").unwrap();
        assert_eq!(active_progress(&s), ProgressView::NoProjectSelected);
    }

    #[test]
    fn totals_follow_catalog_order() {
        let mut s = website();
        s.create_project("Garden").unwrap();
        s.add_task(Some("Garden"), "Dig").unwrap();
        let totals = project_totals(s.catalog());
        assert_eq!(
            totals,
            vec![
                ProjectTotal {
                    name: "Website".into(),
                    completed: 1,
                    pending: 2,
                    total: 3,
                },
                ProjectTotal {
                    name: "Garden".into(),
                    completed: 0,
                    pending: 1,
                    total: 1,
                },
            ]
        );
    }

    #[test]
    fn views_track_mutations_without_caching() {
        let mut s = website();
        let before = progress(s.project("Website").unwrap());
        s.complete_task(Some("Website"), "Build").unwrap();
        let after = progress(s.project("Website").unwrap());
        assert_eq!(before.completed + 1, after.completed);
    }
}
