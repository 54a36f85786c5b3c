use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LogEntry
// ---------------------------------------------------------------------------

/// A dated note attached to a project. Persisted as a `[date, text]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct LogEntry {
    pub date: String,
    pub text: String,
}

impl LogEntry {
    pub fn new(date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            text: text.into(),
        }
    }

    pub fn today(text: impl Into<String>) -> Self {
        Self::new(Local::now().date_naive(), text)
    }
}

impl From<(String, String)> for LogEntry {
    fn from((date, text): (String, String)) -> Self {
        Self { date, text }
    }
}

impl From<LogEntry> for (String, String) {
    fn from(entry: LogEntry) -> Self {
        (entry.date, entry.text)
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// Two ordered task sequences plus an optional log.
///
/// A task name lives in exactly one of `tasks` (pending) or `completed`, and
/// never twice in the same sequence. The mutators below keep that true; the
/// catalog re-checks it for data read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, alias = "checkpoints")]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<LogEntry>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn total(&self) -> usize {
        self.tasks.len() + self.completed.len()
    }

    pub fn contains_task(&self, name: &str) -> bool {
        self.tasks.iter().any(|t| t == name) || self.completed.iter().any(|t| t == name)
    }

    pub fn is_completed(&self, name: &str) -> bool {
        self.completed.iter().any(|t| t == name)
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    /// Append a pending task. Returns `false` if the name is already used in
    /// either sequence.
    pub fn add_task(&mut self, name: &str) -> bool {
        if self.contains_task(name) {
            return false;
        }
        self.tasks.push(name.to_string());
        true
    }

    /// Move a pending task to the end of `completed`. Returns `false` if the
    /// task is not pending.
    pub fn complete_task(&mut self, name: &str) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t == name) else {
            return false;
        };
        let task = self.tasks.remove(pos);
        self.completed.push(task);
        true
    }

    /// Remove a task from whichever sequence holds it. Returns `false` if
    /// neither does.
    pub fn remove_task(&mut self, name: &str) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t == name) {
            self.tasks.remove(pos);
            return true;
        }
        if let Some(pos) = self.completed.iter().position(|t| t == name) {
            self.completed.remove(pos);
            return true;
        }
        false
    }

    pub fn add_log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
    }

    /// Describe the first invariant violation, if any.
    pub(crate) fn check(&self) -> Option<String> {
        let mut seen = std::collections::HashSet::new();
        for task in self.tasks.iter().chain(self.completed.iter()) {
            // Whitespace-only names written by other tools are kept as-is.
            if task.is_empty() {
                return Some("empty task name".to_string());
            }
            if !seen.insert(task.as_str()) {
                return Some(format!("task '{task}' appears more than once"));
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
