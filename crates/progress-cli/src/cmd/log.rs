use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use progress_core::project::LogEntry;
use std::path::Path;

#[derive(Subcommand)]
pub enum LogSubcommand {
    /// Add a note dated today
    Add {
        #[arg(required = true)]
        text: Vec<String>,
        /// Target project (default: the active project)
        #[arg(long)]
        project: Option<String>,
    },
    /// Show a project's notes, oldest first
    List {
        /// Target project (default: the active project)
        #[arg(long)]
        project: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: LogSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        LogSubcommand::Add { text, project } => add(root, project.as_deref(), &text.join(" "), json),
        LogSubcommand::List { project } => list(root, project.as_deref(), json),
    }
}

fn add(root: &Path, project: Option<&str>, text: &str, json: bool) -> anyhow::Result<()> {
    let mut ws = super::open(root)?;
    let target = super::target(&ws, project);
    let entry = LogEntry::today(text);
    let date = entry.date.clone();
    ws.mutate(|s| s.add_log(target.as_deref(), entry))
        .context("cannot add log entry")?;
    ws.close().context("failed to save projects")?;

    if json {
        print_json(&serde_json::json!({ "project": target, "date": date, "text": text }))?;
    } else {
        println!("Logged for {date}: {text}");
    }
    Ok(())
}

fn list(root: &Path, project: Option<&str>, json: bool) -> anyhow::Result<()> {
    let ws = super::open(root)?;
    let target = super::target(&ws, project);
    let logs = ws.store().logs(target.as_deref())?;

    if json {
        let entries: Vec<_> = logs
            .iter()
            .map(|e| serde_json::json!({ "date": e.date, "text": e.text }))
            .collect();
        print_json(&serde_json::json!({ "project": target, "logs": entries }))?;
        return Ok(());
    }

    if logs.is_empty() {
        println!("No log entries.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = logs
        .iter()
        .map(|e| vec![e.date.clone(), e.text.clone()])
        .collect();
    print_table(&["DATE", "NOTE"], rows);
    Ok(())
}
