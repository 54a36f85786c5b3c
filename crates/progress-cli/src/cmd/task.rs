use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use progress_core::presenter;
use std::path::Path;

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a pending task
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        /// Target project (default: the active project)
        #[arg(long)]
        project: Option<String>,
    },
    /// Mark a pending task as completed
    Complete {
        #[arg(required = true)]
        title: Vec<String>,
        /// Target project (default: the active project)
        #[arg(long)]
        project: Option<String>,
    },
    /// Remove a task, pending or completed
    Remove {
        #[arg(required = true)]
        title: Vec<String>,
        /// Target project (default: the active project)
        #[arg(long)]
        project: Option<String>,
    },
    /// List pending tasks, then completed ones
    List {
        /// Target project (default: the active project)
        #[arg(long)]
        project: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::Add { title, project } => {
            add(root, project.as_deref(), &title.join(" "), json)
        }
        TaskSubcommand::Complete { title, project } => {
            complete(root, project.as_deref(), &title.join(" "), json)
        }
        TaskSubcommand::Remove { title, project } => {
            remove(root, project.as_deref(), &title.join(" "), json)
        }
        TaskSubcommand::List { project } => list(root, project.as_deref(), json),
    }
}

fn add(root: &Path, project: Option<&str>, title: &str, json: bool) -> anyhow::Result<()> {
    let mut ws = super::open(root)?;
    let target = super::target(&ws, project);
    ws.mutate(|s| s.add_task(target.as_deref(), title))
        .with_context(|| format!("cannot add task '{title}'"))?;
    ws.close().context("failed to save projects")?;

    if json {
        print_json(&serde_json::json!({ "project": target, "task": title, "status": "pending" }))?;
    } else {
        println!("Added task: {title}");
    }
    Ok(())
}

fn complete(root: &Path, project: Option<&str>, title: &str, json: bool) -> anyhow::Result<()> {
    let mut ws = super::open(root)?;
    let target = super::target(&ws, project);
    ws.mutate(|s| s.complete_task(target.as_deref(), title))
        .with_context(|| format!("cannot complete task '{title}'"))?;
    ws.close().context("failed to save projects")?;

    if json {
        print_json(
            &serde_json::json!({ "project": target, "task": title, "status": "completed" }),
        )?;
    } else {
        println!("Completed task: {title}");
    }
    Ok(())
}

fn remove(root: &Path, project: Option<&str>, title: &str, json: bool) -> anyhow::Result<()> {
    let mut ws = super::open(root)?;
    let target = super::target(&ws, project);
    ws.mutate(|s| s.remove_task(target.as_deref(), title))
        .with_context(|| format!("cannot remove task '{title}'"))?;
    ws.close().context("failed to save projects")?;

    if json {
        print_json(&serde_json::json!({ "project": target, "task": title, "removed": true }))?;
    } else {
        println!("Removed task: {title}");
    }
    Ok(())
}

fn list(root: &Path, project: Option<&str>, json: bool) -> anyhow::Result<()> {
    let ws = super::open(root)?;
    let name = super::target(&ws, project)
        .ok_or(progress_core::ProgressError::NoActiveProject)?;
    let p = ws.store().project(&name)?;
    let entries = presenter::display_list(p);

    if json {
        print_json(&serde_json::json!({ "project": name, "tasks": entries }))?;
        return Ok(());
    }

    if entries.is_empty() {
        println!("No tasks in '{name}'.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| vec![(i + 1).to_string(), e.to_string()])
        .collect();
    print_table(&["#", "TASK"], rows);
    Ok(())
}
