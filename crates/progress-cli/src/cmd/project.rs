use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use progress_core::presenter;
use std::path::Path;

#[derive(Subcommand)]
pub enum ProjectSubcommand {
    /// Create a project and make it active
    Create {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Remove a project and all of its tasks
    Remove {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Make a project the active one
    Select {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// List projects with their progress
    List,
}

pub fn run(root: &Path, subcmd: ProjectSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProjectSubcommand::Create { name } => create(root, &name.join(" "), json),
        ProjectSubcommand::Remove { name } => remove(root, &name.join(" "), json),
        ProjectSubcommand::Select { name } => select(root, &name.join(" "), json),
        ProjectSubcommand::List => list(root, json),
    }
}

fn create(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let mut ws = super::open(root)?;
    ws.mutate(|s| s.create_project(name))
        .with_context(|| format!("cannot create project '{name}'"))?;
    ws.close().context("failed to save projects")?;

    if json {
        print_json(&serde_json::json!({ "project": name, "active": true }))?;
    } else {
        println!("Created project '{name}' (now active)");
    }
    Ok(())
}

fn remove(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let mut ws = super::open(root)?;
    ws.mutate(|s| s.remove_project(name))
        .with_context(|| format!("cannot remove project '{name}'"))?;
    let active = ws.store().active().map(str::to_string);
    ws.close().context("failed to save projects")?;

    if json {
        print_json(&serde_json::json!({ "project": name, "removed": true, "active": active }))?;
    } else {
        println!("Removed project '{name}'");
        if active.is_none() {
            println!("No project selected");
        }
    }
    Ok(())
}

fn select(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let mut ws = super::open(root)?;
    ws.mutate(|s| s.select_project(name))
        .with_context(|| format!("cannot select project '{name}'"))?;
    ws.close().context("failed to save projects")?;

    if json {
        print_json(&serde_json::json!({ "active": name }))?;
    } else {
        println!("Active project: {name}");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let ws = super::open(root)?;
    let store = ws.store();
    let active = store.active();

    if json {
        #[derive(serde::Serialize)]
        struct ProjectRow<'a> {
            name: &'a str,
            active: bool,
            completed: usize,
            total: usize,
            percent: f64,
        }

        let rows: Vec<ProjectRow> = store
            .catalog()
            .iter()
            .map(|(name, p)| {
                let prog = presenter::progress(p);
                ProjectRow {
                    name,
                    active: Some(name) == active,
                    completed: prog.completed,
                    total: prog.total,
                    percent: prog.percent_rounded(),
                }
            })
            .collect();
        print_json(&serde_json::json!({ "active": active, "projects": rows }))?;
        return Ok(());
    }

    if store.catalog().is_empty() {
        println!("No projects. Create one with: progress project create <name>");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = store
        .catalog()
        .iter()
        .map(|(name, p)| {
            let prog = presenter::progress(p);
            vec![
                if Some(name) == active { "*" } else { "" }.to_string(),
                name.to_string(),
                format!("{}/{}", prog.completed, prog.total),
                format!("{:.1}%", prog.percent_rounded()),
            ]
        })
        .collect();
    print_table(&["", "PROJECT", "DONE", "PROGRESS"], rows);
    Ok(())
}
