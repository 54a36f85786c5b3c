use crate::output::print_json;
use anyhow::Context;
use progress_core::{paths, workspace::Workspace};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let created = Workspace::init(root).context("failed to initialize .progress/")?;
    let dir = paths::progress_dir(root);

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "created": created,
        }))?;
    } else if created {
        println!("Initialized {}", dir.display());
    } else {
        println!("Already initialized: {}", dir.display());
    }
    Ok(())
}
