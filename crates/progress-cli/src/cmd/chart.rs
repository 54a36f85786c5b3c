use crate::output::{bar_chart, print_json};
use progress_core::presenter;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let ws = super::open(root)?;
    let totals = presenter::project_totals(ws.store().catalog());

    if json {
        return print_json(&totals);
    }

    if totals.is_empty() {
        println!("No projects to chart.");
        return Ok(());
    }

    for line in bar_chart(&totals, ws.config().effective_chart_width()) {
        println!("{line}");
    }
    Ok(())
}
