use crate::output::{print_json, progress_bar};
use progress_core::presenter::{self, ProgressView};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let ws = super::open(root)?;
    let view = presenter::active_progress(ws.store());

    if json {
        return print_json(&view);
    }

    match view {
        ProgressView::NoProjectSelected => println!("No project selected"),
        ProgressView::NoTasks { project } => println!("{project}: no tasks yet"),
        ProgressView::Tracking { project, progress } => {
            let width = ws.config().effective_chart_width();
            println!("{project}");
            println!("{}", progress_bar(&progress, width));
        }
    }
    Ok(())
}
