use progress_core::presenter::{Progress, ProjectTotal};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Widths in chars, not bytes: task names may carry the completion mark.
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  ").trim_end());

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

// ---------------------------------------------------------------------------
// Text charts
// ---------------------------------------------------------------------------

/// `[##########----------] 50.0% (1/2)`
pub fn progress_bar(progress: &Progress, width: usize) -> String {
    let filled = if progress.total == 0 {
        0
    } else {
        (progress.completed * width + progress.total / 2) / progress.total
    };
    format!(
        "[{}{}] {:.1}% ({}/{})",
        "#".repeat(filled),
        "-".repeat(width - filled),
        progress.percent_rounded(),
        progress.completed,
        progress.total,
    )
}

/// One line per project: completed as `#`, pending as `-`, scaled so the
/// largest project spans `width` cells.
pub fn bar_chart(totals: &[ProjectTotal], width: usize) -> Vec<String> {
    let max_total = totals.iter().map(|t| t.total).max().unwrap_or(0);
    let name_width = totals
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0);

    totals
        .iter()
        .map(|t| {
            let (done, pending) = if max_total == 0 {
                (0, 0)
            } else {
                (
                    scale(t.completed, max_total, width),
                    scale(t.total, max_total, width) - scale(t.completed, max_total, width),
                )
            };
            format!(
                "{:name_width$}  {}{} {}/{}",
                t.name,
                "#".repeat(done),
                "-".repeat(pending),
                t.completed,
                t.total,
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

fn scale(value: usize, max: usize, width: usize) -> usize {
    (value * width + max / 2) / max
}
