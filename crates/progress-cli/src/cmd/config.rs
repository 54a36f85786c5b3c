use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use progress_core::config::{Config, WarnLevel};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration and any validation warnings
    Show,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "config": config, "warnings": warnings }))?;
        return Ok(());
    }

    println!("save_policy:  {}", config.save_policy);
    println!("on_malformed: {}", config.on_malformed);
    println!("chart_width:  {}", config.chart_width);

    for w in &warnings {
        let tag = match w.level {
            WarnLevel::Warning => "warning",
            WarnLevel::Error => "error",
        };
        println!("{tag}: {}", w.message);
    }
    Ok(())
}
