mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, log::LogSubcommand, project::ProjectSubcommand,
    task::TaskSubcommand,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "progress",
    about = "Track projects and their checkpoints, with progress at a glance",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding .progress/ (default: auto-detect upward from cwd)
    #[arg(long, global = true, env = "PROGRESS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .progress/ with a default config and an empty catalog
    Init,

    /// Create, remove, select, and list projects
    Project {
        #[command(subcommand)]
        subcommand: ProjectSubcommand,
    },

    /// Add, complete, remove, and list checkpoints
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// Dated notes on a project
    Log {
        #[command(subcommand)]
        subcommand: LogSubcommand,
    },

    /// Progress bar for the active project
    Status,

    /// Bar chart of task totals per project
    Chart,

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Project { subcommand } => cmd::project::run(&root, subcommand, cli.json),
        Commands::Task { subcommand } => cmd::task::run(&root, subcommand, cli.json),
        Commands::Log { subcommand } => cmd::log::run(&root, subcommand, cli.json),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Chart => cmd::chart::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
