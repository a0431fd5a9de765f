mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "flowfix",
    about = "Repair AI-agent input expressions in stored n8n workflows",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the n8n SQLite store (default: ~/.n8n/database.sqlite)
    #[arg(long, global = true, env = "FLOWFIX_DB")]
    db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the built-in webhook-input fixes to the four stock workflows
    Fix {
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List workflows and their current AI-agent input expressions
    Check,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let db = cli.db.as_deref();
    let result = match cli.command {
        Commands::Fix { dry_run } => cmd::fix::run(db, dry_run, cli.json),
        Commands::Check => cmd::check::run(db, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
