mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tabclust_core::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabclust")]
#[command(about = "Cluster browser tabs into named groups and keep them", long_about = None)]
struct Cli {
    /// Database file (overrides TABCLUST_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer JSON commands on stdin, one per line
    Serve {
        /// JSON file holding the current open tabs, re-read per request
        #[arg(long)]
        open_tabs: Option<PathBuf>,
    },
    /// List group names
    Groups,
    /// List the tabs stored in a group
    Tabs { group: String },
    /// Create an empty group
    Create { name: String },
    /// Merge tabs from a JSON file into a group
    Add {
        group: String,
        #[arg(long)]
        tabs: PathBuf,
    },
    /// Remove one tab (matched by url and title) from a group
    RemoveTab { group: String, url: String, title: String },
    /// Delete a group and its tabs
    RemoveGroup { name: String },
    /// Rename a group
    Rename { old_name: String, new_name: String },
    /// Suggest groups over stored tabs, or over an open-tabs file
    Suggest {
        #[arg(long)]
        open_tabs: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if let Some(db) = cli.db {
        settings.db_path = db;
    }

    match cli.command {
        Commands::Serve { open_tabs } => commands::serve::run(settings, open_tabs).await,
        command => commands::groups::run(settings, command).await,
    }
}
