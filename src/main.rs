//! Bizu CLI - Multilingual dictionary lookup

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use bizu::config::{self, BizuConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "bizu")]
#[command(version)]
#[command(about = "Multilingual dictionary - Amharic, Afaan Oromo and English")]
#[command(long_about = r#"
Bizu looks words up across four language variants:
  • Amharic
  • OromLatin (Afaan Oromo, Qubee)
  • OromSaba (Afaan Oromo, Sabaean script)
  • English

The dictionary is loaded once from a spreadsheet (data/lang.xlsx by default)
into a local SQLite database on first use.

Example usage:
  bizu init
  bizu search English hello
  bizu random
  bizu serve --port 8080
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to bizu.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the source spreadsheet (.xlsx, .xls, .ods, .csv, .tsv)
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter bizu.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Create the database and load the source spreadsheet if it is empty
    Load,

    /// Search one language column for a word
    Search {
        /// Amharic, OromLatin, OromSaba or English
        language: String,

        /// Text to look for (case-insensitive substring)
        query: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one random entry
    Random {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show statistics about the dictionary
    Stats {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Serve the JSON API for UI clients
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(err) = run(cli) {
        bizu::ui::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli { config, database, source, command, .. } = cli;
    let config_path = config.unwrap_or_else(config::default_config_path);

    // `init` must work even when an existing config is broken
    let mut settings = if matches!(command, Commands::Init { .. }) {
        BizuConfig::default()
    } else {
        config::load_config(Some(&config_path))?.unwrap_or_default()
    };

    // Command-line flags win over the config file
    if let Some(database) = database {
        settings.database = Some(database.display().to_string());
    }
    if let Some(source) = source {
        settings.source = Some(source.display().to_string());
    }

    match command {
        Commands::Init { force } => commands::run_init(&config_path, force),
        Commands::Load => commands::run_load(&settings),
        Commands::Search { language, query, json } => {
            commands::run_search(&settings, &language, &query, json)
        }
        Commands::Random { json } => commands::run_random(&settings, json),
        Commands::Stats { json } => commands::run_stats(&settings, json),
        Commands::Serve { host, port } => {
            let server = settings.server.get_or_insert_with(Default::default);
            if host.is_some() {
                server.host = host;
            }
            if port.is_some() {
                server.port = port;
            }
            commands::run_serve(&settings)
        }
    }
}
