//! ccgraph CLI - builds and queries a code context graph

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ccgraph")]
#[command(version)]
#[command(about = "Code Context Graph - modules, definitions and references from source text")]
#[command(long_about = r#"
ccgraph scans a source tree line by line and builds a graph of:
  • Modules (one per file), functions and types
  • contains edges from each module to its definitions
  • references edges from a definition to the names it calls

Example usage:
  ccgraph analyze --path ./src
  ccgraph refs --symbol func_a
  ccgraph export --format mermaid --output graph.mmd
"#)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./ccgraph.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and print statistics
    Analyze {
        /// Directory to analyze (defaults to the config `path`, then `.`)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Number of scanning threads
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// List every unit that references a symbol
    Refs {
        /// Symbol name to look up
        #[arg(short, long)]
        symbol: String,

        /// Directory to analyze
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Compare names exactly instead of ignoring case
        #[arg(long)]
        case_sensitive: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = RefsFormat::Text)]
        format: RefsFormat,
    },

    /// Write the graph as JSON or Mermaid
    Export {
        /// Directory to analyze
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Output format (json, mermaid)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a default ccgraph.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RefsFormat {
    Text,
    Json,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout stays reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            ccgraph::ui::error(&format!("{:#}", e));
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Init { force } = cli.command {
        let target = cli.config.unwrap_or_else(ccgraph::config::default_config_path);
        return commands::run_init(&target, force);
    }

    let settings = commands::Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { path, workers } => commands::run_analyze(&settings, path, workers),
        Commands::Refs { symbol, path, case_sensitive, format } => {
            commands::run_refs(&settings, path, &symbol, case_sensitive, format)
        }
        Commands::Export { path, format, output } => {
            let format: ccgraph::export::ExportFormat = format.parse()?;
            commands::run_export(&settings, path, format, output)
        }
        Commands::Init { .. } => Ok(()),
    }
}
