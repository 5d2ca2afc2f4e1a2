//! vmoptions-helper: CLI for managing JVM flags in IDE .vmoptions files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::utils::OutputFormat;

#[derive(Parser)]
#[command(name = "vmoptions-helper")]
#[command(about = "Add and remove managed JVM flags in IDE .vmoptions files", long_about = None)]
#[command(version)]
struct Cli {
    /// Log every removed and added line (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip earlier agent/add-opens lines and append the managed block
    Apply {
        /// Directory holding the .vmoptions files (usually the IDE's bin folder)
        install_dir: String,

        /// Directory containing ja-netfilter.jar
        config_path: String,

        /// Show what would be done without making changes
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Output format: text or json (default: text)
        #[arg(long, short, default_value = "text")]
        format: String,
    },

    /// Remove only the lines added by apply
    Clear {
        /// Directory holding the .vmoptions files
        install_dir: String,

        /// Show what would be done without making changes
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Output format: text or json (default: text)
        #[arg(long, short, default_value = "text")]
        format: String,
    },

    /// Show which files carry the managed lines
    Status {
        /// Directory holding the .vmoptions files
        install_dir: String,

        /// Output format: text or json (default: text)
        #[arg(long, short, default_value = "text")]
        format: String,
    },
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::from_str(format).context("Invalid format. Use 'text' or 'json'")
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Apply {
            install_dir,
            config_path,
            dry_run,
            format,
        } => {
            let format = parse_format(&format)?;
            if dry_run && format == OutputFormat::Text {
                println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
            }
            commands::apply::execute(&install_dir, &config_path, dry_run, format)?;
        }

        Commands::Clear {
            install_dir,
            dry_run,
            format,
        } => {
            let format = parse_format(&format)?;
            if dry_run && format == OutputFormat::Text {
                println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
            }
            commands::clear::execute(&install_dir, dry_run, format)?;
        }

        Commands::Status {
            install_dir,
            format,
        } => {
            let format = parse_format(&format)?;
            commands::status::execute(&install_dir, format)?;
        }
    }

    Ok(())
}
