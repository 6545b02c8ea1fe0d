//! Headless host for *A Night with Bompa*: runs scripted nights and checks configurations.

mod commands;
mod script;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bompa",
    about = "A Night with Bompa: headless session runner",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one night from a config and an intent script
    Run {
        /// TOML configuration file (default: built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Intent script, one `<seconds> <intent>` per line
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Fixed tick length in seconds
        #[arg(long, default_value = "0.1")]
        dt: f64,

        /// End the shift after this many seconds if nothing else ended it
        #[arg(short, long, default_value = "600")]
        max_seconds: f64,

        /// Print the summary and event log as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration and show the waypoint path
    Check {
        /// TOML configuration file (default: built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the default configuration as TOML
    Defaults,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            script,
            dt,
            max_seconds,
            json,
        } => commands::run::run(
            config.as_deref(),
            script.as_deref(),
            dt,
            max_seconds,
            cli.verbose,
            json,
        ),
        Commands::Check { config } => commands::check::run(config.as_deref()),
        Commands::Defaults => commands::defaults::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
