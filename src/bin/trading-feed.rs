// Trading Feed CLI
// Runs the simulated market feed, or the backend-driven variant, in a terminal

use clap::{Parser, Subcommand};
use tracing::{error, info};
use trading_feed::{Config, FeedResult};

#[path = "../cli/feed_commands.rs"]
mod feed_commands;

#[derive(Parser)]
#[command(name = "trading-feed")]
#[command(version = "0.2.0")]
#[command(about = "Live trading grid feed", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run the local simulation
    Run {
        /// Tick interval in milliseconds (overrides config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop after this many seconds (runs until Ctrl-C otherwise)
        #[arg(short, long)]
        duration_secs: Option<u64>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Poll the backend's trading data endpoint
    Poll {
        /// Backend base URL (overrides config)
        #[arg(short, long)]
        url: Option<String>,

        /// Poll interval in milliseconds (overrides config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop after this many seconds (runs until Ctrl-C otherwise)
        #[arg(short, long)]
        duration_secs: Option<u64>,
    },

    /// Print one rendered tick and exit
    Snapshot {
        /// Print JSON instead of the grid
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("📈 Trading Feed v0.2.0");

    if let Err(e) = execute(cli.command, &cli.config).await {
        error!("❌ {} error: {}", e.category(), e);
        eprintln!("\n{}", e.user_message());
        std::process::exit(1);
    }
}

async fn execute(command: Commands, config_path: &str) -> FeedResult<()> {
    match command {
        // Init doesn't require config (it creates it)
        Commands::Init { force } => feed_commands::init_config(config_path, force),
        Commands::Run { interval_ms, duration_secs, seed } => {
            let config = load_config(config_path)?;
            feed_commands::run_simulation(config, interval_ms, duration_secs, seed).await
        }
        Commands::Poll { url, interval_ms, duration_secs } => {
            let config = load_config(config_path)?;
            feed_commands::run_polling(config, url, interval_ms, duration_secs).await
        }
        Commands::Snapshot { json } => {
            let config = load_config(config_path)?;
            feed_commands::snapshot(config, json).await
        }
    }
}

/// Missing config falls back to defaults; a broken one is an error
fn load_config(path: &str) -> FeedResult<Config> {
    let mut config = if std::path::Path::new(path).exists() {
        info!("📁 Config: {}", path);
        Config::from_file(path)?
    } else {
        info!("📁 No config at {}, using defaults", path);
        Config::default()
    };
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
