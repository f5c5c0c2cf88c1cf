use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use peacock_core::config::Config;
use std::path::PathBuf;
use tracing::info;

mod app;
mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "peacock - audio library title organizer", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the library and serve the web API
    Serve {
        /// Library directory (defaults to the configured root)
        path: Option<Utf8PathBuf>,

        /// Bind address
        #[arg(short, long)]
        bind: Option<String>,

        /// Port number
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the audio files in the library
    Scan {
        path: Option<Utf8PathBuf>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show proposed title changes
    Suggest {
        path: Option<Utf8PathBuf>,

        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write every proposed title to disk
    Apply {
        path: Option<Utf8PathBuf>,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a config file pointing at a library directory
    Init {
        #[arg(long)]
        root: Utf8PathBuf,

        /// Report title
        #[arg(long)]
        title: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::load_from_path(config_path)?,
        None => Config::load_or_default(),
    };

    // Initialize logging
    let log_level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting peacock v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.unwrap_or_else(Config::default_path);

    match args.command {
        Command::Serve { path, bind, port } => {
            let config = commands::with_root(config, path);
            let bind_address = bind.unwrap_or_else(|| config.network.bind_address.clone());
            let port = port.unwrap_or(config.network.port);

            info!("Library directory: {}", config.library.root);
            app::run(format!("{bind_address}:{port}"), config, config_path).await?;
        }
        Command::Scan { path, json } => {
            let config = commands::with_root(config, path);
            commands::scan(&config, json)?;
        }
        Command::Suggest { path, json } => {
            let config = commands::with_root(config, path);
            commands::suggest(&config, json)?;
        }
        Command::Apply { path, dry_run } => {
            let config = commands::with_root(config, path);
            commands::apply(&config, dry_run)?;
        }
        Command::Init { root, title } => {
            commands::init(config, &config_path, &root, title)?;
        }
    }

    Ok(())
}
