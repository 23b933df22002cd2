/// Portal Player - terminal driver for the agency portal playback core
use anyhow::Context;
use clap::{Parser, Subcommand};
use portal_player::{load_tracks, AppConfig, Mode, Shell};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "portal-player")]
#[command(about = "Agency portal music player and A&R review shell", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an asset list
    Play {
        /// JSON asset list
        library: PathBuf,
        /// Read commands from a file instead of stdin
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// Review demos and leave timestamped comments
    Review {
        /// JSON asset list
        library: PathBuf,
        /// Read commands from a file instead of stdin
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_player=info,portal_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    config.validate()?;

    match cli.command {
        Commands::Play { library, script } => run(&config, &library, script, Mode::Player)?,
        Commands::Review { library, script } => run(&config, &library, script, Mode::Review)?,
        Commands::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

fn run(
    config: &AppConfig,
    library: &Path,
    script: Option<PathBuf>,
    mode: Mode,
) -> anyhow::Result<()> {
    let tracks = load_tracks(library)
        .with_context(|| format!("reading asset list {}", library.display()))?;
    tracing::info!("Loaded {} tracks from {}", tracks.len(), library.display());

    let mut shell = Shell::new(tracks, config, mode);
    let mut out = io::stdout().lock();

    match script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("opening script {}", path.display()))?;
            shell.run(BufReader::new(file), &mut out)?;
        }
        None => shell.run(io::stdin().lock(), &mut out)?,
    }

    Ok(())
}
