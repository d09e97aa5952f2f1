//! SamudraIO - NMEA 0183 instrument simulator daemon
//!
//! Broadcasts one batch of six sentences (DPT, VHW, HDG, MTW, MWV, RMC) to
//! every configured UDP destination each update interval.

use clap::Parser;
use samudra_io::config::AppConfig;
use samudra_io::error::{Error, Result};
use samudra_io::transport::UdpTransport;
use samudra_io::SamudraApp;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

/// Config file picked up from the working directory when none is given
const DEFAULT_CONFIG_FILE: &str = "samudra.toml";

#[derive(Parser, Debug)]
#[command(name = "samudra-io", version, about = "Simulated NMEA 0183 instrument suite over UDP")]
struct Cli {
    /// Configuration file (positional)
    config_path: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, conflicts_with = "config_path")]
    config: Option<PathBuf>,

    /// Destination host, repeatable; replaces the configured list
    #[arg(short, long = "dest")]
    dest: Vec<String>,

    /// Destination UDP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Seconds between sentence batches
    #[arg(short, long)]
    interval: Option<f64>,

    /// Random seed (0 = random each run)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks (0 = run until interrupted)
    #[arg(short = 'n', long, default_value_t = 0)]
    count: u64,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match cli.config.as_ref().or(cli.config_path.as_ref()) {
        Some(path) => AppConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            AppConfig::from_file(DEFAULT_CONFIG_FILE)?
        }
        None => AppConfig::default(),
    };

    if !cli.dest.is_empty() {
        config.network.destinations = cli.dest.clone();
    }
    if let Some(port) = cli.port {
        config.network.port = port;
    }
    if let Some(interval) = cli.interval {
        config.simulation.update_interval_secs = interval;
    }
    if let Some(seed) = cli.seed {
        config.simulation.random_seed = seed;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default().to_toml()?);
        return Ok(());
    }

    let config = load_config(&cli)?;

    // Initialize logger (RUST_LOG wins over the config level)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("SamudraIO v{} starting...", env!("CARGO_PKG_VERSION"));
    match cli.config.as_ref().or(cli.config_path.as_ref()) {
        Some(path) => log::info!("Using config: {}", path.display()),
        None => log::info!("Using config: {} or built-in defaults", DEFAULT_CONFIG_FILE),
    }

    let transport = UdpTransport::bind(&config.network.bind_address)?;
    let mut app = SamudraApp::new(&config, transport)?;

    // Set up shutdown signal handler
    let running = app.running_flag();
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        running.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let max_ticks = (cli.count > 0).then_some(cli.count);
    let stats = app.run(max_ticks)?;

    log::info!(
        "SamudraIO stopped after {} ticks ({} datagrams sent, {} failed)",
        stats.ticks,
        stats.delivered,
        stats.failed
    );
    Ok(())
}
