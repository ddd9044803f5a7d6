use anyhow::Result;
use clap::Parser;
use reviewbot::api::ReviewApiClient;
use reviewbot::config::Config;
use reviewbot::poller::Poller;
use reviewbot::telegram::TelegramNotifier;
use std::process;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reviewbot")]
#[command(
    about = "Polls the homework review API and reports status changes to Telegram",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Override the poll interval in seconds
    #[arg(long)]
    interval: Option<u64>,

    /// Run a single poll cycle and exit (non-zero on failure)
    #[arg(long)]
    once: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_env();
    if !config.is_complete() {
        // Startup precondition, not a retry case: bail before any network call.
        error!(
            "missing required environment variables: {}",
            config.missing_vars().join(", ")
        );
        process::exit(1);
    }

    if let Some(secs) = cli.interval {
        config.poll_interval = Duration::from_secs(secs);
    }

    let api = ReviewApiClient::new(&config)?;
    let notifier = TelegramNotifier::new(&config)?;
    let mut poller = Poller::new(api, notifier, config.poll_interval);

    if cli.once {
        if !poller.run_once() {
            process::exit(1);
        }
        return Ok(());
    }

    poller.run()
}
