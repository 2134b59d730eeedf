use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use homework_watchbot::api::PracticumClient;
use homework_watchbot::config;
use homework_watchbot::notify::TelegramNotifier;
use homework_watchbot::poller::{Intervals, Poller};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to YAML config file; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = match config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(%err, "cannot start without a valid configuration");
            std::process::exit(1);
        }
    };

    let api = PracticumClient::from_config(&cfg)?;
    let notifier = TelegramNotifier::from_config(&cfg);
    let cursor = chrono::Utc::now().timestamp();
    let mut poller = Poller::new(&api, &notifier, cursor, Intervals::from(&cfg.app));

    info!(cursor, once = args.once, "starting homework status poller");
    if args.once {
        let outcome = poller.run_cycle().await;
        info!(?outcome, cursor = poller.cursor(), "single cycle finished");
        return Ok(());
    }
    poller.run().await;
    Ok(())
}
