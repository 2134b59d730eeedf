use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use homework_watchbot::api::{PracticumClient, StatusApi};
use homework_watchbot::config;
use homework_watchbot::{response, status};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Fetch one status batch and print the messages it would produce, without sending them"
)]
struct Args {
    /// Path to YAML config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cursor to query from (unix timestamp); 0 returns the full history
    #[arg(long, default_value = "0")]
    from_date: i64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Telegram credentials are not needed here, so only the API token is checked.
    let cfg = config::read_with(args.config.as_deref(), |key| std::env::var(key).ok())?;
    if cfg.practicum.token.trim().is_empty() {
        bail!("{} is not set", config::ENV_PRACTICUM_TOKEN);
    }
    let client = PracticumClient::from_config(&cfg)?;

    let body = client
        .fetch(args.from_date)
        .await
        .context("status API request failed")?;
    let homeworks = response::validate(&body).context("unexpected response shape")?;
    println!(
        "next cursor: {}",
        response::next_cursor(&body)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "<none>".into())
    );
    println!("{} record(s):", homeworks.len());
    for item in homeworks {
        match status::translate(item) {
            Ok(message) => println!("  {}", message),
            Err(err) => println!("  !! {} in {}", err, item),
        }
    }
    Ok(())
}
