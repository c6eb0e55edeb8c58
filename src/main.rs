// Entry point.
// Wires settings, the cache, the poller, and the notification worker together.

mod config;
mod error;
mod notifier;
mod poller;
mod startup;
mod steam;
mod store;

use std::collections::HashSet;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::{Mutex, mpsc};
use tracing_subscriber::EnvFilter;

use config::{Overrides, Settings};
use error::WishwatchError;
use notifier::{DesktopSink, Notifier, PendingSet};
use poller::Poller;
use steam::SteamClient;
use store::{CacheStore, SharedCache};

/// Watch a Steam wishlist and pop a desktop notification when something goes
/// on sale.
#[derive(Parser)]
#[command(name = "wishwatch", version, about)]
struct Cli {
    /// Steam profile id to watch (overrides the settings file)
    #[arg(long)]
    user: Option<u64>,

    /// Minutes between polling cycles (overrides the settings file)
    #[arg(long)]
    interval: Option<u64>,

    /// Minimum discount percentage worth notifying about (overrides the settings file)
    #[arg(long)]
    discount: Option<i64>,

    /// Shorten delays and let cached entries expire immediately
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wishwatch=info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> error::Result<()> {
    if let Err(e) = startup::register() {
        tracing::warn!(error = %e, "startup registration failed");
    }

    let settings_path = store::settings_path()
        .ok_or_else(|| WishwatchError::Other("no home directory for settings".to_string()))?;
    let settings = Settings::load(&settings_path)?;
    let overrides = Overrides {
        profile_id: cli.user,
        interval_minutes: cli.interval,
        min_discount: cli.discount,
    };
    let profile = settings.resolve(cli.debug, &overrides)?;

    let cache_path = store::cached_data_path()
        .ok_or_else(|| WishwatchError::Other("no home directory for cache".to_string()))?;
    let cache: SharedCache = Arc::new(Mutex::new(CacheStore::load(&cache_path)?));
    let pending: PendingSet = Arc::new(Mutex::new(HashSet::new()));
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::time::sleep(profile.start_delay).await;

    let worker = Notifier::new(
        DesktopSink,
        profile.clone(),
        Arc::clone(&cache),
        Arc::clone(&pending),
        rx,
    );
    tokio::spawn(worker.run());

    let client = SteamClient::new(profile.wishlist_url.clone())?;
    tracing::info!(url = %profile.wishlist_url, "starting wishlist polling");
    Poller::new(client, profile, cache, pending, tx).run().await;
    Ok(())
}
