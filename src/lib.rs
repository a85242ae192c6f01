pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::Converter;
use crate::core::config::AppConfig;
use crate::core::prefs::PreferenceStore;
use crate::providers::ExchangeRateApiProvider;
use crate::store::{DiskStore, MemoryStore};

pub enum AppCommand {
    Convert {
        amount: Option<String>,
        from: Option<String>,
        to: Option<String>,
    },
    Swap,
    Currencies,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxc starting...");

    // The currency listing is static and works without a config file.
    if let AppCommand::Currencies = command {
        cli::currencies::run();
        return Ok(());
    }

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(data_path = ?config.data_path, "Loaded config");

    let api = config.exchange_rate_api();
    let api_key = api.api_key.context(
        "No API key configured. Run `fxc setup` and add your ExchangeRate-API key to the config file",
    )?;

    let provider = Arc::new(ExchangeRateApiProvider::new(&api.base_url, &api_key));
    let store = open_preference_store(&config);
    let mut converter = Converter::restore(provider, store).await;

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&mut converter, amount, from, to).await
        }
        AppCommand::Swap => cli::convert::swap(&mut converter).await,
        AppCommand::Currencies => unreachable!("handled above"),
    }
}

/// Opens the on-disk preference store, falling back to a transient
/// in-memory store. A broken data directory downgrades persistence but
/// never blocks a conversion.
fn open_preference_store(config: &AppConfig) -> Arc<dyn PreferenceStore> {
    let data_path = match config.default_data_path() {
        Ok(path) => path.join("prefs"),
        Err(e) => {
            warn!("Could not determine data directory: {e}; last-used inputs will not persist");
            return Arc::new(MemoryStore::new());
        }
    };

    match DiskStore::open(&data_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Could not open preference store at {}: {e}; last-used inputs will not persist",
                data_path.display()
            );
            Arc::new(MemoryStore::new())
        }
    }
}
