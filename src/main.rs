use anyhow::{Context, Result};
use clap::Parser;
use lazyconf::core::source::{DATABASE_CONNECTION, LOG_LEVEL};
use lazyconf::{init_settings_store, ConfigStore, StoreConfig};
use tracing::info;

use crate::params::{Command, Params};

mod params;

/// Demo consumer: reads its connection string from the shared store.
struct DatabaseService {
    settings: &'static ConfigStore,
}

impl DatabaseService {
    fn new(settings: &'static ConfigStore) -> Self {
        Self { settings }
    }

    fn connect(&self) -> Result<()> {
        let conn = self
            .settings
            .get_setting(DATABASE_CONNECTION)
            .context("reading database connection")?;
        println!("[DatabaseService] {}", conn.as_deref().unwrap_or_default());
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_thread_ids(true)
        .compact()
        .init();

    let params = Params::parse();
    let config = StoreConfig::with_load_delay_ms(params.load_delay_ms);
    info!("lazyconf starting with config: {:?}", config);

    let store = init_settings_store(&config);

    match params.command {
        None => {
            DatabaseService::new(store).connect()?;
            let level = store.get_setting(LOG_LEVEL)?;
            println!("{}", level.as_deref().unwrap_or_default());
        }
        Some(Command::Get { key }) => match store.get_setting(&key)? {
            Some(value) => println!("{}", value),
            None => println!("<not set>"),
        },
        Some(Command::List) => print_all(store)?,
        Some(Command::Reload) => {
            store.reload().context("reloading settings")?;
            print_all(store)?;
        }
    }

    Ok(())
}

fn print_all(store: &ConfigStore) -> Result<()> {
    let snapshot = store.get_all_settings()?;
    for (key, value) in snapshot.sorted() {
        println!("{} = {}", key, value);
    }
    Ok(())
}
