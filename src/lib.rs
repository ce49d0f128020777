mod config;
pub mod core;

use std::sync::OnceLock;

pub use config::StoreConfig;
pub use crate::core::error::{SourceError, StoreError};
pub use crate::core::snapshot::SettingsSnapshot;
pub use crate::core::source::{SeedSource, Settings, SettingsSource};
pub use crate::core::store::{ConfigStore, LoadState};

/// Filled **once** by `main()` through [`init_settings_store`]; read-only afterwards.
pub static SETTINGS_STORE: OnceLock<ConfigStore> = OnceLock::new();

/// Installs the process-wide store built from `config`. The first call wins;
/// later calls return the already installed store and ignore `config`.
pub fn init_settings_store(config: &StoreConfig) -> &'static ConfigStore {
    SETTINGS_STORE.get_or_init(|| ConfigStore::with_config(config))
}

/// Convenience accessor; falls back to the default store when `main()` did
/// not install one.
pub fn settings_store() -> &'static ConfigStore {
    SETTINGS_STORE.get_or_init(ConfigStore::default)
}
