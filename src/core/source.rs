use crate::core::error::SourceError;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;
use tracing::debug;

pub type Settings = HashMap<String, String>;

pub const DATABASE_CONNECTION: &str = "DatabaseConnection";
pub const API_KEY: &str = "ApiKey";
pub const CACHE_SERVER: &str = "CacheServer";
pub const LOG_LEVEL: &str = "LogLevel";

/// The fixed entries produced by [`SeedSource`].
pub const SEED_SETTINGS: [(&str, &str); 4] = [
    (DATABASE_CONNECTION, "Server=localhost;Database=MyApp;"),
    (API_KEY, "abc123xyz789"),
    (CACHE_SERVER, "redis://localhost:6379"),
    (LOG_LEVEL, "Information"),
];

pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(200);

/// Where a [`ConfigStore`](crate::core::store::ConfigStore) gets its settings from.
///
/// `load` is called with the store's load lock held, so an implementation never
/// runs concurrently with itself for the same store. It must return the complete
/// mapping; the store never merges results.
pub trait SettingsSource: Send + Sync {
    fn load(&self) -> Result<Settings, SourceError>;
}

impl<F> SettingsSource for F
where
    F: Fn() -> Result<Settings, SourceError> + Send + Sync,
{
    fn load(&self) -> Result<Settings, SourceError> {
        self()
    }
}

/// Stands in for an expensive cold-start read (file, env, database): blocks for
/// `delay`, then yields the seed entries. Never fails.
#[derive(Debug, Clone)]
pub struct SeedSource {
    delay: Duration,
}

impl SeedSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_DELAY)
    }
}

impl SettingsSource for SeedSource {
    fn load(&self) -> Result<Settings, SourceError> {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "simulating slow settings read");
            thread::sleep(self.delay);
        }
        Ok(seed_settings())
    }
}

pub fn seed_settings() -> Settings {
    SEED_SETTINGS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn seed_source_yields_the_four_fixed_entries() {
        let settings = SeedSource::instant().load().unwrap();

        assert_eq!(settings.len(), 4);
        assert_eq!(settings[DATABASE_CONNECTION], "Server=localhost;Database=MyApp;");
        assert_eq!(settings[API_KEY], "abc123xyz789");
        assert_eq!(settings[CACHE_SERVER], "redis://localhost:6379");
        assert_eq!(settings[LOG_LEVEL], "Information");
    }

    #[test]
    fn seed_source_blocks_for_its_delay() {
        let source = SeedSource::new(Duration::from_millis(30));
        let started = Instant::now();
        source.load().unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn closures_act_as_sources() {
        let source = || -> Result<Settings, SourceError> {
            Ok(Settings::from([("k".to_string(), "v".to_string())]))
        };
        let settings = SettingsSource::load(&source).unwrap();
        assert_eq!(settings.get("k").map(String::as_str), Some("v"));
    }
}
