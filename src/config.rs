use crate::core::source::DEFAULT_LOAD_DELAY;
use std::time::Duration;

/// Knobs for the process-wide settings store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long the seed source blocks to simulate a cold read.
    pub load_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            load_delay: DEFAULT_LOAD_DELAY, // 200 ms
        }
    }
}

impl StoreConfig {
    pub fn with_load_delay_ms(ms: u64) -> Self {
        Self {
            load_delay: Duration::from_millis(ms),
        }
    }
}
