#![allow(dead_code)]

use lazyconf::core::source::seed_settings;
use lazyconf::{Settings, SettingsSource, SourceError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Seed source that counts how many times its load body ran.
#[derive(Default)]
pub struct CountingSource {
    calls: AtomicUsize,
    delay: Duration,
}

impl CountingSource {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SettingsSource for CountingSource {
    fn load(&self) -> Result<Settings, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(seed_settings())
    }
}

/// Fails until `recover` is called, then behaves like the seed source.
#[derive(Default)]
pub struct FlakySource {
    recovered: AtomicBool,
    attempts: AtomicUsize,
}

impl FlakySource {
    pub fn recover(&self) {
        self.recovered.store(true, Ordering::SeqCst);
    }

    pub fn fail_again(&self) {
        self.recovered.store(false, Ordering::SeqCst);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl SettingsSource for FlakySource {
    fn load(&self) -> Result<Settings, SourceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.recovered.load(Ordering::SeqCst) {
            Ok(seed_settings())
        } else {
            Err(SourceError::Unavailable("settings backend offline".into()))
        }
    }
}
