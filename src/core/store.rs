use crate::config::StoreConfig;
use crate::core::error::StoreError;
use crate::core::snapshot::SettingsSnapshot;
use crate::core::source::{SeedSource, Settings, SettingsSource};
use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

const UNLOADED: u8 = 0;
const LOADING: u8 = 1;
const LOADED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
}

impl From<u8> for LoadState {
    fn from(raw: u8) -> Self {
        match raw {
            LOADING => LoadState::Loading,
            LOADED => LoadState::Loaded,
            _ => LoadState::Unloaded,
        }
    }
}

/// Lazily populated, reloadable settings cache.
///
/// The first accessor runs the source's load procedure; every later accessor
/// takes the lock-free fast path. Concurrent first accessors are collapsed onto
/// one load by re-checking under `load_lock`.
///
/// `state` and `settings` are only written while `load_lock` is held.
/// `settings` is `Some` exactly when a complete generation is installed, and
/// it is the only thing the fast path looks at.
#[derive(Debug)]
pub struct ConfigStore<S = SeedSource> {
    source: S,
    state: AtomicU8,
    settings: ArcSwapOption<Settings>,
    load_lock: Mutex<()>,
    loads: AtomicU64,
}

impl ConfigStore<SeedSource> {
    pub fn with_config(config: &StoreConfig) -> Self {
        Self::new(SeedSource::new(config.load_delay))
    }
}

impl Default for ConfigStore<SeedSource> {
    fn default() -> Self {
        Self::new(SeedSource::default())
    }
}

impl<S: SettingsSource> ConfigStore<S> {
    /// Creates an empty, unloaded store. Nothing is read until the first access.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: AtomicU8::new(UNLOADED),
            settings: ArcSwapOption::empty(),
            load_lock: Mutex::new(()),
            loads: AtomicU64::new(0),
        }
    }

    /// Looks up `key`, loading the store first if needed.
    ///
    /// A key that is not configured is `Ok(None)`, never an error. `Ok` always
    /// comes from a complete generation: a reader racing a failed reload gets
    /// either the previous generation or the load error.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        let settings = self.ensure_loaded()?;
        let value = settings.get(key).cloned();
        trace!(key, found = value.is_some(), "setting lookup");
        Ok(value)
    }

    /// Immutable view of every setting, loading the store first if needed.
    pub fn get_all_settings(&self) -> Result<SettingsSnapshot, StoreError> {
        self.ensure_loaded().map(SettingsSnapshot::new)
    }

    /// Discards the current entries and repopulates from the source before
    /// returning. Runs the load procedure exactly once per call.
    ///
    /// Readers that arrive during the reload block on the lock until the new
    /// generation is installed; they never see a partial mapping.
    pub fn reload(&self) -> Result<(), StoreError> {
        let _guard = self.lock();
        let generation = self.loads.load(Ordering::Relaxed);
        info!(generation, "reloading settings");
        self.settings.store(None);
        self.state.store(UNLOADED, Ordering::Release);
        self.load_locked().map(|_| ())
    }

    pub fn state(&self) -> LoadState {
        LoadState::from(self.state.load(Ordering::Acquire))
    }

    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Number of successful load procedure runs since construction.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Acquire)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn ensure_loaded(&self) -> Result<Arc<Settings>, StoreError> {
        if let Some(settings) = self.settings.load_full() {
            return Ok(settings);
        }

        let _guard = self.lock();
        if let Some(settings) = self.settings.load_full() {
            // another thread finished the load while we waited
            return Ok(settings);
        }
        self.load_locked()
    }

    /// Caller must hold `load_lock`.
    fn load_locked(&self) -> Result<Arc<Settings>, StoreError> {
        let mut attempt = LoadAttempt::begin(&self.state, &self.settings);
        debug!("loading settings");
        let started = Instant::now();

        let settings = match self.source.load() {
            Ok(settings) => Arc::new(settings),
            Err(e) => {
                warn!(error = %e, "settings load failed, will retry on next access");
                return Err(StoreError::LoadFailed(e));
            }
        };

        self.settings.store(Some(Arc::clone(&settings)));
        let generation = self.loads.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.store(LOADED, Ordering::Release);
        attempt.completed = true;
        debug!(
            entries = settings.len(),
            generation,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "settings loaded"
        );
        Ok(settings)
    }

    // Guards no data. A panicking source unwinds through `LoadAttempt`,
    // so the next caller finds the store unloaded and loads again.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.load_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks the store `LOADING` for the duration of one load. Unless the load
/// completes, dropping it (on error or unwind) leaves the store unloaded with
/// no generation installed.
struct LoadAttempt<'a> {
    state: &'a AtomicU8,
    settings: &'a ArcSwapOption<Settings>,
    completed: bool,
}

impl<'a> LoadAttempt<'a> {
    fn begin(state: &'a AtomicU8, settings: &'a ArcSwapOption<Settings>) -> Self {
        state.store(LOADING, Ordering::Release);
        Self {
            state,
            settings,
            completed: false,
        }
    }
}

impl Drop for LoadAttempt<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.settings.store(None);
            self.state.store(UNLOADED, Ordering::Release);
        }
    }
}
