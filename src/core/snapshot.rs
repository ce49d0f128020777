use crate::core::source::Settings;
use std::collections::hash_map::Iter;
use std::ops::Deref;
use std::sync::Arc;

/// Read-only view of one generation of the settings mapping.
///
/// A snapshot shares the generation the store had when it was taken. A later
/// reload installs a new generation and leaves this one untouched, so a
/// snapshot stays complete and consistent for as long as it is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    inner: Arc<Settings>,
}

impl SettingsSnapshot {
    pub(crate) fn new(inner: Arc<Settings>) -> Self {
        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.inner.iter()
    }

    /// Owned copy of the mapping. Changes to it never reach the store.
    pub fn to_map(&self) -> Settings {
        self.inner.as_ref().clone()
    }

    /// Entries ordered by key, for stable display.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .inner
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Deref for SettingsSnapshot {
    type Target = Settings;

    fn deref(&self) -> &Settings {
        &self.inner
    }
}

impl<'a> IntoIterator for &'a SettingsSnapshot {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
