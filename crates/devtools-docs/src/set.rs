//! # Resolved Configuration
//!
//! [`ConfigSet`] holds one value per recognized key for a single run. It is
//! built from the saved file (reuse) or from the template plus the user's
//! answers (fresh), and `STRIP_FROM_PATH` is always re-derived from
//! `OUTPUT_DIRECTORY` before the set is written or used.

use std::collections::BTreeMap;

use crate::config::ConfigFile;
use crate::keys::ConfigKey;

/// Flag value that switches a generator on. Compared exactly.
pub const ENABLED: &str = "YES";

/// Value of every recognized key, ordered by key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSet {
    values: BTreeMap<ConfigKey, String>,
}

impl Default for ConfigSet {
    fn default() -> Self {
        Self {
            values: ConfigKey::ALL
                .into_iter()
                .map(|key| (key, String::new()))
                .collect(),
        }
    }
}

impl ConfigSet {
    /// Take every recognized key from `file`; keys it lacks are empty.
    pub fn from_file(file: &ConfigFile) -> Self {
        let mut set = Self::default();
        for key in ConfigKey::ALL {
            if let Some(value) = file.get(key.as_str()) {
                set.set(key, value);
            }
        }
        set
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Overwrite `STRIP_FROM_PATH` with `OUTPUT_DIRECTORY`.
    pub fn derive_strip_path(&mut self) {
        let output = self.get(ConfigKey::OutputDirectory).to_string();
        self.set(ConfigKey::StripFromPath, output);
    }

    /// Whether a generate-flag is exactly `YES`.
    pub fn is_enabled(&self, key: ConfigKey) -> bool {
        self.get(key) == ENABLED
    }

    pub fn output_directory(&self) -> &str {
        self.get(ConfigKey::OutputDirectory)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }
}
