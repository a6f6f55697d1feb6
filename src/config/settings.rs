use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::config::defaults::READ_WRITE_PERMS;
use crate::config::{Result, StoreError};

/// Flat string-to-string settings, persisted as a YAML mapping.
///
/// Used both for the root config and for each context file.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, String>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, or an empty string when absent.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Parses a YAML mapping. Null values (`~`, `null`, or nothing after the
    /// colon) read as empty strings.
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document is an empty mapping, not a parse error.
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let raw: BTreeMap<String, Option<String>> = serde_yaml::from_str(content)?;
        Ok(raw
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading settings from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| StoreError::read_file(path, e))?;
        Self::from_yaml(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("Writing settings to {}", path.display());
        let content = self.to_yaml()?;
        write_file(path, content.as_bytes()).map_err(|e| StoreError::write_file(path, e))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(READ_WRITE_PERMS);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.flush()
}
