use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::defaults::{CURRENT_CONTEXT, DEFAULT_CONTEXT};
use crate::config::{DefaultConfig, Result, Settings, StoreError};
use crate::context::StorageManager;

/// The loaded root config and current context, backed by files under the
/// config home.
pub struct ContextManager {
    storage: StorageManager,
    config: Settings,
    context: Settings,
    notices: Vec<String>,
}

impl ContextManager {
    /// Initializes the store at the resolved config home.
    pub fn initialize() -> Result<Self> {
        Self::open(StorageManager::new()?)
    }

    /// Initializes the store at an explicit home directory.
    pub fn initialize_at(home: impl Into<PathBuf>) -> Result<Self> {
        Self::open(StorageManager::with_home(home))
    }

    fn open(storage: StorageManager) -> Result<Self> {
        let mut notices = Vec::new();

        let home = storage.get_home_dir();
        if storage.ensure_dir(home)? {
            notices.push(format!("config home={}", home.display()));
        }

        let config_file = storage.get_config_file_path();
        if storage.ensure_settings_file(config_file, &DefaultConfig::root_settings())? {
            notices.push(format!("config file={}", config_file.display()));
        }
        let config = Settings::load(config_file)?;

        storage.ensure_dir(storage.get_contexts_dir())?;

        let default_context = storage.context_file_path(DEFAULT_CONTEXT)?;
        if storage.ensure_settings_file(&default_context, &DefaultConfig::context_settings())? {
            notices.push(format!(
                "default context file={}",
                default_context.display()
            ));
        }

        let current = config.get(CURRENT_CONTEXT);
        let context = load_context(&storage, current)?;
        info!("Loaded context '{current}' from {}", home.display());

        Ok(Self {
            storage,
            config,
            context,
            notices,
        })
    }

    /// Root config value for `key`, empty when absent.
    pub fn get(&self, key: &str) -> &str {
        self.config.get(key)
    }

    /// Current context value for `key`, empty when absent.
    pub fn get_from_context(&self, key: &str) -> &str {
        self.context.get(key)
    }

    pub fn current_context(&self) -> &str {
        self.get(CURRENT_CONTEXT)
    }

    /// Makes `name` the current context and persists the root config.
    ///
    /// The root config file is left untouched when `name` has no context
    /// file. On success the in-memory context is reloaded from the new file.
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        let context = load_context(&self.storage, name)?;

        let mut config = self.config.clone();
        config.set(CURRENT_CONTEXT, name);
        config.save(self.storage.get_config_file_path())?;

        debug!("Switched current context to '{name}'");
        self.config = config;
        self.context = context;
        Ok(())
    }

    pub fn list_contexts(&self) -> Result<Vec<String>> {
        self.storage.list_context_names()
    }

    /// Paths created by this initialization, as `label=path` lines.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn home_path(&self) -> &Path {
        self.storage.get_home_dir()
    }
}

fn load_context(storage: &StorageManager, name: &str) -> Result<Settings> {
    let path = storage.context_file_path(name)?;
    if !path.is_file() {
        return Err(StoreError::ContextNotFound {
            name: name.to_string(),
            path,
        });
    }
    Settings::load(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::{API_URL, CLI_VERSION, DEFAULT_API_URL};
    use std::fs;
    use tempfile::TempDir;

    fn snapshot(home: &Path) -> Vec<(PathBuf, String)> {
        let mut files = vec![home.join("config.yaml")];
        let mut contexts: Vec<PathBuf> = fs::read_dir(home.join("contexts"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        contexts.sort();
        files.extend(contexts);
        files
            .into_iter()
            .map(|p| {
                let content = fs::read_to_string(&p).unwrap();
                (p, content)
            })
            .collect()
    }

    fn add_context(home: &Path, name: &str, api_url: &str) {
        let settings: Settings = [(API_URL, api_url)].into_iter().collect();
        settings
            .save(&home.join("contexts").join(format!("{name}.yaml")))
            .unwrap();
    }

    #[test]
    fn test_seeds_defaults_in_empty_home() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");

        let store = ContextManager::initialize_at(&home).unwrap();

        assert_eq!(store.get(CURRENT_CONTEXT), "default");
        assert_eq!(store.get(CLI_VERSION), DefaultConfig::current_version());
        assert_eq!(store.get_from_context(API_URL), DEFAULT_API_URL);

        let on_disk = Settings::load(&home.join("contexts").join("default.yaml")).unwrap();
        assert_eq!(on_disk.get(API_URL), "http://localhost:8080");
        assert_eq!(store.notices().len(), 3);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let home = dir.path();

        ContextManager::initialize_at(home).unwrap();
        let first = snapshot(home);

        let store = ContextManager::initialize_at(home).unwrap();
        assert_eq!(snapshot(home), first);
        assert!(store.notices().is_empty());
    }

    #[test]
    fn test_missing_key_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ContextManager::initialize_at(dir.path()).unwrap();
        assert_eq!(store.get("no-such-key"), "");
        assert_eq!(store.get_from_context("no-such-key"), "");
    }

    #[test]
    fn test_switch_then_query() {
        let dir = TempDir::new().unwrap();
        let home = dir.path();
        let mut store = ContextManager::initialize_at(home).unwrap();
        add_context(home, "work", "https://work.example.com");

        store.use_context("work").unwrap();

        assert_eq!(store.get(CURRENT_CONTEXT), "work");
        assert_eq!(store.get_from_context(API_URL), "https://work.example.com");

        // A fresh process sees the switch too.
        let reopened = ContextManager::initialize_at(home).unwrap();
        assert_eq!(reopened.current_context(), "work");
        assert_eq!(reopened.get_from_context(API_URL), "https://work.example.com");
    }

    #[test]
    fn test_use_missing_context_leaves_config_untouched() {
        let dir = TempDir::new().unwrap();
        let home = dir.path();
        let mut store = ContextManager::initialize_at(home).unwrap();
        let before = fs::read_to_string(home.join("config.yaml")).unwrap();

        let err = store.use_context("nope").unwrap_err();

        assert!(matches!(err, StoreError::ContextNotFound { ref name, .. } if name == "nope"));
        assert_eq!(fs::read_to_string(home.join("config.yaml")).unwrap(), before);
        assert_eq!(store.current_context(), "default");
    }

    #[test]
    fn test_use_context_keeps_other_root_keys() {
        let dir = TempDir::new().unwrap();
        let home = dir.path();
        let mut store = ContextManager::initialize_at(home).unwrap();
        add_context(home, "staging", "https://staging.example.com");

        store.use_context("staging").unwrap();

        let on_disk = Settings::load(&home.join("config.yaml")).unwrap();
        assert_eq!(on_disk.get(CURRENT_CONTEXT), "staging");
        assert_eq!(on_disk.get(CLI_VERSION), DefaultConfig::current_version());
    }

    #[test]
    fn test_dangling_current_context_fails_initialization() {
        let dir = TempDir::new().unwrap();
        let home = dir.path();
        ContextManager::initialize_at(home).unwrap();

        let config: Settings = [(CURRENT_CONTEXT, "gone")].into_iter().collect();
        config.save(&home.join("config.yaml")).unwrap();

        let err = ContextManager::initialize_at(home).err().unwrap();
        assert!(matches!(err, StoreError::ContextNotFound { .. }));
    }

    #[test]
    fn test_paths_follow_home() {
        let dir = TempDir::new().unwrap();
        let store = ContextManager::initialize_at(dir.path()).unwrap();

        assert_eq!(store.home_path(), dir.path());
        assert_eq!(
            store.storage.get_config_file_path(),
            &dir.path().join("config.yaml")
        );
        assert!(store
            .storage
            .context_file_path("default")
            .unwrap()
            .is_file());
    }

    #[test]
    fn test_list_contexts() {
        let dir = TempDir::new().unwrap();
        let home = dir.path();
        let store = ContextManager::initialize_at(home).unwrap();
        add_context(home, "work", "https://work.example.com");

        assert_eq!(store.list_contexts().unwrap(), vec!["default", "work"]);
    }
}
