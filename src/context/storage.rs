use log::{debug, info};
use std::fs::{self, DirBuilder};
use std::path::{Path, PathBuf};

use crate::config::defaults::{
    CONFIG_FILE_NAME, CONFIG_FOLDER_NAME, CONTEXTS_FOLDER_NAME, CONTEXT_FILE_EXTENSION,
    ENV_CONFIG_HOME_PATH, READ_WRITE_PERMS,
};
use crate::config::{Result, Settings, StoreError};

/// Filesystem layout under the config home:
///
/// ```text
/// <home>/config.yaml
/// <home>/contexts/<name>.yaml
/// ```
pub struct StorageManager {
    home_dir: PathBuf,
    config_file: PathBuf,
    contexts_dir: PathBuf,
}

impl StorageManager {
    /// Resolves the home from `ENV_CONFIG_HOME_PATH`, falling back to
    /// `~/.ctxcli`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_home(Self::resolve_home()?))
    }

    pub fn with_home(home_dir: impl Into<PathBuf>) -> Self {
        let home_dir = home_dir.into();
        let config_file = home_dir.join(CONFIG_FILE_NAME);
        let contexts_dir = home_dir.join(CONTEXTS_FOLDER_NAME);

        Self {
            home_dir,
            config_file,
            contexts_dir,
        }
    }

    fn resolve_home() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(ENV_CONFIG_HOME_PATH).filter(|p| !p.is_empty()) {
            debug!("Using config home from {ENV_CONFIG_HOME_PATH}");
            return Ok(PathBuf::from(path));
        }

        let user_home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
        Ok(user_home.join(CONFIG_FOLDER_NAME))
    }

    /// Creates `path` if missing. Returns whether it was created.
    pub fn ensure_dir(&self, path: &Path) -> Result<bool> {
        if path.is_dir() {
            return Ok(false);
        }

        let mut builder = DirBuilder::new();
        builder.recursive(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(READ_WRITE_PERMS);
        }

        builder
            .create(path)
            .map_err(|e| StoreError::create_dir(path, e))?;
        info!("Created directory {}", path.display());
        Ok(true)
    }

    /// Writes `defaults` to `path` unless the file already exists. Returns
    /// whether it was created.
    pub fn ensure_settings_file(&self, path: &Path, defaults: &Settings) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }

        defaults.save(path)?;
        info!("Created settings file {}", path.display());
        Ok(true)
    }

    /// Path of the file backing context `name`. Rejects names that would
    /// escape the contexts directory.
    pub fn context_file_path(&self, name: &str) -> Result<PathBuf> {
        if !is_valid_context_name(name) {
            return Err(StoreError::InvalidContextName(name.to_string()));
        }
        Ok(self
            .contexts_dir
            .join(format!("{name}.{CONTEXT_FILE_EXTENSION}")))
    }

    /// Names of all context files, sorted.
    pub fn list_context_names(&self) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(&self.contexts_dir).map_err(|e| StoreError::read_file(&self.contexts_dir, e))?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == CONTEXT_FILE_EXTENSION)
            })
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .collect();

        names.sort();
        Ok(names)
    }

    pub fn get_home_dir(&self) -> &PathBuf {
        &self.home_dir
    }

    pub fn get_config_file_path(&self) -> &PathBuf {
        &self.config_file
    }

    pub fn get_contexts_dir(&self) -> &PathBuf {
        &self.contexts_dir
    }
}

fn is_valid_context_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
