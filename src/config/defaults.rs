use crate::config::Settings;

/// Environment variable overriding the config home directory.
pub const ENV_CONFIG_HOME_PATH: &str = "ENV_CONFIG_HOME_PATH";

pub const CONFIG_FOLDER_NAME: &str = ".ctxcli";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const CONTEXTS_FOLDER_NAME: &str = "contexts";
pub const CONTEXT_FILE_EXTENSION: &str = "yaml";

// Keys
pub const CURRENT_CONTEXT: &str = "current-context";
pub const CLI_VERSION: &str = "cli-version";
pub const API_URL: &str = "api-URL";

// Default values
pub const DEFAULT_CONTEXT: &str = "default";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Mode for directories and newly created files (owner rwx, group/other rx).
pub const READ_WRITE_PERMS: u32 = 0o755;

pub struct DefaultConfig;

impl DefaultConfig {
    /// Version string compiled into this binary, e.g. `v0.0.1`.
    pub fn current_version() -> String {
        format!("v{}", env!("CARGO_PKG_VERSION"))
    }

    /// Root config written on first run.
    pub fn root_settings() -> Settings {
        let mut settings = Settings::new();
        settings.set(CURRENT_CONTEXT, DEFAULT_CONTEXT);
        settings.set(CLI_VERSION, Self::current_version());
        settings
    }

    /// Settings of the `default` context written on first run.
    pub fn context_settings() -> Settings {
        let mut settings = Settings::new();
        settings.set(API_URL, DEFAULT_API_URL);
        settings
    }
}
