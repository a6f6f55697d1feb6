use anyhow::Result;
use clap::CommandFactory;
use log::{debug, info, warn};

use crate::cli::args::{describe, MAIN_COMMAND, SUB_COMMANDS};
use crate::cli::{Cli, Commands, OutputFormatter, VersionScope};
use crate::config::DefaultConfig;
use crate::context::ContextManager;
use crate::release::ReleaseClient;

pub struct CommandHandler {
    store: ContextManager,
    release_client: ReleaseClient,
    formatter: OutputFormatter,
}

impl CommandHandler {
    /// Initializes the store at the resolved config home.
    pub fn new() -> Result<Self> {
        let store = ContextManager::initialize()?;
        let release_client = ReleaseClient::new()?;
        Ok(Self::with_parts(
            store,
            release_client,
            OutputFormatter::for_stdout(),
        ))
    }

    pub fn with_parts(
        store: ContextManager,
        release_client: ReleaseClient,
        formatter: OutputFormatter,
    ) -> Self {
        Self {
            store,
            release_client,
            formatter,
        }
    }

    /// One line per path created while initializing the store.
    pub fn notices(&self) -> Vec<String> {
        self.store
            .notices()
            .iter()
            .map(|notice| self.formatter.format_notice(notice))
            .collect()
    }

    pub async fn handle_command(&mut self, command: Commands) -> Result<String> {
        match command {
            Commands::Help { command } => Ok(self.handle_help(command.as_deref())),
            Commands::Version { scope } => Ok(self.handle_version(scope).await),
            Commands::Context { use_context, list } => {
                self.handle_context(use_context.as_deref(), list)
            }
            Commands::Unknown(args) => {
                debug!("Unknown command: {args:?}");
                Ok(self.flag_usage())
            }
        }
    }

    /// Banner shown when no command is given.
    pub fn usage(&self) -> String {
        let mut usage = format!(
            "\nUsage:\n\n{:<10}{MAIN_COMMAND} <command> [arguments]\n\nThe commands are:\n\n",
            ""
        );
        for (name, description) in SUB_COMMANDS {
            usage.push_str(&format!("{:<10}{:<10}{}\n", "", name, description));
        }
        usage.push_str(&format!(
            "\nUse {MAIN_COMMAND} help <command> for more information about a command.\n"
        ));
        usage
    }

    fn handle_help(&self, command: Option<&str>) -> String {
        match command {
            None => {
                let names: Vec<&str> = SUB_COMMANDS.iter().map(|(name, _)| *name).collect();
                format!("\n{MAIN_COMMAND} help [{}]\n", names.join(" | "))
            }
            Some(command) => describe(command).unwrap_or_default().to_string(),
        }
    }

    async fn handle_version(&self, scope: VersionScope) -> String {
        match scope {
            VersionScope::Current => format!(
                "\n{MAIN_COMMAND} version={}\n",
                DefaultConfig::current_version()
            ),
            VersionScope::Latest => match self.release_client.latest_version().await {
                Ok(version) => format!("\nLatest version={version}\n"),
                Err(e) => {
                    warn!("Latest version check failed: {e}");
                    self.formatter.format_error(&e.to_string())
                }
            },
        }
    }

    fn handle_context(&mut self, use_context: Option<&str>, list: bool) -> Result<String> {
        if list {
            return self.handle_context_list();
        }

        if let Some(name) = use_context {
            self.store.use_context(name)?;
            info!("Now using context '{name}'");
        }

        Ok(self.context_summary())
    }

    fn handle_context_list(&self) -> Result<String> {
        let current = self.store.current_context();
        let lines: Vec<String> = self
            .store
            .list_contexts()?
            .into_iter()
            .map(|name| {
                if name == current {
                    self.formatter.format_success(&format!("* {name}"))
                } else {
                    format!("  {name}")
                }
            })
            .collect();

        Ok(format!("\n{}\n", lines.join("\n")))
    }

    fn context_summary(&self) -> String {
        format!(
            "\nconfig home={}\ncurrent context={}\n",
            self.store.home_path().display(),
            self.store.current_context()
        )
    }

    /// Usage of every subcommand's flags.
    fn flag_usage(&self) -> String {
        let mut command = Cli::command();
        command.build();
        command
            .get_subcommands_mut()
            .map(|sub| sub.render_help().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_error(&self, message: &str) -> String {
        self.formatter.format_error(message)
    }
}
