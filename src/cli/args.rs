use clap::{Parser, Subcommand, ValueEnum};

pub const MAIN_COMMAND: &str = "ctxcli";

#[derive(Parser)]
#[command(name = MAIN_COMMAND)]
#[command(about = "Manage a local config file and switch between named API contexts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// show help
    Help {
        /// Command to describe
        command: Option<String>,
    },
    /// show version
    Version {
        /// Which version to show
        #[arg(short, long, value_enum, default_value_t = VersionScope::Current)]
        scope: VersionScope,
    },
    /// show context
    Context {
        /// Switch the current context
        #[arg(short = 'u', long = "use", value_name = "NAME", conflicts_with = "list")]
        use_context: Option<String>,
        /// List available contexts
        #[arg(short, long)]
        list: bool,
    },
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VersionScope {
    /// Version compiled into this binary
    #[default]
    Current,
    /// Newest published release
    Latest,
}

/// Subcommands with their one-line descriptions, in display order.
pub const SUB_COMMANDS: [(&str, &str); 3] = [
    ("help", "show help"),
    ("version", "show version"),
    ("context", "show context"),
];

pub fn describe(command: &str) -> Option<&'static str> {
    SUB_COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, description)| *description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once(MAIN_COMMAND).chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_args_has_no_command() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn test_version_scope_defaults_to_current() {
        assert_eq!(
            parse(&["version"]).command,
            parse(&["version", "-s", "current"]).command
        );
        assert_eq!(
            parse(&["version", "--scope", "latest"]).command,
            Some(Commands::Version {
                scope: VersionScope::Latest
            })
        );
    }

    #[test]
    fn test_context_use_flag() {
        assert_eq!(
            parse(&["context", "-u", "work"]).command,
            Some(Commands::Context {
                use_context: Some("work".to_string()),
                list: false
            })
        );
        assert_eq!(
            parse(&["context", "--use", "work"]).command,
            parse(&["context", "-u", "work"]).command
        );
    }

    #[test]
    fn test_help_takes_optional_command() {
        assert_eq!(
            parse(&["help", "context"]).command,
            Some(Commands::Help {
                command: Some("context".to_string())
            })
        );
    }

    #[test]
    fn test_unknown_subcommand_is_captured() {
        assert_eq!(
            parse(&["frobnicate", "--x"]).command,
            Some(Commands::Unknown(vec![
                "frobnicate".to_string(),
                "--x".to_string()
            ]))
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe("version"), Some("show version"));
        assert_eq!(describe("nope"), None);
    }
}
