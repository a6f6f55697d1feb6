pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Commands, VersionScope};
pub use commands::CommandHandler;
pub use output::OutputFormatter;
