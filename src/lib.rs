pub mod cli;
pub mod config;
pub mod context;
pub mod release;

pub use cli::{Cli, CommandHandler, Commands};
pub use config::{Settings, StoreError};
pub use context::ContextManager;
