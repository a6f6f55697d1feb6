pub mod defaults;
pub mod error;
pub mod settings;

pub use defaults::DefaultConfig;
pub use error::{Result, StoreError};
pub use settings::Settings;
