pub mod manager;
pub mod storage;

pub use manager::ContextManager;
pub use storage::StorageManager;
