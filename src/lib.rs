pub mod config;
pub mod storage;

pub use storage::cereal::Cereal;
pub use storage::{Storage, StorageError};
