//! Storage adapters for the `StorageProvider` port.

mod file_store;
pub mod mock;

pub use file_store::FileStorageProvider;
pub use mock::MemoryStorageProvider;
