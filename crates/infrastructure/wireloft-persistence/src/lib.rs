mod error;
mod local_store;
mod memory_store;
mod redb_store;

pub use error::*;
pub use local_store::{LocalStore, LocalStoreExt};
pub use memory_store::MemoryLocalStore;
pub use redb_store::{RedbLocalStore, CURRENT_SCHEMA};
