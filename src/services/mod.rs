// Service exports
pub mod appwrite;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod storage;

pub use appwrite::{AppwriteClient, AppwriteError};
pub use cache::{ranking_key, CacheError, RankingCache};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use storage::{Storage, StorageError};
