use thiserror::Error;

/// Errors reported by [`HashTable`](crate::HashTable).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashTableError {
    #[error("Hash table is full, all {capacity} slots are occupied")]
    TableFull { capacity: usize },
    #[error("Hash table capacity must be greater than zero")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, HashTableError>;
