/// Failure of a [`LocalStore`](crate::LocalStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("local store is corrupt")]
    Corrupt,
    #[error("local store was written by a newer client (schema {found}, supported {supported})")]
    NewerSchema { found: u32, supported: u32 },
    #[error("local store is in use by another handle")]
    Busy,
    #[error("no data directory available on this platform")]
    NoDataDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("redb: {0}")]
    Backend(Box<redb::Error>),
}

impl StorageError {
    /// Whether the same call may succeed later without intervention.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Busy)
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(value: redb::DatabaseError) -> Self {
        match value {
            redb::DatabaseError::DatabaseAlreadyOpen => Self::Busy,
            other => Self::Backend(Box::new(other.into())),
        }
    }
}

macro_rules! backend_errors {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for StorageError {
                fn from(value: $ty) -> Self {
                    Self::Backend(Box::new(value.into()))
                }
            }
        )+
    };
}

backend_errors!(
    redb::Error,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);
