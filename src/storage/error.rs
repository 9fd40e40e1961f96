pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no user with id `{0}`")]
    NotFound(String),
    #[error("a user with id `{0}` already exists")]
    DuplicateId(String),
}
