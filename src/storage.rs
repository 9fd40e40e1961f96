use std::sync::Arc;
use tokio::sync::RwLock;

pub use memory::MemoryStorage;
pub use user::*;
use crate::storage::error::StorageResult;

pub mod error;
pub mod memory;
pub mod user;

/// Ordered collection of users, keyed by id.
pub trait Storage: Send + Sync {
    /// All users in insertion order.
    fn list(&self) -> Vec<User>;

    fn find_by_id(&self, id: &str) -> StorageResult<User>;

    /// Adds `user` after every existing record.
    fn append(&mut self, user: User) -> StorageResult<()>;

    /// Replaces the record stored under `id` with `user`, keeping its position.
    fn replace_by_id(&mut self, id: &str, user: User) -> StorageResult<()>;

    /// Removes the record stored under `id`, returning it.
    fn remove_by_id(&mut self, id: &str) -> StorageResult<User>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared handle to the store, cloned into every request.
#[derive(Clone)]
pub struct Db(Arc<RwLock<dyn Storage>>);

impl Db {
    pub fn new<S: Storage + 'static>(storage: S) -> Self {
        Self(Arc::new(RwLock::new(storage)))
    }

    pub async fn list(&self) -> Vec<User> {
        self.0.read().await.list()
    }

    pub async fn find_by_id(&self, id: &str) -> StorageResult<User> {
        self.0.read().await.find_by_id(id)
    }

    pub async fn append(&self, user: User) -> StorageResult<()> {
        self.0.write().await.append(user)
    }

    pub async fn replace_by_id(&self, id: &str, user: User) -> StorageResult<()> {
        self.0.write().await.replace_by_id(id, user)
    }

    pub async fn remove_by_id(&self, id: &str) -> StorageResult<User> {
        self.0.write().await.remove_by_id(id)
    }
}
