use crate::storage::{
    error::{StorageError, StorageResult},
    seed_users, Storage, User, UserId,
};
use indexmap::IndexMap;

/// Keeps users in insertion order, indexed by id.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    users: IndexMap<UserId, User>,
}

impl MemoryStorage {
    pub fn seeded() -> Self {
        let mut storage = Self::default();
        for user in seed_users() {
            storage.users.insert(user.id.clone(), user);
        }
        storage
    }
}

impl Storage for MemoryStorage {
    fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    fn find_by_id(&self, id: &str) -> StorageResult<User> {
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn append(&mut self, user: User) -> StorageResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(StorageError::DuplicateId(user.id));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    fn replace_by_id(&mut self, id: &str, user: User) -> StorageResult<()> {
        let index = self
            .users
            .get_index_of(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        if user.id == id {
            self.users[index] = user;
            return Ok(());
        }
        // re-keyed under the replacement's id, same position
        if self.users.contains_key(&user.id) {
            return Err(StorageError::DuplicateId(user.id));
        }
        self.users.shift_remove_index(index);
        self.users.shift_insert(index, user.id.clone(), user);
        Ok(())
    }

    fn remove_by_id(&mut self, id: &str) -> StorageResult<User> {
        self.users
            .shift_remove(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn len(&self) -> usize {
        self.users.len()
    }
}
