//! Mock world state
//!
//! Users and departments are durable stores kept in the client's key-value
//! storage. Each read-modify-write holds the store's async mutex for its whole
//! duration so concurrent tasks cannot interleave.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;

use shared::client::UserInfo;
use shared::error::{AppError, AppResult};
use shared::models::{Department, User};

use super::seed;
use crate::ClientError;
use crate::storage::{
    KeyValueStore, KeyValueStoreExt, MOCK_DEPARTMENTS_KEY, MOCK_USERS_KEY, USER_INFO_KEY,
};

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::storage(err.to_string())
    }
}

/// Shared state of the mock router
pub struct MockState {
    store: Arc<dyn KeyValueStore>,
    users_lock: Mutex<()>,
    departments_lock: Mutex<()>,
}

impl MockState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            users_lock: Mutex::new(()),
            departments_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Load a collection, seeding it when absent, empty or undecodable
    fn load_or_seed<T>(&self, key: &str, seed: fn() -> Vec<T>) -> AppResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        match self.store.get_json::<Vec<T>>(key)? {
            Some(items) if !items.is_empty() => Ok(items),
            _ => {
                let items = seed();
                self.store.set_json(key, &items)?;
                tracing::debug!(key, count = items.len(), "Seeded mock store");
                Ok(items)
            }
        }
    }

    /// Snapshot of the user store
    pub async fn users(&self) -> AppResult<Vec<User>> {
        let _guard = self.users_lock.lock().await;
        self.load_or_seed(MOCK_USERS_KEY, seed::users)
    }

    /// Read-modify-write of the user store. Nothing is written when `f` fails.
    pub async fn update_users<R>(
        &self,
        f: impl FnOnce(&mut Vec<User>) -> AppResult<R>,
    ) -> AppResult<R> {
        let _guard = self.users_lock.lock().await;
        let mut users = self.load_or_seed(MOCK_USERS_KEY, seed::users)?;
        let result = f(&mut users)?;
        self.store.set_json(MOCK_USERS_KEY, &users)?;
        Ok(result)
    }

    pub async fn departments(&self) -> AppResult<Vec<Department>> {
        let _guard = self.departments_lock.lock().await;
        self.load_or_seed(MOCK_DEPARTMENTS_KEY, seed::departments)
    }

    pub async fn update_departments<R>(
        &self,
        f: impl FnOnce(&mut Vec<Department>) -> AppResult<R>,
    ) -> AppResult<R> {
        let _guard = self.departments_lock.lock().await;
        let mut departments = self.load_or_seed(MOCK_DEPARTMENTS_KEY, seed::departments)?;
        let result = f(&mut departments)?;
        self.store.set_json(MOCK_DEPARTMENTS_KEY, &departments)?;
        Ok(result)
    }

    pub fn cached_user_info(&self) -> AppResult<Option<UserInfo>> {
        Ok(self.store.get_json(USER_INFO_KEY)?)
    }

    pub fn cache_user_info(&self, info: &UserInfo) -> AppResult<()> {
        Ok(self.store.set_json(USER_INFO_KEY, info)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use shared::error::ErrorCode;

    #[tokio::test]
    async fn test_lazy_seed() {
        let store = Arc::new(MemoryStore::new());
        let state = MockState::new(store.clone());
        assert!(store.is_empty());

        let users = state.users().await.unwrap();
        assert_eq!(users.len(), 4);
        assert!(store.get(MOCK_USERS_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let state = MockState::new(store.clone());

        let result: AppResult<()> = state
            .update_users(|users| {
                users.clear();
                Err(AppError::new(ErrorCode::UserNotFound))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(state.users().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_store_is_reseeded() {
        let store = Arc::new(MemoryStore::new());
        store.set(MOCK_DEPARTMENTS_KEY, "[]").unwrap();
        let state = MockState::new(store);
        assert_eq!(state.departments().await.unwrap().len(), 3);
    }
}
