//! Session state
//!
//! The bearer token lives in memory and in durable storage. Durable storage
//! is the source of truth: [`Session::reconcile`] runs before every dispatch
//! and adopts the stored value whenever the two diverge.

use std::sync::Arc;
use tokio::sync::RwLock;

use shared::client::UserInfo;

use crate::ClientResult;
use crate::storage::{AUTH_TOKEN_KEY, KeyValueStore, KeyValueStoreExt, USER_INFO_KEY};

/// Authentication session
#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session, populated from durable storage if a token is stored
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let token = match store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        };
        Self {
            token: Arc::new(RwLock::new(token)),
            store,
        }
    }

    /// In-memory token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Re-read durable storage; the stored value wins on divergence
    pub async fn reconcile(&self) -> ClientResult<Option<String>> {
        let stored = self.store.get(AUTH_TOKEN_KEY)?.filter(|t| !t.is_empty());
        let mut guard = self.token.write().await;
        if *guard != stored {
            tracing::debug!(
                had_token = guard.is_some(),
                has_token = stored.is_some(),
                "Session reconciled from storage"
            );
            *guard = stored.clone();
        }
        Ok(stored)
    }

    /// Replace the token in memory and durable storage
    pub async fn set_token(&self, token: impl Into<String>) -> ClientResult<()> {
        let token = token.into();
        let mut guard = self.token.write().await;
        self.store.set(AUTH_TOKEN_KEY, &token)?;
        *guard = Some(token);
        Ok(())
    }

    /// Drop the token and the cached user profile
    pub async fn clear(&self) -> ClientResult<()> {
        let mut guard = self.token.write().await;
        *guard = None;
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_INFO_KEY)?;
        Ok(())
    }

    /// Cached profile of the signed-in user
    pub fn user_info(&self) -> ClientResult<Option<UserInfo>> {
        self.store.get_json(USER_INFO_KEY)
    }

    pub fn set_user_info(&self, info: &UserInfo) -> ClientResult<()> {
        self.store.set_json(USER_INFO_KEY, info)
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_new_reads_stored_token() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(AUTH_TOKEN_KEY, "stored").unwrap();

        let session = Session::new(store);
        assert_eq!(session.token().await.as_deref(), Some("stored"));
    }

    #[tokio::test]
    async fn test_reconcile_storage_wins() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());
        session.set_token("memory").await.unwrap();

        // Another tab signed out
        store.remove(AUTH_TOKEN_KEY).unwrap();
        assert_eq!(session.reconcile().await.unwrap(), None);
        assert!(!session.is_authenticated().await);

        // And another signed in
        store.set(AUTH_TOKEN_KEY, "other").unwrap();
        session.reconcile().await.unwrap();
        assert_eq!(session.token().await.as_deref(), Some("other"));
    }

    #[tokio::test]
    async fn test_clear_removes_user_info() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());
        session.set_token("t").await.unwrap();
        store.set(USER_INFO_KEY, "{}").unwrap();

        session.clear().await.unwrap();
        assert!(store.get(AUTH_TOKEN_KEY).unwrap().is_none());
        assert!(store.get(USER_INFO_KEY).unwrap().is_none());
    }
}
