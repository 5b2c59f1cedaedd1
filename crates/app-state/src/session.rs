//! Session persistence and the current-user context
//!
//! The signed-in user is persisted as a single JSON document under
//! [`USER_DATA_KEY`]. [`SessionContext`] owns the in-memory copy and
//! publishes every change to subscribers.

use archive_client::{UserPatch, UserRecord};
use async_trait::async_trait;
use std::sync::Arc;
use storage::{KvError, KvStore};
use tokio::sync::watch;

/// Storage key holding the persisted user document
pub const USER_DATA_KEY: &str = "userData";

/// Session-related errors
#[derive(Debug, thiserror::Error)]
pub enum SessionStateError {
    /// Underlying storage failed
    #[error("Storage error")]
    Storage(#[from] KvError),

    /// An operation needed a signed-in user
    #[error("No current session")]
    NoCurrentSession,
}

/// Result type for session state operations
pub type Result<T> = std::result::Result<T, SessionStateError>;

/// Persistent backing for the session document
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted user, if any
    async fn load(&self) -> Result<Option<UserRecord>>;

    /// Persist the user, replacing any previous document
    async fn save(&self, user: &UserRecord) -> Result<()>;

    /// Remove the persisted user
    async fn clear(&self) -> Result<()>;
}

/// [`SessionStore`] backed by the device key-value store
#[derive(Clone)]
pub struct KvSessionStore {
    kv: KvStore,
}

impl KvSessionStore {
    /// Wrap an open key-value store
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl SessionStore for KvSessionStore {
    async fn load(&self) -> Result<Option<UserRecord>> {
        match self.kv.get(USER_DATA_KEY) {
            Ok(user) => Ok(user),
            Err(KvError::Serialization(e)) => {
                tracing::warn!(error = %e, "discarding unreadable session document");
                self.kv.remove(USER_DATA_KEY)?;
                self.kv.flush()?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, user: &UserRecord) -> Result<()> {
        self.kv.set(USER_DATA_KEY, user)?;
        self.kv.flush()?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.kv.remove(USER_DATA_KEY)?;
        self.kv.flush()?;
        Ok(())
    }
}

/// Current-user context shared by every screen
///
/// Storage is written before the in-memory copy changes, so subscribers
/// never see a user that failed to persist.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current_tx: watch::Sender<Option<UserRecord>>,
}

impl SessionContext {
    /// Create a context with no user loaded
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (current_tx, _) = watch::channel(None);
        Self { store, current_tx }
    }

    /// Reload the user from storage and publish it
    pub async fn load(&self) -> Result<Option<UserRecord>> {
        let user = self.store.load().await?;
        tracing::debug!(signed_in = user.is_some(), "session loaded");
        self.current_tx.send_replace(user.clone());
        Ok(user)
    }

    /// Persist `user` as the signed-in user
    pub async fn save(&self, user: UserRecord) -> Result<()> {
        self.store.save(&user).await?;
        tracing::info!(id_number = %user.id_number, "session saved");
        self.current_tx.send_replace(Some(user));
        Ok(())
    }

    /// Merge `patch` into the signed-in user and persist the result
    pub async fn update(&self, patch: UserPatch) -> Result<UserRecord> {
        let mut user = self.current().ok_or(SessionStateError::NoCurrentSession)?;
        user.apply(patch);
        self.save(user.clone()).await?;
        Ok(user)
    }

    /// Sign out: remove the persisted user
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;
        tracing::info!("session cleared");
        self.current_tx.send_replace(None);
        Ok(())
    }

    /// The signed-in user, if any
    pub fn current(&self) -> Option<UserRecord> {
        self.current_tx.borrow().clone()
    }

    /// Whether a user is signed in
    pub fn is_signed_in(&self) -> bool {
        self.current_tx.borrow().is_some()
    }

    /// Watch the signed-in user
    pub fn subscribe(&self) -> watch::Receiver<Option<UserRecord>> {
        self.current_tx.subscribe()
    }
}
