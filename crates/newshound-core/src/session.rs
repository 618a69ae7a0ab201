//! Durable session identity.
//!
//! [`SessionStore`] abstracts where the id lives (a file under the data
//! directory in production); [`SessionIdentity`] layers generation,
//! validation, and an in-process cache on top. Two processes racing on
//! the same store is last-writer-wins -- there is no cross-process
//! coordination.

use newshound_types::error::SessionStoreError;
use newshound_types::session::SessionId;
use tracing::debug;

/// Persistence seam for the session id.
///
/// Implementations live in newshound-infra (e.g., `FileSessionStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SessionStore: Send + Sync {
    /// Load the persisted raw id, if any. Absence is `None`, not an error.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<String>, SessionStoreError>> + Send;

    /// Persist the id, replacing any previous value.
    fn save(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;
}

/// Owns the current session id for one client process.
///
/// Wraps a [`SessionStore`] with an in-process cache so repeated
/// [`obtain_or_create`](Self::obtain_or_create) calls return the same id
/// without re-reading storage.
pub struct SessionIdentity<S: SessionStore> {
    store: S,
    current: Option<SessionId>,
}

impl<S: SessionStore> SessionIdentity<S> {
    /// Create an identity handle over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// The cached id, if one has been obtained this process.
    pub fn current(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    /// Return the persisted id, minting and persisting a fresh one when
    /// the stored value is missing or fails the structural check.
    ///
    /// The replacement is persisted before it is returned, so a generated
    /// id is never handed out without being durable.
    pub async fn obtain_or_create(&mut self) -> Result<SessionId, SessionStoreError> {
        if let Some(id) = &self.current {
            return Ok(id.clone());
        }

        if let Some(raw) = self.store.load().await? {
            match raw.parse::<SessionId>() {
                Ok(id) => {
                    self.current = Some(id.clone());
                    return Ok(id);
                }
                Err(err) => {
                    debug!(%err, "stored session id failed validation, regenerating");
                }
            }
        }

        let id = SessionId::generate();
        self.store.save(&id).await?;
        self.current = Some(id.clone());
        Ok(id)
    }

    /// Unconditionally mint and persist a new id, discarding the old one.
    ///
    /// On a persistence failure the previous id stays current.
    pub async fn reset(&mut self) -> Result<SessionId, SessionStoreError> {
        let id = SessionId::generate();
        self.store.save(&id).await?;
        self.current = Some(id.clone());
        Ok(id)
    }
}
