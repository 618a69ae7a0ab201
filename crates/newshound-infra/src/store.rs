//! File-backed session identity storage.
//!
//! The browser build of this client kept the session id in
//! `localStorage`; here it lives in a plain-text file under the data
//! directory so the id survives restarts the same way.

use std::path::{Path, PathBuf};

use newshound_core::session::SessionStore;
use newshound_types::error::SessionStoreError;
use newshound_types::session::SessionId;

/// Stores the session id at `{data_dir}/session`.
///
/// The file holds the raw id and nothing else. Validation happens in
/// `SessionIdentity`, so a hand-edited or corrupt file is regenerated
/// rather than rejected here.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session"),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<String>, SessionStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw.trim().to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SessionStoreError::Unavailable(err.to_string())),
        }
    }

    async fn save(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| SessionStoreError::Unavailable(err.to_string()))?;
        }
        tokio::fs::write(&self.path, id.as_str())
            .await
            .map_err(|err| SessionStoreError::Unavailable(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let id: SessionId = "sess_1700000000000_abcd1234".parse().unwrap();

        store.save(&id).await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn save_creates_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("deep").join("newshound");
        let store = FileSessionStore::new(&nested);
        let id: SessionId = "sess_1700000000000_abcd1234".parse().unwrap();

        store.save(&id).await.unwrap();
        assert!(nested.join("session").exists());
    }

    #[tokio::test]
    async fn unreadable_path_surfaces_unavailable() {
        // A directory where the file should be fails the read with
        // something other than NotFound.
        let dir = tempdir().unwrap();
        tokio::fs::create_dir(dir.path().join("session")).await.unwrap();

        let store = FileSessionStore::new(dir.path());
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, SessionStoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn load_trims_trailing_newline() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("session"), "sess_1700000000000_abcd1234\n")
            .await
            .unwrap();

        let store = FileSessionStore::new(dir.path());
        assert_eq!(
            store.load().await.unwrap().as_deref(),
            Some("sess_1700000000000_abcd1234")
        );
    }
}
