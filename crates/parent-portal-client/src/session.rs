//! Session persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use parent_portal_models::User;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// What gets persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

/// Storage backend for a [`SessionContext`].
pub trait SessionStore {
    fn load(&self) -> ClientResult<Option<StoredSession>>;
    fn save(&self, session: &StoredSession) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// Keeps the session in a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<StoredSession>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::Storage(e)),
        };

        // A corrupt file is treated as signed out.
        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e)),
        }
    }
}

/// Keeps the session in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<StoredSession>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<StoredSession>> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// The signed-in state of one client: token plus cached profile, mirrored to
/// a [`SessionStore`].
#[derive(Debug)]
pub struct SessionContext<S: SessionStore> {
    store: S,
    current: Option<StoredSession>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Restores whatever the store holds.
    pub fn init(store: S) -> ClientResult<Self> {
        let current = store.load()?;
        Ok(Self { store, current })
    }

    pub fn establish(&mut self, token: String, user: User) -> ClientResult<()> {
        let session = StoredSession { token, user };
        self.store.save(&session)?;
        self.current = Some(session);
        Ok(())
    }

    /// Replaces the cached profile, keeping the token. The in-memory session
    /// is left untouched when the store rejects the write.
    pub fn refresh_user(&mut self, user: User) -> ClientResult<()> {
        let token = self.token().ok_or(ClientError::NotAuthenticated)?.to_string();
        self.establish(token, user)
    }

    pub fn clear(&mut self) -> ClientResult<()> {
        self.current = None;
        self.store.clear()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::Utc;
    use parent_portal_core::Role;
    use uuid::Uuid;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: "parent@example.com".to_string(),
            phone: "5550300000".to_string(),
            role: Role::Parent,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("parent-portal-session-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_memory_lifecycle() {
        let mut session = SessionContext::init(MemorySessionStore::new()).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());

        session.establish("abc".to_string(), user("John Parent")).unwrap();
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user().unwrap().name, "John Parent");
        assert!(session.store().load().unwrap().is_some());

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.store().load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_survives_restart() {
        let path = temp_path();
        let profile = user("John Parent");

        {
            let mut session = SessionContext::init(FileSessionStore::new(&path)).unwrap();
            session.establish("abc".to_string(), profile.clone()).unwrap();
        }

        let session = SessionContext::init(FileSessionStore::new(&path)).unwrap();
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user(), Some(&profile));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let path = temp_path();
        let mut session = SessionContext::init(FileSessionStore::new(&path)).unwrap();
        session.establish("abc".to_string(), user("John Parent")).unwrap();
        assert!(path.exists());

        session.clear().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine.
        session.clear().unwrap();
    }

    #[test]
    fn test_missing_or_corrupt_file_means_signed_out() {
        let path = temp_path();
        assert!(FileSessionStore::new(&path).load().unwrap().is_none());

        fs::write(&path, "{not json").unwrap();
        let session = SessionContext::init(FileSessionStore::new(&path)).unwrap();
        assert!(!session.is_authenticated());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_refresh_user_keeps_token() {
        let mut session = SessionContext::init(MemorySessionStore::new()).unwrap();
        assert!(matches!(
            session.refresh_user(user("Nobody")),
            Err(ClientError::NotAuthenticated)
        ));

        session.establish("abc".to_string(), user("John Parent")).unwrap();
        session.refresh_user(user("John P. Parent")).unwrap();
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user().unwrap().name, "John P. Parent");
    }

    /// Accepts writes until `fail` is set.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemorySessionStore,
        fail: AtomicBool,
    }

    impl SessionStore for FlakyStore {
        fn load(&self) -> ClientResult<Option<StoredSession>> {
            self.inner.load()
        }

        fn save(&self, session: &StoredSession) -> ClientResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ClientError::Storage(std::io::Error::other("disk full")));
            }
            self.inner.save(session)
        }

        fn clear(&self) -> ClientResult<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn test_failed_refresh_keeps_session() {
        let mut session = SessionContext::init(FlakyStore::default()).unwrap();
        session.establish("abc".to_string(), user("John Parent")).unwrap();

        session.store().fail.store(true, Ordering::SeqCst);
        assert!(matches!(
            session.refresh_user(user("John P. Parent")),
            Err(ClientError::Storage(_))
        ));

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user().unwrap().name, "John Parent");
    }
}
