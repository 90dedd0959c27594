//! Bearer-token storage.
//!
//! The token is the only durable session state the client holds. The
//! [`TokenStore`] trait keeps call sites independent of where it lives:
//! production uses [`FileTokenStore`], tests use [`MemoryTokenStore`].
//!
//! Store semantics are deliberately forgiving: `set` ignores empty tokens,
//! and a store whose backing medium is unusable degrades to a no-op instead
//! of failing the operation that touched it.

use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

/// Durable storage for the single bearer token.
///
/// Implementations must never panic; an unusable backing medium reads as
/// "no session".
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any.
    fn get(&self) -> Option<String>;

    /// Persist the token. Empty tokens are ignored.
    fn set(&self, token: &str);

    /// Remove any stored token.
    fn clear(&self);
}

/// File-backed token store.
///
/// The token is written as the file's entire contents. Filesystem errors
/// are logged and swallowed - a broken token path must not block login or
/// logout, it just means the session will not survive the process.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by the given path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_owned())
                }
            }
            Err(_) => None,
        }
    }

    fn set(&self, token: &str) {
        if token.is_empty() {
            return;
        }
        if let Some(parent) = self.path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            debug!(path = %self.path.display(), error = %e, "token dir not writable");
            return;
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            debug!(path = %self.path.display(), error = %e, "token not persisted");
        }
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            debug!(path = %self.path.display(), error = %e, "token not removed");
        }
    }
}

/// In-memory token store for tests and short-lived embeddings.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, token: &str) {
        if token.is_empty() {
            return;
        }
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join("userdeck-tests")
            .join(format!("token-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);

        store.set("abc123");
        assert_eq!(store.get(), Some("abc123".to_owned()));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_memory_ignores_empty_token() {
        let store = MemoryTokenStore::with_token("abc123");
        store.set("");
        assert_eq!(store.get(), Some("abc123".to_owned()));
    }

    #[test]
    fn test_file_round_trip() {
        let path = scratch_path();
        let store = FileTokenStore::new(path.clone());

        assert_eq!(store.get(), None);

        store.set("file-token");
        assert_eq!(store.get(), Some("file-token".to_owned()));

        store.clear();
        assert_eq!(store.get(), None);

        // Clearing twice is fine.
        store.clear();
        let _ = std::fs::remove_dir_all(path.parent().unwrap_or(&path));
    }

    #[test]
    fn test_file_ignores_empty_token() {
        let path = scratch_path();
        let store = FileTokenStore::new(path);
        store.set("");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_unusable_path_degrades_to_noop() {
        // A directory that cannot exist as a file parent.
        let store = FileTokenStore::new(PathBuf::from("/dev/null/nope/token"));
        store.set("abc");
        assert_eq!(store.get(), None);
        store.clear();
    }
}
