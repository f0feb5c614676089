//! Flat-file credential store.
//!
//! Usernames map to Argon2 PHC hash strings in a single JSON object. The
//! whole mapping is read on every operation and rewritten wholesale on every
//! save, guarded by an advisory lock and an atomic temp-then-rename so a
//! crashed writer cannot truncate the store.

use crate::error::{Error, Result};
use crate::locking::FileLock;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Credential store backed by a single JSON file.
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Create a store over the given users file. The file itself is created
    /// lazily on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the underlying users file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full credential mapping.
    ///
    /// Returns an empty mapping if the file does not exist yet. A malformed
    /// file fails the whole operation; there is no partial-read recovery.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| Error::UserStoreRead {
            path: self.path.clone(),
            source: e,
        })?;

        serde_json::from_str(&contents).map_err(|e| Error::UserStoreParse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Insert or overwrite the entry for `username` with a salted hash of
    /// `password`, then rewrite the whole store.
    ///
    /// The rewrite holds an advisory lock and goes through a temp file in the
    /// same directory followed by a rename, so concurrent cooperating writers
    /// on this host serialize and a crash mid-write leaves the old store
    /// intact. Last write still wins between hosts.
    pub fn save(&self, username: &str, password: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::UserStoreWrite {
                path: self.path.clone(),
                source: e,
            })?;
        }

        let _lock = FileLock::acquire(&self.path)?;

        let mut users = self.load()?;
        users.insert(username.to_string(), hash_password(password)?);

        let json = serde_json::to_string_pretty(&users).map_err(|e| Error::UserStoreParse {
            path: self.path.clone(),
            source: e,
        })?;

        let tmp_path = self.temp_path();
        std::fs::write(&tmp_path, json).map_err(|e| Error::UserStoreWrite {
            path: tmp_path.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| Error::UserStoreWrite {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(user = %username, store = %self.path.display(), "credential saved");
        Ok(())
    }

    /// Verify `password` against the stored hash for `username`.
    ///
    /// Returns `false` for an unknown username or a non-matching password.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let users = self.load()?;
        let Some(stored) = users.get(username) else {
            return Ok(false);
        };
        verify_password(password, stored)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("users.json")
            .to_string();
        name.push_str(".tmp");
        self.path.with_file_name(name)
    }
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// The result is a PHC string that embeds the salt and cost parameters, so
/// verification needs no side channel.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash {
            reason: e.to_string(),
        })
}

/// Verify a password against a stored PHC hash string.
///
/// A hash that does not parse is a storage error, not a failed login.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| Error::PasswordHash {
        reason: e.to_string(),
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_verify_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path().join("users.json"));

        store.save("alice", "pw1").unwrap();
        assert!(store.verify("alice", "pw1").unwrap());
        assert!(!store.verify("alice", "pw2").unwrap());
    }

    #[test]
    fn test_verify_unknown_user_is_false_not_error() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path().join("users.json"));

        assert!(!store.verify("nobody", "pw").unwrap());
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path().join("users.json"));

        let users = store.load().unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_load_malformed_store_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = UserStore::new(&path);
        assert!(matches!(store.load(), Err(Error::UserStoreParse { .. })));
    }

    #[test]
    fn test_save_overwrites_existing_entry() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path().join("users.json"));

        store.save("alice", "old").unwrap();
        store.save("alice", "new").unwrap();

        assert!(!store.verify("alice", "old").unwrap());
        assert!(store.verify("alice", "new").unwrap());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_stored_hash_is_not_plaintext() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path().join("users.json"));

        store.save("alice", "pw1").unwrap();
        let users = store.load().unwrap();
        let hash = users.get("alice").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("pw1"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let h1 = hash_password("pw").unwrap();
        let h2 = hash_password("pw").unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password("pw", &h1).unwrap());
        assert!(verify_password("pw", &h2).unwrap());
    }

    #[test]
    fn test_no_lock_or_temp_left_behind_after_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let store = UserStore::new(&path);

        store.save("alice", "pw1").unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n != "users.json")
            .collect();
        assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
    }
}
