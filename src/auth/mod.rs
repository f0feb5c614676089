//! Authentication against the flat-file credential store.

mod store;

pub use store::{UserStore, hash_password, verify_password};

use crate::error::{Error, Result};
use tracing::info;

/// Basic input sanitation shared by signup and login.
///
/// Rejects empty input and control characters that would corrupt log lines
/// or the JSON store keys.
fn is_valid_input(input: &str) -> bool {
    !input.trim().is_empty() && !input.contains(['\r', '\n', '\0'])
}

/// Thin signup/login wrapper over [`UserStore`].
pub struct Authenticator {
    store: UserStore,
}

impl Authenticator {
    /// Create an authenticator over the given store.
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Create an account.
    ///
    /// There is no duplicate check and no password-strength policy; an
    /// existing entry for the same username is overwritten.
    pub fn signup(&self, username: &str, password: &str) -> Result<()> {
        if !is_valid_input(username) {
            return Err(Error::CredentialInput {
                message: "username must not be empty".to_string(),
            });
        }
        if !is_valid_input(password) {
            return Err(Error::CredentialInput {
                message: "password must not be empty".to_string(),
            });
        }

        self.store.save(username.trim(), password)?;
        info!(user = %username.trim(), "account created");
        Ok(())
    }

    /// Check credentials.
    ///
    /// Wrong username and wrong password are both a clean `false`; only
    /// storage failures surface as errors.
    pub fn login(&self, username: &str, password: &str) -> Result<bool> {
        if !is_valid_input(username) || !is_valid_input(password) {
            return Ok(false);
        }
        self.store.verify(username.trim(), password)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn authenticator(dir: &TempDir) -> Authenticator {
        Authenticator::new(UserStore::new(dir.path().join("users.json")))
    }

    #[test]
    fn test_signup_then_login() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator(&dir);

        auth.signup("alice", "pw1").unwrap();
        assert!(auth.login("alice", "pw1").unwrap());
        assert!(!auth.login("alice", "wrong").unwrap());
        assert!(!auth.login("bob", "pw1").unwrap());
    }

    #[test]
    fn test_signup_rejects_empty_username() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator(&dir);

        let result = auth.signup("   ", "pw1");
        assert!(matches!(result, Err(Error::CredentialInput { .. })));
    }

    #[test]
    fn test_signup_rejects_empty_password() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator(&dir);

        let result = auth.signup("alice", "");
        assert!(matches!(result, Err(Error::CredentialInput { .. })));
    }

    #[test]
    fn test_login_empty_input_is_false() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator(&dir);

        assert!(!auth.login("", "pw").unwrap());
        assert!(!auth.login("alice", "").unwrap());
    }

    #[test]
    fn test_signup_trims_username() {
        let dir = TempDir::new().unwrap();
        let auth = authenticator(&dir);

        auth.signup("  alice  ", "pw1").unwrap();
        assert!(auth.login("alice", "pw1").unwrap());
    }
}
