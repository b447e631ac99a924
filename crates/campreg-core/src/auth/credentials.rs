use anyhow::{Context, Result};
use keyring::Entry;

/// Keychain service the passwords are filed under
const KEYCHAIN_SERVICE: &str = "campreg";

/// Passwords remembered in the OS keychain, keyed by username.
///
/// Only the password lives here; the bearer token is kept in the session
/// file and the username in the config.
pub struct CredentialStore;

impl CredentialStore {
    fn entry(username: &str) -> Result<Entry> {
        Entry::new(KEYCHAIN_SERVICE, username)
            .with_context(|| format!("Failed to open keychain entry for '{}'", username))
    }

    /// Remember the password after a successful login
    pub fn store(username: &str, password: &str) -> Result<()> {
        Self::entry(username)?
            .set_password(password)
            .context("Failed to store password in keychain")
    }

    pub fn get_password(username: &str) -> Result<String> {
        Self::entry(username)?
            .get_password()
            .context("No remembered password in keychain")
    }

    /// Drop the remembered password; a missing entry is not an error
    pub fn forget(username: &str) -> Result<()> {
        match Self::entry(username)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to remove password from keychain"),
        }
    }
}
