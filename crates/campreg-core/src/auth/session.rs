use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Credential returned by a successful login.
///
/// The token is opaque. There is no client-side expiry: the store rejecting
/// it is the only signal that it is no longer valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    /// Store the token was issued by; a token is never sent to another store
    pub api_base_url: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn issued_for(&self, api_base_url: &str) -> bool {
        self.api_base_url.trim_end_matches('/') == api_base_url.trim_end_matches('/')
    }
}

pub struct Session {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load session from disk
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read session file")?;
            let data: SessionData = serde_json::from_str(&contents)
                .context("Failed to parse session file")?;
            self.data = Some(data);
            return Ok(true);
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Forget the session, in memory and on disk (logout or expired token)
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    pub fn username(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.username.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.data.is_some()
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionData {
        SessionData {
            token: "abc.def".to_string(),
            username: "admin".to_string(),
            api_base_url: "http://localhost:5000/api".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().join("campreg"));
        assert!(!session.load().unwrap());

        session.update(sample());
        session.save().unwrap();

        let mut reloaded = Session::new(dir.path().join("campreg"));
        assert!(reloaded.load().unwrap());
        assert_eq!(reloaded.data.as_ref().map(|d| d.token.as_str()), Some("abc.def"));
        assert_eq!(reloaded.username(), Some("admin"));

        reloaded.clear().unwrap();
        assert!(!reloaded.is_active());
        let mut again = Session::new(dir.path().join("campreg"));
        assert!(!again.load().unwrap());
    }

    #[test]
    fn test_corrupt_session_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        let mut session = Session::new(dir.path().to_path_buf());
        assert!(session.load().is_err());
        assert!(!session.is_active());
    }

    #[test]
    fn test_issued_for_ignores_trailing_slash() {
        let data = sample();
        assert!(data.issued_for("http://localhost:5000/api/"));
        assert!(!data.issued_for("http://example.org/api"));
    }
}
