//! Authentication module for managing the login session and credentials.
//!
//! This module provides:
//! - `Session`: the bearer token from the last login, persisted between runs
//! - `CredentialStore`: optional OS-level password storage via keyring
//!
//! The session object is passed explicitly into the API client; nothing reads
//! the token from ambient storage.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{Session, SessionData};
