//! REST API client module for the member store.
//!
//! This module provides the `ApiClient` for logging in and for the member
//! list/create/get/delete operations, plus the `MemberStore` seam the form
//! reconciler and detail lookup are written against.
//!
//! Every member request carries the session's bearer token. A rejected token
//! surfaces as `ApiError::Unauthorized`, which callers treat as an expired
//! session.

pub mod client;
pub mod error;
pub mod store;

pub use client::{ApiClient, DEFAULT_API_BASE_URL};
pub use error::ApiError;
pub use store::{remove_member, MemberStore};
