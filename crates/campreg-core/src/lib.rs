//! Core library for campreg: camp registration records, the registration
//! form, summary statistics and the client for the remote member store.
//!
//! The terminal interface lives in the `campreg-tui` crate; everything here
//! is UI-independent.

pub mod api;
pub mod auth;
pub mod config;
pub mod detail;
pub mod filter;
pub mod form;
pub mod models;
pub mod print;
pub mod stats;
pub mod utils;

pub use api::{ApiClient, ApiError, MemberStore};
pub use config::Config;
pub use detail::{DetailLookup, DetailTicket, Resolution};
pub use form::{Field, FormError, FormReconciler, RenderMode};
pub use models::{MemberId, MemberRecord, Numeric};
pub use stats::{summarize, summarize_with, MissingValuePolicy, Summary};
