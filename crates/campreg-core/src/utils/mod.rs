//! Utility functions for string formatting and manipulation.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    contains_ignore_case, format_currency, format_date, format_optional, format_phone,
    format_stored_currency, truncate_string, NOT_AVAILABLE,
};
