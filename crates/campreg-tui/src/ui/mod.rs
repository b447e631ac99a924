//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering, overlays and popups
//! - `input`: Keyboard event handling
//! - `styles`: Color scheme and text styling
//! - `tabs`: Per-tab content (members, register, dashboard)

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
