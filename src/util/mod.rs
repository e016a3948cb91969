//! Utility modules

pub mod text;

pub use text::{display_width, normalize_for_match, preview, truncate_text};
