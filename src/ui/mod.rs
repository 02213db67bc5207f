//! User interface module - terminal output for the repokit binary.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Structured document output

use anyhow::Result;
use serde::Serialize;

pub mod formatter;

pub use formatter::{
    display_error, display_success, display_version_change, format_version_change,
};

/// Prints a parsed document as pretty JSON on stdout.
pub fn display_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
