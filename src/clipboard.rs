//! Clipboard input
//!
//! Lets the text to analyze come straight from the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::debug;

/// Get the current clipboard text
pub fn get_text() -> Result<String> {
    let mut clipboard = Clipboard::new()
        .context("Failed to access clipboard")?;
    let text = clipboard.get_text()
        .context("Failed to get clipboard text")?;
    debug!("Read {} chars from clipboard", text.chars().count());
    Ok(text)
}
