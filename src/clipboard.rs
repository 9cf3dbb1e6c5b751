//! Copying selection output to the system clipboard.

use crate::error::Result;
use crate::selection::ColorSelection;

/// Put `text` on the system clipboard.
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    tracing::debug!(text, "Copied to clipboard");
    Ok(())
}

impl ColorSelection {
    /// Copy the canonical `rgba(...)` output.
    pub fn copy_output(&self) -> Result<()> {
        copy_text(&self.output())
    }

    /// Copy the current color as `#RRGGBB` / `#RRGGBBAA`.
    pub fn copy_hex(&self) -> Result<()> {
        copy_text(&format!("#{}", self.rgba().to_hex()))
    }
}
