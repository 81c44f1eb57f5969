use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Summary of one render, printed with `--json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RenderReceipt {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Size of the encoded PNG.
    pub bytes: u64,
    /// SHA-256 of the encoded PNG, hex.
    pub sha256: String,
    pub font_fallback: bool,
    pub summarized: bool,
    pub render_duration_ms: u64,
}

impl RenderReceipt {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize render receipt")
    }
}
