//! Download descriptor handed to whatever offers the image to the user.

use textcard_core::config::DEFAULT_OUTPUT_FILE_NAME;
use textcard_core::{Canvas, TextcardResult};

use crate::encoder::{encode_png, PNG_MIME};

/// An encoded image plus the name and MIME type it is offered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Encode `canvas` as PNG under `file_name`.
    pub fn png(canvas: &Canvas, file_name: impl Into<String>) -> TextcardResult<Self> {
        Ok(Self {
            file_name: file_name.into(),
            mime: PNG_MIME,
            bytes: encode_png(canvas)?.into_inner(),
        })
    }

    /// Encode `canvas` as PNG under the default file name.
    pub fn png_default(canvas: &Canvas) -> TextcardResult<Self> {
        Self::png(canvas, DEFAULT_OUTPUT_FILE_NAME)
    }
}
