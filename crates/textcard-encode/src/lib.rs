//! # textcard-encode
//!
//! Encoding module. Turns finished canvases into PNG bytes, in memory or on
//! disk, and packages them for download.

pub mod download;
pub mod encoder;

pub use download::Download;
pub use encoder::{encode_png, write_png, PNG_MIME};
