//! # textcard-core
//!
//! Core types shared across the textcard crates: colors, the RGB canvas,
//! render requests, the form configuration, content hashes and error types.

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod hash;
pub mod request;

pub use canvas::Canvas;
pub use color::Color;
pub use config::FormConfig;
pub use error::{TextcardError, TextcardResult};
pub use hash::{hash_bytes, hash_canvas, ContentHash};
pub use request::{
    Background, BackgroundKind, FontSource, RenderRequest, ShapeKind, ShapeSpec,
};
