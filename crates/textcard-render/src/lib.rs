//! # textcard-render
//!
//! The textcard compositor. Takes a validated render request and produces an
//! RGB canvas: gradient or solid background, optional overlay, centered text
//! and an optional shape outline. CPU-only and single-threaded.

pub mod compositor;
pub mod gradient;
pub mod overlay;
pub mod shape;
pub mod text;

pub use compositor::{render, Compositor, RenderOutput};
pub use gradient::create_gradient;
pub use text::{load_font, LoadedFont, TextRenderer};
