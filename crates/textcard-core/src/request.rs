//! Render request value objects.
//!
//! A [`RenderRequest`] is everything the compositor needs for one image. It is
//! assembled (and validated) before rendering so the compositor never sees
//! half-filled form state.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canvas::check_dimensions;
use crate::color::Color;
use crate::error::{TextcardError, TextcardResult};

/// Default font size in points, matching the form slider's default.
pub const DEFAULT_FONT_SIZE: f32 = 30.0;
/// Largest font size a request may ask for, in pixels. The form's own slider
/// stops well below this.
pub const MAX_FONT_SIZE: f32 = 1000.0;
/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Where the text font comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontSource {
    /// The built-in fallback font.
    #[default]
    Default,
    /// A TrueType/OpenType file on disk.
    Path(PathBuf),
    /// Raw font bytes, e.g. from an upload.
    Bytes(Vec<u8>),
}

/// Background fill of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Solid(Color),
    /// Vertical gradient, `start` on the top row.
    Gradient { start: Color, end: Color },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::WHITE)
    }
}

impl Background {
    pub fn kind(&self) -> BackgroundKind {
        match self {
            Background::Solid(_) => BackgroundKind::Solid,
            Background::Gradient { .. } => BackgroundKind::Gradient,
        }
    }
}

/// The closed set of background choices offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BackgroundKind {
    #[default]
    Solid,
    Gradient,
}

impl FromStr for BackgroundKind {
    type Err = TextcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(BackgroundKind::Solid),
            "gradient" => Ok(BackgroundKind::Gradient),
            other => Err(TextcardError::InvalidArgument(format!(
                "unknown background type '{}', expected solid or gradient",
                other
            ))),
        }
    }
}

impl TryFrom<String> for BackgroundKind {
    type Error = TextcardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BackgroundKind> for String {
    fn from(kind: BackgroundKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for BackgroundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundKind::Solid => write!(f, "solid"),
            BackgroundKind::Gradient => write!(f, "gradient"),
        }
    }
}

/// The closed set of shape outlines offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ShapeKind {
    #[default]
    None,
    Circle,
    Rectangle,
}

impl FromStr for ShapeKind {
    type Err = TextcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ShapeKind::None),
            "circle" => Ok(ShapeKind::Circle),
            "rectangle" => Ok(ShapeKind::Rectangle),
            other => Err(TextcardError::InvalidArgument(format!(
                "unknown shape '{}', expected none, circle or rectangle",
                other
            ))),
        }
    }
}

impl TryFrom<String> for ShapeKind {
    type Error = TextcardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::None => write!(f, "none"),
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// Outline shape drawn on top of everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub color: Color,
}

impl Default for ShapeSpec {
    fn default() -> Self {
        Self::none()
    }
}

impl ShapeSpec {
    pub fn none() -> Self {
        Self {
            kind: ShapeKind::None,
            color: Color::RED,
        }
    }

    pub fn circle(color: Color) -> Self {
        Self {
            kind: ShapeKind::Circle,
            color,
        }
    }

    pub fn rectangle(color: Color) -> Self {
        Self {
            kind: ShapeKind::Rectangle,
            color,
        }
    }
}

/// Everything needed to render one image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub text: String,
    pub font: FontSource,
    pub font_size: f32,
    pub text_color: Color,
    pub background: Background,
    /// Encoded overlay image (PNG, JPEG, ...), stretched to the canvas size.
    pub overlay: Option<Vec<u8>>,
    pub shape: ShapeSpec,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: FontSource::Default,
            font_size: DEFAULT_FONT_SIZE,
            text_color: Color::BLACK,
            background: Background::default(),
            overlay: None,
            shape: ShapeSpec::none(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl RenderRequest {
    /// Start a request for `text` on a `width` x `height` canvas.
    pub fn new(text: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            text: text.into(),
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_font(mut self, font: FontSource, size: f32) -> Self {
        self.font = font;
        self.font_size = size;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_overlay(mut self, bytes: Vec<u8>) -> Self {
        self.overlay = Some(bytes);
        self
    }

    pub fn with_shape(mut self, shape: ShapeSpec) -> Self {
        self.shape = shape;
        self
    }

    /// Check the request can be rendered at all.
    pub fn validate(&self) -> TextcardResult<()> {
        check_dimensions(self.width, self.height)?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(TextcardError::InvalidArgument(format!(
                "font size must be a positive number, got {}",
                self.font_size
            )));
        }
        if self.font_size > MAX_FONT_SIZE {
            return Err(TextcardError::InvalidArgument(format!(
                "font size must be at most {}, got {}",
                MAX_FONT_SIZE, self.font_size
            )));
        }
        Ok(())
    }
}
