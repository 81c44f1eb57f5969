//! Text rendering module.
//! Uses fontdue for CPU-based font rasterization.
//!
//! Text is laid out on one baseline per `\n`-separated line, with no wrapping
//! and no auto-sizing. Placement works on the tight ink box of the laid-out
//! glyphs, so "centered" means the visible ink is centered.

use std::path::Path;
use std::sync::OnceLock;

use fontdue::{Font, FontSettings};
use textcard_core::{Canvas, Color, FontSource};

/// Built-in fallback font (DejaVu Sans), parsed on first use.
static DEFAULT_FONT: OnceLock<Font> = OnceLock::new();

/// Get or initialize the built-in font.
fn default_font() -> &'static Font {
    DEFAULT_FONT.get_or_init(|| {
        Font::from_bytes(
            include_bytes!("../assets/DejaVuSans.ttf") as &[u8],
            FontSettings::default(),
        )
        .expect("embedded DejaVuSans.ttf font must be valid")
    })
}

enum FontHandle {
    Builtin(&'static Font),
    Custom(Box<Font>),
}

/// A font ready for rasterizing, either the requested one or the fallback.
pub struct LoadedFont {
    handle: FontHandle,
    fallback: bool,
}

impl LoadedFont {
    /// The built-in font.
    pub fn builtin() -> Self {
        Self {
            handle: FontHandle::Builtin(default_font()),
            fallback: false,
        }
    }

    fn fallback() -> Self {
        Self {
            handle: FontHandle::Builtin(default_font()),
            fallback: true,
        }
    }

    pub fn font(&self) -> &Font {
        match &self.handle {
            FontHandle::Builtin(font) => *font,
            FontHandle::Custom(font) => font.as_ref(),
        }
    }

    /// True when the requested font could not be loaded and the built-in one
    /// stands in for it.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.handle {
            FontHandle::Builtin(_) => "builtin",
            FontHandle::Custom(_) => "custom",
        };
        f.debug_struct("LoadedFont")
            .field("kind", &kind)
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Load the requested font. Never fails: anything unreadable or unparsable
/// falls back to the built-in font.
pub fn load_font(source: &FontSource) -> LoadedFont {
    match source {
        FontSource::Default => LoadedFont::builtin(),
        FontSource::Path(path) => match read_font_file(path) {
            Ok(font) => custom(font),
            Err(e) => {
                tracing::warn!("{}; using built-in font", e);
                LoadedFont::fallback()
            }
        },
        FontSource::Bytes(bytes) => match Font::from_bytes(bytes.as_slice(), FontSettings::default()) {
            Ok(font) => custom(font),
            Err(e) => {
                tracing::warn!("failed to parse uploaded font: {}; using built-in font", e);
                LoadedFont::fallback()
            }
        },
    }
}

fn custom(font: Font) -> LoadedFont {
    LoadedFont {
        handle: FontHandle::Custom(Box::new(font)),
        fallback: false,
    }
}

fn read_font_file(path: &Path) -> Result<Font, String> {
    let data = std::fs::read(path)
        .map_err(|e| format!("failed to read font file {}: {}", path.display(), e))?;
    Font::from_bytes(data, FontSettings::default())
        .map_err(|e| format!("failed to parse font {}: {}", path.display(), e))
}

/// Tight ink box of laid-out text, relative to the first line's pen origin
/// (baseline at y = 0, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl TextBounds {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One rasterized glyph at its layout position.
#[derive(Debug, Clone)]
struct PlacedGlyph {
    x: i32,
    y: i32,
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

/// Rasterized glyphs plus their combined ink box.
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    glyphs: Vec<PlacedGlyph>,
    pub bounds: TextBounds,
}

/// Text renderer: lays out and draws text in one font at one size.
#[derive(Debug)]
pub struct TextRenderer {
    font: LoadedFont,
    font_size: f32,
}

impl TextRenderer {
    pub fn new(font: LoadedFont, font_size: f32) -> Self {
        Self { font, font_size }
    }

    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    fn line_height(&self) -> f32 {
        self.font
            .font()
            .horizontal_line_metrics(self.font_size)
            .map(|m| m.new_line_size)
            .unwrap_or(self.font_size * 1.3)
    }

    /// Rasterize `text` and compute its ink box.
    pub fn layout(&self, text: &str) -> TextLayout {
        let font = self.font.font();
        let line_height = self.line_height();

        let mut glyphs = Vec::with_capacity(text.len());
        let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
        let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);

        for (line_index, line) in text.split('\n').enumerate() {
            let baseline = (line_index as f32 * line_height).round() as i32;
            let mut pen_x: f32 = 0.0;

            for ch in line.chars() {
                let (metrics, coverage) = font.rasterize(ch, self.font_size);
                if metrics.width > 0 && metrics.height > 0 {
                    let x = pen_x.round() as i32 + metrics.xmin;
                    let y = baseline - (metrics.height as i32 + metrics.ymin);
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x + metrics.width as i32);
                    max_y = max_y.max(y + metrics.height as i32);
                    glyphs.push(PlacedGlyph {
                        x,
                        y,
                        width: metrics.width,
                        height: metrics.height,
                        coverage,
                    });
                }
                pen_x += metrics.advance_width;
            }
        }

        let bounds = if glyphs.is_empty() {
            TextBounds::default()
        } else {
            TextBounds {
                left: min_x,
                top: min_y,
                width: (max_x - min_x) as u32,
                height: (max_y - min_y) as u32,
            }
        };

        TextLayout { glyphs, bounds }
    }

    /// Width and height of the ink box of `text`.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let bounds = self.layout(text).bounds;
        (bounds.width, bounds.height)
    }

    /// Draw a laid-out text so its ink box's top-left corner lands on (x, y).
    ///
    /// Pixels falling outside the canvas are dropped; nothing is wrapped or
    /// shrunk.
    pub fn draw_layout(&self, canvas: &mut Canvas, layout: &TextLayout, color: Color, x: i32, y: i32) {
        let dx = x - layout.bounds.left;
        let dy = y - layout.bounds.top;

        for glyph in &layout.glyphs {
            for gy in 0..glyph.height {
                for gx in 0..glyph.width {
                    let coverage = glyph.coverage[gy * glyph.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    canvas.blend_pixel(
                        glyph.x + dx + gx as i32,
                        glyph.y + dy + gy as i32,
                        color,
                        coverage,
                    );
                }
            }
        }
    }

    /// Lay out and draw `text` with its ink box's top-left corner at (x, y).
    pub fn draw(&self, canvas: &mut Canvas, text: &str, color: Color, x: i32, y: i32) {
        let layout = self.layout(text);
        self.draw_layout(canvas, &layout, color, x, y);
    }
}

/// Top-left position that centers a `text_w` x `text_h` box on the canvas.
///
/// Floor division, so text wider or taller than the canvas gets a negative
/// origin and overflows evenly on both sides.
pub fn centered_origin(canvas_w: u32, canvas_h: u32, text_w: u32, text_h: u32) -> (i32, i32) {
    let x = (canvas_w as i64 - text_w as i64).div_euclid(2);
    let y = (canvas_h as i64 - text_h as i64).div_euclid(2);
    (x as i32, y as i32)
}
