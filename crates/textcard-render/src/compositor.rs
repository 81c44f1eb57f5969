//! The compositor: one render request in, one finished canvas out.
//!
//! Layers are always applied in the same order: background, overlay, text,
//! shape outline. Each render allocates its own canvas and shares nothing with
//! other renders.

use std::time::Instant;

use textcard_core::{Background, Canvas, RenderRequest, TextcardResult};

use crate::gradient::create_gradient;
use crate::overlay::{decode_overlay, fit_overlay};
use crate::shape::{draw_shape, OUTLINE_WIDTH};
use crate::text::{centered_origin, load_font, TextRenderer};

/// Output of a render: the canvas plus what happened along the way.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub canvas: Canvas,
    /// The requested font could not be loaded and the built-in one was used.
    pub font_fallback: bool,
}

/// Stateless compositor.
#[derive(Debug, Clone)]
pub struct Compositor {
    outline_width: u32,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            outline_width: OUTLINE_WIDTH,
        }
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outline_width(mut self, width: u32) -> Self {
        self.outline_width = width;
        self
    }

    /// Render `request` into a fresh canvas.
    pub fn render(&self, request: &RenderRequest) -> TextcardResult<Canvas> {
        self.render_with_report(request).map(|out| out.canvas)
    }

    /// Like [`Compositor::render`], also reporting whether the font fell back.
    pub fn render_with_report(&self, request: &RenderRequest) -> TextcardResult<RenderOutput> {
        request.validate()?;
        let start = Instant::now();
        let (width, height) = (request.width, request.height);

        // 1. Background
        let mut canvas = match request.background {
            Background::Solid(color) => Canvas::solid(width, height, color)?,
            Background::Gradient { start, end } => create_gradient(width, height, start, end)?,
        };
        tracing::debug!("background {:?} filled", request.background.kind());

        // 2. Overlay
        if let Some(bytes) = &request.overlay {
            let img = decode_overlay(bytes)?;
            tracing::debug!(
                "overlay {}x{} stretched to {}x{}",
                img.width(),
                img.height(),
                width,
                height
            );
            let fitted = fit_overlay(&img, width, height);
            canvas.paste_rgba(fitted.as_raw(), width, height)?;
        }

        // 3. Text
        let renderer = TextRenderer::new(load_font(&request.font), request.font_size);
        let layout = renderer.layout(&request.text);
        if !layout.bounds.is_empty() {
            let (x, y) = centered_origin(width, height, layout.bounds.width, layout.bounds.height);
            tracing::debug!(
                "text box {}x{} drawn at ({}, {})",
                layout.bounds.width,
                layout.bounds.height,
                x,
                y
            );
            renderer.draw_layout(&mut canvas, &layout, request.text_color, x, y);
        }

        // 4. Shape
        draw_shape(&mut canvas, &request.shape, self.outline_width);

        tracing::info!(
            "Rendered {}x{} canvas in {:.2}ms",
            width,
            height,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(RenderOutput {
            canvas,
            font_fallback: renderer.font().is_fallback(),
        })
    }
}

/// Render a request with the default compositor.
pub fn render(request: &RenderRequest) -> TextcardResult<Canvas> {
    Compositor::default().render(request)
}
