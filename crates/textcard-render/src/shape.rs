//! Unfilled shape outlines drawn over the finished text.

use textcard_core::{Canvas, Color, ShapeKind, ShapeSpec};

/// Outline thickness in pixels.
pub const OUTLINE_WIDTH: u32 = 5;

/// The centered box shapes are drawn in: `(w/4, h/4)` to `(3w/4, 3h/4)`,
/// corners inclusive.
pub fn outline_box(width: u32, height: u32) -> (u32, u32, u32, u32) {
    (width / 4, height / 4, 3 * width / 4, 3 * height / 4)
}

/// Draw `shape` on the canvas with the given outline width. `None` is a no-op.
pub fn draw_shape(canvas: &mut Canvas, shape: &ShapeSpec, outline_width: u32) {
    let bbox = outline_box(canvas.width, canvas.height);
    match shape.kind {
        ShapeKind::None => {}
        ShapeKind::Circle => draw_ellipse_outline(canvas, bbox, shape.color, outline_width),
        ShapeKind::Rectangle => draw_rectangle_outline(canvas, bbox, shape.color, outline_width),
    }
}

/// Rectangle outline growing inwards from the box edge.
pub fn draw_rectangle_outline(
    canvas: &mut Canvas,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    color: Color,
    width: u32,
) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            let inner = x >= x0 + width
                && x + width <= x1
                && y >= y0 + width
                && y + width <= y1;
            if !inner {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

/// Ellipse outline inscribed in the box, growing inwards from its edge.
pub fn draw_ellipse_outline(
    canvas: &mut Canvas,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    color: Color,
    width: u32,
) {
    let cx = (x0 as f64 + x1 as f64) / 2.0;
    let cy = (y0 as f64 + y1 as f64) / 2.0;
    // Half-extents cover the inclusive end pixels.
    let rx = (x1 - x0) as f64 / 2.0 + 0.5;
    let ry = (y1 - y0) as f64 / 2.0 + 0.5;
    let inner_rx = rx - width as f64;
    let inner_ry = ry - width as f64;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if norm(dx, dy, rx, ry) > 1.0 {
                continue;
            }
            let inside_inner = inner_rx > 0.0 && inner_ry > 0.0 && norm(dx, dy, inner_rx, inner_ry) < 1.0;
            if !inside_inner {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

fn norm(dx: f64, dy: f64, rx: f64, ry: f64) -> f64 {
    (dx / rx).powi(2) + (dy / ry).powi(2)
}
