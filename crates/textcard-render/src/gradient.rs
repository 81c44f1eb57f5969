//! Vertical gradient backgrounds.

use textcard_core::{Canvas, Color, TextcardResult};

/// Build a `width` x `height` canvas fading from `start` (top) to `end`.
///
/// Row `i` uses blend factor `i / height`, so the bottom row stops one step
/// short of `end`. Each row is a single solid color.
pub fn create_gradient(
    width: u32,
    height: u32,
    start: Color,
    end: Color,
) -> TextcardResult<Canvas> {
    let mut canvas = Canvas::solid(width, height, start)?;
    for y in 1..height {
        let blend = y as f64 / height as f64;
        canvas.fill_row(y, Color::blend(start, end, blend));
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textcard_core::TextcardError;

    #[test]
    fn test_gradient_dimensions() {
        let c = create_gradient(37, 11, Color::BLACK, Color::WHITE).unwrap();
        assert_eq!((c.width, c.height), (37, 11));
    }

    #[test]
    fn test_gradient_first_row_is_start() {
        let start = Color::rgb(0xFF, 0x57, 0x33);
        let c = create_gradient(4, 50, start, Color::rgb(0x33, 0xFF, 0x57)).unwrap();
        for x in 0..4 {
            assert_eq!(c.get_pixel(x, 0), Some(start));
        }
    }

    #[test]
    fn test_gradient_last_row_stops_short_of_end() {
        let c = create_gradient(2, 100, Color::BLACK, Color::WHITE).unwrap();
        // blend = 99/100 -> 252.45, truncated.
        assert_eq!(c.get_pixel(0, 99), Some(Color::rgb(252, 252, 252)));
        assert_ne!(c.get_pixel(0, 99), Some(Color::WHITE));
    }

    #[test]
    fn test_gradient_midpoint() {
        let c = create_gradient(3, 100, Color::RED, Color::GREEN).unwrap();
        assert_eq!(c.get_pixel(1, 50), Some(Color::rgb(127, 127, 0)));
    }

    #[test]
    fn test_gradient_rows_are_uniform() {
        let c = create_gradient(16, 8, Color::BLUE, Color::RED).unwrap();
        for y in 0..8 {
            let first = c.get_pixel(0, y);
            assert!((0..16).all(|x| c.get_pixel(x, y) == first));
        }
    }

    #[test]
    fn test_gradient_single_row() {
        let c = create_gradient(5, 1, Color::RED, Color::GREEN).unwrap();
        assert_eq!(c.get_pixel(4, 0), Some(Color::RED));
    }

    #[test]
    fn test_gradient_zero_size() {
        assert!(matches!(
            create_gradient(0, 10, Color::RED, Color::GREEN),
            Err(TextcardError::InvalidDimensions { .. })
        ));
        assert!(create_gradient(10, 0, Color::RED, Color::GREEN).is_err());
    }
}
