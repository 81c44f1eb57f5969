use crate::color::Color;
use crate::error::{TextcardError, TextcardResult};

/// Bytes per canvas pixel (8-bit RGB).
pub const BYTES_PER_PIXEL: usize = 3;

/// An RGB raster the compositor draws into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    /// Raw pixel data, row-major RGB.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas filled with black.
    pub fn new(width: u32, height: u32) -> TextcardResult<Self> {
        Self::solid(width, height, Color::BLACK)
    }

    /// Create a canvas filled with a solid color.
    pub fn solid(width: u32, height: u32, color: Color) -> TextcardResult<Self> {
        check_dimensions(width, height)?;
        let pixel = color.to_rgb8();
        let pixel_count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixel_count * BYTES_PER_PIXEL);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Total byte size of the pixel data.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Consume the canvas and return its raw RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL
    }

    /// Get the color at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some(Color::rgb(self.data[o], self.data[o + 1], self.data[o + 2]))
    }

    /// Set the color at a pixel coordinate. No-op if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o..o + BYTES_PER_PIXEL].copy_from_slice(&color.to_rgb8());
    }

    /// Fill one whole row with a color. No-op if the row is out of bounds.
    pub fn fill_row(&mut self, y: u32, color: Color) {
        if y >= self.height {
            return;
        }
        let start = self.offset(0, y);
        let end = start + (self.width as usize) * BYTES_PER_PIXEL;
        let pixel = color.to_rgb8();
        for px in self.data[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&pixel);
        }
    }

    /// Source-over blend `color` onto one pixel with 8-bit coverage `alpha`.
    ///
    /// Takes signed coordinates so glyphs hanging off the canvas can be
    /// drawn without pre-clipping; off-canvas pixels are dropped.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        if alpha == 0 || x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let o = self.offset(x as u32, y as u32);
        let src = color.to_rgb8();
        blend_into(&mut self.data[o..o + BYTES_PER_PIXEL], &src, alpha);
    }

    /// Paste a same-sized RGBA buffer over the canvas, using its alpha as mask.
    pub fn paste_rgba(&mut self, src: &[u8], width: u32, height: u32) -> TextcardResult<()> {
        if width != self.width || height != self.height {
            return Err(TextcardError::InvalidArgument(format!(
                "paste source is {}x{}, canvas is {}x{}",
                width, height, self.width, self.height
            )));
        }
        if src.len() != self.pixel_count() * 4 {
            return Err(TextcardError::InvalidArgument(format!(
                "paste source has {} bytes, expected {}",
                src.len(),
                self.pixel_count() * 4
            )));
        }

        for (s, d) in src
            .chunks_exact(4)
            .zip(self.data.chunks_exact_mut(BYTES_PER_PIXEL))
        {
            blend_into(d, &s[..3], s[3]);
        }
        Ok(())
    }
}

/// Reject zero-sized canvases.
pub fn check_dimensions(width: u32, height: u32) -> TextcardResult<()> {
    if width == 0 || height == 0 {
        return Err(TextcardError::InvalidDimensions { width, height });
    }
    Ok(())
}

// out = (src * a + dst * (255 - a)) / 255, rounded.
fn blend_into(dst: &mut [u8], src: &[u8], alpha: u8) {
    match alpha {
        0 => {}
        255 => dst.copy_from_slice(src),
        a => {
            let a = a as u32;
            let inv = 255 - a;
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = ((s as u32 * a + *d as u32 * inv + 127) / 255) as u8;
            }
        }
    }
}
