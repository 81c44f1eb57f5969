//! Overlay image loading.
//! Decodes PNG, JPEG and the other formats `image` supports, then stretches
//! the result to exactly the canvas size.

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use textcard_core::{TextcardError, TextcardResult};

/// Decode overlay bytes. Malformed data is an error, never skipped.
pub fn decode_overlay(data: &[u8]) -> TextcardResult<DynamicImage> {
    image::load_from_memory(data)
        .map_err(|e| TextcardError::Decode(format!("failed to decode overlay image: {}", e)))
}

/// Resize to exactly `width` x `height` as RGBA.
///
/// The aspect ratio is not preserved. Images without an alpha channel come
/// out fully opaque.
pub fn fit_overlay(img: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let rgba = img.to_rgba8();
    if rgba.dimensions() == (width, height) {
        return rgba;
    }
    image::imageops::resize(&rgba, width, height, FilterType::Triangle)
}
