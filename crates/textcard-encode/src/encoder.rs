//! PNG encoding via the `png` crate.

use std::io::Cursor;
use std::path::Path;

use textcard_core::{Canvas, TextcardError, TextcardResult};

/// MIME type of encoded output.
pub const PNG_MIME: &str = "image/png";

/// Encode a canvas as an 8-bit RGB PNG held in memory.
///
/// The returned cursor is positioned at the start of the buffer, ready to be
/// read back.
pub fn encode_png(canvas: &Canvas) -> TextcardResult<Cursor<Vec<u8>>> {
    let mut buf = Vec::with_capacity(canvas.byte_size() / 4);
    {
        let mut encoder = png::Encoder::new(&mut buf, canvas.width, canvas.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| TextcardError::Encode(format!("failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(&canvas.data)
            .map_err(|e| TextcardError::Encode(format!("failed to write PNG data: {}", e)))?;
        writer
            .finish()
            .map_err(|e| TextcardError::Encode(format!("failed to finalize PNG: {}", e)))?;
    }

    tracing::debug!(
        "Encoded {}x{} canvas to {} PNG bytes",
        canvas.width,
        canvas.height,
        buf.len()
    );
    Ok(Cursor::new(buf))
}

/// Encode a canvas and write it to `output_path`, creating parent directories.
/// Returns the encoded bytes.
pub fn write_png(canvas: &Canvas, output_path: &Path) -> TextcardResult<Vec<u8>> {
    let bytes = encode_png(canvas)?.into_inner();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, &bytes).map_err(|e| {
        TextcardError::Encode(format!(
            "failed to write PNG file {}: {}",
            output_path.display(),
            e
        ))
    })?;

    tracing::info!(
        "Wrote {}x{} PNG to {} ({} bytes)",
        canvas.width,
        canvas.height,
        output_path.display(),
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use textcard_core::Color;

    #[test]
    fn test_encode_png_signature_and_position() {
        let canvas = Canvas::solid(4, 3, Color::RED).unwrap();
        let mut cursor = encode_png(&canvas).unwrap();
        assert_eq!(cursor.position(), 0);
        let mut sig = [0u8; 8];
        cursor.read_exact(&mut sig).unwrap();
        assert_eq!(sig, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_png_decodes_back() {
        let mut canvas = Canvas::solid(5, 7, Color::WHITE).unwrap();
        canvas.set_pixel(2, 3, Color::rgb(1, 2, 3));
        let bytes = encode_png(&canvas).unwrap().into_inner();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 7));
        assert_eq!(decoded.get_pixel(2, 3).0, [1, 2, 3]);
        assert_eq!(decoded.into_raw(), canvas.data);
    }

    #[test]
    fn test_encode_png_deterministic() {
        let canvas = Canvas::solid(16, 16, Color::BLUE).unwrap();
        let a = encode_png(&canvas).unwrap().into_inner();
        let b = encode_png(&canvas).unwrap().into_inner();
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_png_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("card.png");
        let canvas = Canvas::solid(3, 3, Color::GREEN).unwrap();
        let written = write_png(&canvas, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), written);
    }
}
