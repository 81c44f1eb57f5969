use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque 8-bit RGB color. Canvases carry no alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a hex string (e.g., "#FF0000", "FF0000" or "#F00").
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // "#F80" is shorthand for "#FF8800"
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(ColorError::InvalidHex(hex.to_string())),
        }
    }

    /// Convert to an `[r, g, b]` array.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Blend `start` towards `end` by factor `t`, truncating each channel.
    ///
    /// Every channel is `trunc((1 - t) * start + t * end)`, computed in f64.
    /// Plain linear RGB: no gamma, no rounding to nearest.
    pub fn blend(start: Color, end: Color, t: f64) -> Color {
        let mix = |s: u8, e: u8| ((1.0 - t) * s as f64 + t * e as f64) as u8;
        Color {
            r: mix(start.r, end.r),
            g: mix(start.g, end.g),
            b: mix(start.b, end.b),
        }
    }

    // --- Named constants ---

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color string '{0}'")]
    InvalidHex(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_rgb() {
        let c = Color::from_hex("#FF8800").unwrap();
        assert_eq!(c.to_rgb8(), [255, 136, 0]);
    }

    #[test]
    fn test_color_from_hex_no_hash() {
        let c = Color::from_hex("33ff57").unwrap();
        assert_eq!(c, Color::rgb(0x33, 0xFF, 0x57));
    }

    #[test]
    fn test_color_from_hex_shorthand() {
        let c = Color::from_hex("#F80").unwrap();
        assert_eq!(c, Color::rgb(255, 136, 0));
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("invalid").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#FF00001").is_err());
        assert!(Color::from_hex("#ÿÿ").is_err());
    }

    #[test]
    fn test_color_from_hex_rejects_signs() {
        assert!(Color::from_hex("#+F+F+F").is_err());
        assert!(Color::from_hex("+FF").is_err());
        assert!(Color::from_hex("#-1-1-1").is_err());
    }

    #[test]
    fn test_color_blend_endpoints() {
        assert_eq!(Color::blend(Color::RED, Color::GREEN, 0.0), Color::RED);
        assert_eq!(Color::blend(Color::RED, Color::GREEN, 1.0), Color::GREEN);
    }

    #[test]
    fn test_color_blend_truncates() {
        // 0.5 * 255 = 127.5 on both channels, truncated to 127.
        let mid = Color::blend(Color::RED, Color::GREEN, 0.5);
        assert_eq!(mid, Color::rgb(127, 127, 0));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(format!("{}", Color::RED), "#FF0000");
        assert_eq!(Color::rgb(0x33, 0xFF, 0x57).to_string(), "#33FF57");
    }

    #[test]
    fn test_color_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::BLUE).unwrap();
        assert_eq!(json, "\"#0000FF\"");
        let back: Color = serde_json::from_str("\"#ff5733\"").unwrap();
        assert_eq!(back, Color::rgb(0xFF, 0x57, 0x33));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
