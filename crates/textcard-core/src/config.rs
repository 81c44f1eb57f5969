use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{TextcardError, TextcardResult};
use crate::request::{
    Background, BackgroundKind, FontSource, RenderRequest, ShapeKind, ShapeSpec,
};

/// Allowed font sizes, in points.
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 10..=100;
/// Allowed canvas widths and heights, in pixels.
pub const DIMENSION_RANGE: RangeInclusive<u32> = 300..=1200;
/// File name offered for the rendered PNG.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "advanced_text_image.png";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    pub content: String,
    pub summarize: bool,
    pub max_summary_length: u32,
    pub min_summary_length: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            content: "Text cards take ideas to the next level!".to_string(),
            summarize: false,
            max_summary_length: 30,
            min_summary_length: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FontConfig {
    /// TrueType/OpenType file. Unset or unloadable means the built-in font.
    pub path: Option<PathBuf>,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub text: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { text: Color::BLACK }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub kind: BackgroundKind,
    /// Only used when `kind = "solid"`.
    pub solid: Color,
    /// Only used when `kind = "gradient"`.
    pub gradient_start: Color,
    pub gradient_end: Color,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Solid,
            solid: Color::WHITE,
            gradient_start: Color::rgb(0xFF, 0x57, 0x33),
            gradient_end: Color::rgb(0x33, 0xFF, 0x57),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub kind: ShapeKind,
    /// Only used when `kind` is not "none".
    pub color: Color,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            kind: ShapeKind::None,
            color: Color::RED,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OverlayConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
        }
    }
}

/// The whole input form as a TOML document.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FormConfig {
    pub text: TextConfig,
    pub font: FontConfig,
    pub canvas: CanvasConfig,
    pub colors: ColorsConfig,
    pub background: BackgroundConfig,
    pub shape: ShapeConfig,
    pub overlay: OverlayConfig,
    pub output: OutputConfig,
}

impl FormConfig {
    pub fn from_toml_str(contents: &str) -> TextcardResult<Self> {
        toml::from_str(contents).map_err(|e| TextcardError::Config(e.to_string()))
    }

    pub fn load_from_file(path: &Path) -> TextcardResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TextcardError::asset(format!("failed to read config: {}", e), path)
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn save_to_file(&self, path: &Path) -> TextcardResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| TextcardError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Enforce the ranges the form's sliders allow.
    pub fn validate(&self) -> TextcardResult<()> {
        check_range("font.size", self.font.size, &FONT_SIZE_RANGE)?;
        check_range("canvas.width", self.canvas.width, &DIMENSION_RANGE)?;
        check_range("canvas.height", self.canvas.height, &DIMENSION_RANGE)?;

        let text = &self.text;
        if text.min_summary_length == 0 || text.min_summary_length > text.max_summary_length {
            return Err(TextcardError::Config(format!(
                "summary lengths must satisfy 0 < min <= max, got min={} max={}",
                text.min_summary_length, text.max_summary_length
            )));
        }
        if self.output.file_name.trim().is_empty() {
            return Err(TextcardError::Config("output.file_name is empty".into()));
        }
        Ok(())
    }

    /// Fold the form into a single render request.
    ///
    /// Only the selected background's colors and a visible shape's color are
    /// used. Relative paths resolve against `base_dir`. The overlay file is
    /// read here; the font path is handed on as-is so a bad font can fall back
    /// at render time.
    pub fn to_request(
        &self,
        text: impl Into<String>,
        base_dir: &Path,
    ) -> TextcardResult<RenderRequest> {
        self.validate()?;

        let background = match self.background.kind {
            BackgroundKind::Solid => Background::Solid(self.background.solid),
            BackgroundKind::Gradient => Background::Gradient {
                start: self.background.gradient_start,
                end: self.background.gradient_end,
            },
        };

        let shape = match self.shape.kind {
            ShapeKind::None => ShapeSpec::none(),
            kind => ShapeSpec {
                kind,
                color: self.shape.color,
            },
        };

        let font = match &self.font.path {
            Some(p) => FontSource::Path(resolve(base_dir, p)),
            None => FontSource::Default,
        };

        let mut request = RenderRequest::new(text, self.canvas.width, self.canvas.height)
            .with_font(font, self.font.size as f32)
            .with_text_color(self.colors.text)
            .with_background(background)
            .with_shape(shape);

        if let Some(p) = &self.overlay.path {
            let path = resolve(base_dir, p);
            let bytes = std::fs::read(&path).map_err(|e| {
                TextcardError::asset(format!("failed to read overlay image: {}", e), &path)
            })?;
            request = request.with_overlay(bytes);
        }

        request.validate()?;
        Ok(request)
    }
}

fn check_range(field: &str, value: u32, range: &RangeInclusive<u32>) -> TextcardResult<()> {
    if !range.contains(&value) {
        return Err(TextcardError::Config(format!(
            "{} must be within {}..={}, got {}",
            field,
            range.start(),
            range.end(),
            value
        )));
    }
    Ok(())
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let cfg = FormConfig::default();
        assert_eq!(cfg.font.size, 30);
        assert_eq!(cfg.canvas.width, 800);
        assert_eq!(cfg.canvas.height, 600);
        assert_eq!(cfg.colors.text, Color::BLACK);
        assert_eq!(cfg.background.solid, Color::WHITE);
        assert_eq!(cfg.background.gradient_start.to_string(), "#FF5733");
        assert_eq!(cfg.background.gradient_end.to_string(), "#33FF57");
        assert_eq!(cfg.shape.color, Color::RED);
        assert_eq!(cfg.output.file_name, "advanced_text_image.png");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let cfg = FormConfig::from_toml_str(
            r##"
            [text]
            content = "Hello"

            [background]
            kind = "gradient"
            gradient_start = "#000000"

            [shape]
            kind = "circle"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.text.content, "Hello");
        assert_eq!(cfg.background.kind, BackgroundKind::Gradient);
        assert_eq!(cfg.background.gradient_start, Color::BLACK);
        assert_eq!(cfg.background.gradient_end.to_string(), "#33FF57");
        assert_eq!(cfg.shape.kind, ShapeKind::Circle);
        assert_eq!(cfg.canvas.width, 800);
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        let err = FormConfig::from_toml_str("[shape]\nkind = \"triangle\"\n").unwrap_err();
        assert!(matches!(err, TextcardError::Config(_)));
    }

    #[test]
    fn test_parse_kinds_case_insensitive() {
        let cfg = FormConfig::from_toml_str(
            r#"
            [shape]
            kind = "Circle"

            [background]
            kind = "Gradient"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.shape.kind, ShapeKind::Circle);
        assert_eq!(cfg.background.kind, BackgroundKind::Gradient);
    }

    #[test]
    fn test_parse_rejects_bad_color() {
        assert!(FormConfig::from_toml_str("[colors]\ntext = \"#12\"\n").is_err());
    }

    #[test]
    fn test_validate_ranges() {
        let mut cfg = FormConfig::default();
        cfg.font.size = 9;
        assert!(cfg.validate().is_err());

        let mut cfg = FormConfig::default();
        cfg.canvas.width = 1201;
        assert!(cfg.validate().is_err());

        let mut cfg = FormConfig::default();
        cfg.canvas.height = 299;
        assert!(cfg.validate().is_err());

        let mut cfg = FormConfig::default();
        cfg.text.min_summary_length = 40;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_to_request_solid_ignores_gradient_colors() {
        let cfg = FormConfig::default();
        let req = cfg.to_request("Hi", Path::new(".")).unwrap();
        assert_eq!(req.background, Background::Solid(Color::WHITE));
        assert_eq!(req.shape, ShapeSpec::none());
        assert_eq!(req.font, FontSource::Default);
        assert_eq!(req.font_size, 30.0);
        assert_eq!((req.width, req.height), (800, 600));
    }

    #[test]
    fn test_to_request_gradient_and_shape() {
        let mut cfg = FormConfig::default();
        cfg.background.kind = BackgroundKind::Gradient;
        cfg.shape.kind = ShapeKind::Rectangle;
        cfg.shape.color = Color::BLUE;
        cfg.font.path = Some(PathBuf::from("fonts/Custom.ttf"));

        let req = cfg.to_request("Hi", Path::new("/work")).unwrap();
        assert_eq!(
            req.background,
            Background::Gradient {
                start: Color::rgb(0xFF, 0x57, 0x33),
                end: Color::rgb(0x33, 0xFF, 0x57),
            }
        );
        assert_eq!(req.shape, ShapeSpec::rectangle(Color::BLUE));
        assert_eq!(
            req.font,
            FontSource::Path(PathBuf::from("/work/fonts/Custom.ttf"))
        );
    }

    #[test]
    fn test_to_request_missing_overlay_is_asset_error() {
        let mut cfg = FormConfig::default();
        cfg.overlay.path = Some(PathBuf::from("/nonexistent/overlay.png"));
        let err = cfg.to_request("Hi", Path::new(".")).unwrap_err();
        assert!(matches!(err, TextcardError::Asset { .. }));
    }

    #[test]
    fn test_roundtrip_through_toml_text() {
        let mut cfg = FormConfig::default();
        cfg.shape.kind = ShapeKind::Circle;
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("kind = \"circle\""));
        let back = FormConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.shape.kind, ShapeKind::Circle);
    }
}
