mod receipt;
mod summarize;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use textcard_core::config::{DIMENSION_RANGE, FONT_SIZE_RANGE};
use textcard_core::{hash_bytes, BackgroundKind, Color, FormConfig, ShapeKind};
use textcard_encode::{write_png, Download};
use textcard_render::Compositor;

use crate::receipt::RenderReceipt;
use crate::summarize::{CommandSummarizer, Passthrough, Summarizer, SummaryLimits};

#[derive(Parser)]
#[command(
    name = "textcard",
    version,
    about = "textcard: render text onto generated images",
    long_about = "textcard renders text onto a solid or gradient background, with an optional\noverlay image and shape outline, and saves the result as PNG."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a text card to PNG
    Render(RenderArgs),

    /// Write a default form config
    Init {
        /// Where to write the config
        #[arg(default_value = "textcard.toml")]
        path: PathBuf,
    },

    /// Display version and form defaults
    Info,
}

#[derive(clap::Args, Default)]
struct RenderArgs {
    /// Form config (TOML); flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Text to render
    #[arg(short, long)]
    text: Option<String>,

    /// TrueType/OpenType font file (falls back to the built-in font)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in points (10-100)
    #[arg(long)]
    font_size: Option<u32>,

    /// Image width in pixels (300-1200)
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels (300-1200)
    #[arg(long)]
    height: Option<u32>,

    /// Text color, e.g. "#000000"
    #[arg(long)]
    text_color: Option<Color>,

    /// Background type: solid or gradient
    #[arg(long)]
    background: Option<BackgroundKind>,

    /// Solid background color
    #[arg(long)]
    bg_color: Option<Color>,

    /// Gradient start (top) color
    #[arg(long)]
    gradient_start: Option<Color>,

    /// Gradient end (bottom) color
    #[arg(long)]
    gradient_end: Option<Color>,

    /// Shape outline: none, circle or rectangle
    #[arg(long)]
    shape: Option<ShapeKind>,

    /// Shape outline color
    #[arg(long)]
    shape_color: Option<Color>,

    /// Overlay image, stretched over the whole canvas
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Replace the text with a summary before rendering
    #[arg(long)]
    summarize: bool,

    /// Summarizer command: reads text on stdin, prints the summary
    #[arg(long, env = "TEXTCARD_SUMMARY_CMD")]
    summary_cmd: Option<String>,

    /// Output file path (default: the config's output.file_name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stream the PNG to stdout instead of writing a file
    #[arg(long, conflicts_with_all = ["output", "json"])]
    stdout: bool,

    /// Print a JSON render receipt to stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for --json and --stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => cmd_render(args),
        Commands::Init { path } => cmd_init(&path),
        Commands::Info => cmd_info(),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let start = Instant::now();
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    let (mut config, base_dir) = match &args.config {
        Some(path) => {
            let config = FormConfig::load_from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (config, base)
        }
        None => (FormConfig::default(), cwd.clone()),
    };
    apply_overrides(&mut config, &args, &cwd);
    config.validate().context("invalid render settings")?;

    let summarized = args.summarize || config.text.summarize;
    let summarizer: Box<dyn Summarizer> = if summarized {
        let command = args.summary_cmd.as_deref().context(
            "--summarize needs a summarizer: pass --summary-cmd or set TEXTCARD_SUMMARY_CMD",
        )?;
        Box::new(CommandSummarizer::from_command_line(command)?)
    } else {
        Box::new(Passthrough)
    };
    let limits = SummaryLimits {
        max_length: config.text.max_summary_length,
        min_length: config.text.min_summary_length,
    };
    let text = summarizer
        .summarize(&config.text.content, limits)
        .context("summarization failed")?;
    if summarized {
        tracing::info!("Summarized text: {}", text);
    }

    let request = config
        .to_request(text, &base_dir)
        .context("failed to build render request")?;
    let output = Compositor::new()
        .render_with_report(&request)
        .context("render failed")?;
    if output.font_fallback {
        tracing::warn!("Requested font unavailable, rendered with the built-in font");
    }

    if args.stdout {
        let download = Download::png(&output.canvas, config.output.file_name.clone())?;
        tracing::info!(
            "Streaming {} ({}, {} bytes)",
            download.file_name,
            download.mime,
            download.bytes.len()
        );
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&download.bytes)?;
        stdout.flush()?;
        return Ok(());
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| cwd.join(&config.output.file_name));
    let bytes = write_png(&output.canvas, &output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    let elapsed = start.elapsed();
    tracing::info!(
        "Rendered {} in {:.2}ms",
        output_path.display(),
        elapsed.as_secs_f64() * 1000.0
    );

    if args.json {
        let receipt = RenderReceipt {
            output: output_path,
            width: output.canvas.width,
            height: output.canvas.height,
            bytes: bytes.len() as u64,
            sha256: hash_bytes(&bytes).to_hex(),
            font_fallback: output.font_fallback,
            summarized,
            render_duration_ms: elapsed.as_millis() as u64,
        };
        println!("{}", receipt.to_json()?);
    }

    Ok(())
}

/// Fold command-line flags over the loaded form.
fn apply_overrides(config: &mut FormConfig, args: &RenderArgs, cwd: &Path) {
    if let Some(text) = &args.text {
        config.text.content = text.clone();
    }
    if let Some(font) = &args.font {
        config.font.path = Some(cwd.join(font));
    }
    if let Some(size) = args.font_size {
        config.font.size = size;
    }
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }
    if let Some(color) = args.text_color {
        config.colors.text = color;
    }
    if let Some(kind) = args.background {
        config.background.kind = kind;
    }
    if let Some(color) = args.bg_color {
        config.background.solid = color;
    }
    if let Some(color) = args.gradient_start {
        config.background.gradient_start = color;
    }
    if let Some(color) = args.gradient_end {
        config.background.gradient_end = color;
    }
    if let Some(kind) = args.shape {
        config.shape.kind = kind;
    }
    if let Some(color) = args.shape_color {
        config.shape.color = color;
    }
    if let Some(overlay) = &args.overlay {
        config.overlay.path = Some(cwd.join(overlay));
    }
}

fn cmd_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("'{}' already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    FormConfig::default()
        .save_to_file(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    println!("  Render it with: textcard render --config {}", path.display());
    Ok(())
}

fn cmd_info() -> Result<()> {
    let defaults = FormConfig::default();
    println!("textcard {}", env!("CARGO_PKG_VERSION"));
    println!("   Renderer:    CPU (single-threaded)");
    println!("   Output:      PNG ({})", textcard_encode::PNG_MIME);
    println!(
        "   Font size:   {} (range {}-{})",
        defaults.font.size,
        FONT_SIZE_RANGE.start(),
        FONT_SIZE_RANGE.end()
    );
    println!(
        "   Canvas:      {}x{} (range {}-{})",
        defaults.canvas.width,
        defaults.canvas.height,
        DIMENSION_RANGE.start(),
        DIMENSION_RANGE.end()
    );
    println!("   Text color:  {}", defaults.colors.text);
    println!(
        "   Background:  {} {} (gradient {} -> {})",
        defaults.background.kind,
        defaults.background.solid,
        defaults.background.gradient_start,
        defaults.background.gradient_end
    );
    println!(
        "   Shape:       {} ({})",
        defaults.shape.kind, defaults.shape.color
    );
    println!("   File name:   {}", defaults.output.file_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render_flags() {
        let cli = Cli::try_parse_from([
            "textcard",
            "render",
            "--text",
            "Hi",
            "--width",
            "300",
            "--background",
            "gradient",
            "--shape",
            "circle",
            "--shape-color",
            "#00FF00",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.text.as_deref(), Some("Hi"));
        assert_eq!(args.background, Some(BackgroundKind::Gradient));
        assert_eq!(args.shape, Some(ShapeKind::Circle));
        assert_eq!(args.shape_color, Some(Color::GREEN));
    }

    #[test]
    fn test_cli_rejects_unknown_shape() {
        assert!(Cli::try_parse_from(["textcard", "render", "--shape", "hexagon"]).is_err());
        assert!(Cli::try_parse_from(["textcard", "render", "--text-color", "red"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = FormConfig::default();
        let args = RenderArgs {
            text: Some("Override".into()),
            font: Some(PathBuf::from("fonts/a.ttf")),
            height: Some(900),
            shape: Some(ShapeKind::Rectangle),
            bg_color: Some(Color::BLUE),
            ..RenderArgs::default()
        };
        apply_overrides(&mut config, &args, Path::new("/work"));
        assert_eq!(config.text.content, "Override");
        assert_eq!(config.font.path, Some(PathBuf::from("/work/fonts/a.ttf")));
        assert_eq!(config.canvas.height, 900);
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.shape.kind, ShapeKind::Rectangle);
        assert_eq!(config.background.solid, Color::BLUE);
    }
}
