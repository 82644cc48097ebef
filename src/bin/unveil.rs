use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use unveil::{
    DEFAULT_MARKER, EmojiCache, Fade, FontCatalog, HttpEmojiProvider, OutputFormat, RenderConfig,
    Resolution, Rgb8, render_phrase,
};

#[derive(Parser, Debug)]
#[command(name = "unveil", version, about = "Render a WILL RETURN reveal animation")]
struct Cli {
    /// Phrase to reveal; must contain the marker verbatim.
    phrase: String,

    /// Marker sub-phrase anchoring the reveal groups.
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Canvas resolution.
    #[arg(long, default_value = "640x360")]
    resolution: String,

    /// Frames per second (6..=24).
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Hold per reveal stage in milliseconds.
    #[arg(long, default_value_t = 1500)]
    hold_ms: u32,

    /// Fade-in portion of each hold in milliseconds.
    #[arg(long, default_value_t = 600)]
    fade_ms: u32,

    /// Background color as #RRGGBB.
    #[arg(long, default_value = "#000000")]
    background: String,

    /// Text color as #RRGGBB.
    #[arg(long, default_value = "#FFFFFF")]
    foreground: String,

    /// Font id from the whitelist.
    #[arg(long, default_value = FontCatalog::DEFAULT_ID)]
    font: String,

    /// Output container.
    #[arg(long, value_enum, default_value_t = FormatChoice::Gif)]
    format: FormatChoice,

    /// Fade curve.
    #[arg(long, value_enum, default_value_t = FadeChoice::HalfCosine)]
    fade: FadeChoice,

    /// JSON config file; replaces the individual render flags above.
    #[arg(long, value_name = "PATH", conflicts_with_all = [
        "resolution", "fps", "hold_ms", "fade_ms", "background",
        "foreground", "font", "format", "fade",
    ])]
    config: Option<PathBuf>,

    /// Output path; defaults to the mechanical file name in the current dir.
    #[arg(long)]
    out: Option<PathBuf>,

    /// List the whitelisted fonts and exit.
    #[arg(long)]
    list_fonts: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl From<FormatChoice> for OutputFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Png => Self::Png,
            FormatChoice::Jpeg => Self::Jpeg,
            FormatChoice::Gif => Self::Gif,
            FormatChoice::Webp => Self::WebP,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FadeChoice {
    HalfCosine,
    ExpSaturate,
}

impl From<FadeChoice> for Fade {
    fn from(c: FadeChoice) -> Self {
        match c {
            FadeChoice::HalfCosine => Self::HalfCosine,
            FadeChoice::ExpSaturate => Self::ExpSaturate,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if cli.list_fonts {
        for spec in FontCatalog::all() {
            println!(
                "{:24} {} {} (tracking {})",
                spec.id, spec.family, spec.weight, spec.tracking
            );
        }
        return Ok(());
    }

    let cfg = match &cli.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => {
            let cfg = RenderConfig {
                resolution: Resolution::parse(&cli.resolution)?,
                fps: cli.fps,
                hold_ms: cli.hold_ms,
                fade_ms: cli.fade_ms,
                background: Rgb8::parse_hex(&cli.background)?,
                foreground: Rgb8::parse_hex(&cli.foreground)?,
                font: cli.font,
                format: cli.format.into(),
                fade: cli.fade.into(),
            };
            cfg.validate()?;
            cfg
        }
    };

    let font = FontCatalog::find(&cfg.font)?
        .load()
        .context("load whitelisted font")?;
    let mut emoji = EmojiCache::new(Box::new(HttpEmojiProvider::default()));

    let bytes = render_phrase(&cli.phrase, &cli.marker, &cfg, &font, &mut emoji)?;

    let out = cli
        .out
        .unwrap_or_else(|| PathBuf::from(cfg.format.file_name()));
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &bytes).with_context(|| format!("write '{}'", out.display()))?;

    eprintln!("wrote {} ({})", out.display(), cfg.format.mime_type());
    Ok(())
}
