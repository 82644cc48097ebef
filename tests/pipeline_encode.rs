use unveil::{
    EmojiBitmap, EmojiCache, EmojiKey, EmojiProvider, GlyphRaster, GlyphSource, OutputFormat,
    RenderConfig, UnveilError, render_phrase,
};

struct BoxFont;

impl GlyphSource for BoxFont {
    fn glyph_width(&self, _ch: char, px: f32) -> f32 {
        (px * 0.5).floor()
    }

    fn space_advance(&self, px: f32) -> f32 {
        (px * 0.5).floor()
    }

    fn ascent(&self, px: f32) -> f32 {
        (px * 0.8).floor()
    }

    fn line_height(&self, px: f32) -> f32 {
        (px * 1.2).floor()
    }

    fn rasterize(&self, _ch: char, px: f32) -> GlyphRaster {
        let side = (px * 0.5).floor() as u32;
        GlyphRaster {
            width: side,
            height: side,
            ymin: 0,
            coverage: vec![255u8; (side * side) as usize],
        }
    }
}

struct NoEmoji;
impl EmojiProvider for NoEmoji {
    fn fetch(&self, _key: &EmojiKey) -> Option<EmojiBitmap> {
        None
    }
}

fn cache() -> EmojiCache {
    EmojiCache::new(Box::new(NoEmoji))
}

#[test]
fn gif_pipeline_produces_looping_container() {
    let cfg = RenderConfig {
        fps: 10,
        hold_ms: 300,
        fade_ms: 100,
        ..RenderConfig::default()
    };
    let bytes = render_phrase(
        "MARCELO WILL RETURN IN AVENGERS: DOOMSDAY",
        "WILL RETURN IN",
        &cfg,
        &BoxFont,
        &mut cache(),
    )
    .unwrap();

    assert_eq!(&bytes[..6], b"GIF89a");
    assert!(bytes.windows(8).any(|w| w == b"NETSCAPE"));
}

#[test]
fn static_png_pipeline_renders_one_final_frame() {
    let cfg = RenderConfig {
        format: OutputFormat::Png,
        ..RenderConfig::default()
    };
    let bytes = render_phrase(
        "HE WILL RETURN IN JUNE",
        "WILL RETURN IN",
        &cfg,
        &BoxFont,
        &mut cache(),
    )
    .unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.width(), 640);
    assert_eq!(decoded.height(), 360);
    // The final frame shows the full sentence, so something is lit.
    assert!(decoded.pixels().any(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn missing_marker_fails_before_any_frame_work() {
    let cfg = RenderConfig::default();
    let err = render_phrase(
        "SEE YOU NEXT SUMMER",
        "WILL RETURN IN",
        &cfg,
        &BoxFont,
        &mut cache(),
    )
    .unwrap_err();

    assert!(matches!(err, UnveilError::Validation(_)));
}

#[test]
fn invalid_config_fails_before_any_frame_work() {
    let cfg = RenderConfig {
        fps: 60,
        ..RenderConfig::default()
    };
    let err = render_phrase(
        "HE WILL RETURN IN JUNE",
        "WILL RETURN IN",
        &cfg,
        &BoxFont,
        &mut cache(),
    )
    .unwrap_err();

    assert!(matches!(err, UnveilError::Validation(_)));
}

#[test]
fn json_config_file_drives_the_pipeline() {
    let path = std::env::temp_dir().join(format!("unveil-cfg-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r##"{
            "resolution": "Hd720",
            "fps": 8,
            "hold_ms": 250,
            "fade_ms": 0,
            "background": { "r": 0, "g": 0, "b": 0 },
            "foreground": { "r": 255, "g": 255, "b": 255 },
            "font": "dejavu-sans-bold",
            "format": "Png",
            "fade": "HalfCosine"
        }"##,
    )
    .unwrap();

    let cfg = RenderConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let bytes = render_phrase(
        "HE WILL RETURN IN JUNE",
        "WILL RETURN IN",
        &cfg,
        &BoxFont,
        &mut cache(),
    )
    .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.width(), 1280);
    assert_eq!(decoded.height(), 720);
}

#[test]
fn json_config_with_bad_fps_is_rejected() {
    let mut cfg = RenderConfig::default();
    cfg.fps = 60;
    let text = serde_json::to_string(&cfg).unwrap();
    let err = RenderConfig::from_json(&text).unwrap_err();
    assert!(matches!(err, UnveilError::Validation(_)));
}

#[test]
fn webp_pipeline_produces_riff_container() {
    let cfg = RenderConfig {
        format: OutputFormat::WebP,
        fps: 8,
        hold_ms: 250,
        fade_ms: 0,
        ..RenderConfig::default()
    };
    let bytes = render_phrase(
        "HE WILL RETURN IN JUNE",
        "WILL RETURN IN",
        &cfg,
        &BoxFont,
        &mut cache(),
    )
    .unwrap();

    assert_eq!(&bytes[..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WEBP");
}
