use crate::emoji::EmojiCache;
use crate::encode;
use crate::error::UnveilResult;
use crate::font::{FontCatalog, GlyphSource};
use crate::layout::fit_font;
use crate::model::RenderConfig;
use crate::phrase::Phrase;
use crate::render::{RevealRenderer, VisibilityState};
use crate::sequence::build_schedule;

/// Portion of the canvas width available to text.
const MAX_WIDTH_RATIO: f32 = 0.9;

/// Render `text` end to end into encoded container bytes.
///
/// Validation (config bounds, marker presence) happens before any frame
/// work; emoji bitmaps are prefetched once up front so the frame loop never
/// touches the network. Animated containers get the full reveal schedule;
/// static ones just the final fully-revealed frame.
#[tracing::instrument(skip(cfg, font, emoji))]
pub fn render_phrase(
    text: &str,
    marker: &str,
    cfg: &RenderConfig,
    font: &dyn GlyphSource,
    emoji: &mut EmojiCache,
) -> UnveilResult<Vec<u8>> {
    cfg.validate()?;
    let phrase = Phrase::parse(text, marker)?;

    let canvas = cfg.resolution.canvas();
    let tracking = FontCatalog::find(&cfg.font)?.tracking;
    let layout = fit_font(
        phrase.words(),
        phrase.marker_range(),
        font,
        canvas.width as f32 * MAX_WIDTH_RATIO,
        tracking,
    );
    tracing::debug!(
        size_px = layout.size_px,
        lines = layout.lines.len(),
        fallback = layout.fallback,
        "fitted layout"
    );

    emoji.prefetch(text, layout.size_px as u32);

    let states = if cfg.format.is_animated() {
        build_schedule(&phrase, cfg.fps, cfg.hold_ms, cfg.fade_ms, cfg.fade)
    } else {
        // A parsed phrase always carries at least the marker class.
        let last = phrase
            .present_classes()
            .last()
            .copied()
            .unwrap_or(crate::phrase::RevealClass::After);
        vec![VisibilityState::full(last)]
    };

    let renderer = RevealRenderer {
        canvas,
        background: cfg.background,
        foreground: cfg.foreground,
        font,
    };
    let frames: Vec<_> = states
        .iter()
        .map(|state| renderer.render_frame(&phrase, &layout, state, emoji))
        .collect();

    encode::encode(&frames, cfg.fps, cfg.format)
}
