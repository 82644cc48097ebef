use std::ops::Range;

use crate::emoji::is_emoji;
use crate::font::GlyphSource;

/// Largest probed font size in pixels.
pub const MAX_PROBE_PX: f32 = 96.0;
/// Smallest probed font size; the unconstrained fallback uses this.
pub const MIN_PROBE_PX: f32 = 12.0;
/// Linear probe decrement.
pub const PROBE_STEP_PX: f32 = 2.0;

/// Tracking in whole pixels for a given size and ratio.
pub fn tracking_px(px: f32, tracking: f32) -> f32 {
    (px * tracking).floor()
}

/// Deterministic width of `text` at `px` with `tracking`.
///
/// Spaces contribute the native space advance; every other character
/// contributes its glyph bounding-box width (emoji: the point size, the side
/// of the fixed-size bitmap pasted for it) plus tracking. Tracking lands
/// after every non-space character, including the last one, so the sum is
/// additive across concatenation: `w(a + " " + b) == w(a) + space + w(b)`.
pub fn measure_width(text: &str, font: &dyn GlyphSource, px: f32, tracking: f32) -> f32 {
    let track = tracking_px(px, tracking);
    text.chars()
        .map(|ch| {
            if ch == ' ' {
                font.space_advance(px)
            } else if is_emoji(ch) {
                px + track
            } else {
                font.glyph_width(ch, px) + track
            }
        })
        .sum()
}

/// Width of `words[range]` laid out on one line (single spaces between words).
pub fn measure_words(
    words: &[String],
    range: Range<usize>,
    font: &dyn GlyphSource,
    px: f32,
    tracking: f32,
) -> f32 {
    let slice = &words[range];
    let spaces = slice.len().saturating_sub(1) as f32 * font.space_advance(px);
    slice
        .iter()
        .map(|w| measure_width(w, font, px, tracking))
        .sum::<f32>()
        + spaces
}

/// A fitted layout: chosen font size plus one or two lines of words.
#[derive(Clone, Debug)]
pub struct Layout {
    pub size_px: f32,
    pub tracking: f32,
    /// Word-index range per line, in top-to-bottom order.
    pub lines: Vec<Range<usize>>,
    pub line_widths: Vec<f32>,
    /// True only for the documented minimum-size overflowing fallback.
    pub fallback: bool,
}

/// Fit a font size and line-wrap for `words` within `max_width`.
///
/// Sizes are probed from [`MAX_PROBE_PX`] down in [`PROBE_STEP_PX`] steps.
/// The scan is deliberately linear rather than a binary search: discrete
/// glyph raster sizes do not guarantee that a larger size measures wider, so
/// the largest *tested* size that fits is authoritative. Single-line fits are
/// exhausted across all sizes before any two-line split is considered; a
/// split is never placed strictly inside `marker_range`. When nothing fits,
/// the result is the minimum probed size on one overflowing line.
pub fn fit_font(
    words: &[String],
    marker_range: Range<usize>,
    font: &dyn GlyphSource,
    max_width: f32,
    tracking: f32,
) -> Layout {
    let n = words.len();

    let mut px = MAX_PROBE_PX;
    while px >= MIN_PROBE_PX {
        let w = measure_words(words, 0..n, font, px, tracking);
        if w <= max_width {
            return Layout {
                size_px: px,
                tracking,
                lines: vec![0..n],
                line_widths: vec![w],
                fallback: false,
            };
        }
        px -= PROBE_STEP_PX;
    }

    let mut px = MAX_PROBE_PX;
    while px >= MIN_PROBE_PX {
        for split in 1..n {
            // Never break the marker phrase across lines.
            if split > marker_range.start && split < marker_range.end {
                continue;
            }
            let top = measure_words(words, 0..split, font, px, tracking);
            let bottom = measure_words(words, split..n, font, px, tracking);
            if top <= max_width && bottom <= max_width {
                return Layout {
                    size_px: px,
                    tracking,
                    lines: vec![0..split, split..n],
                    line_widths: vec![top, bottom],
                    fallback: false,
                };
            }
        }
        px -= PROBE_STEP_PX;
    }

    let w = measure_words(words, 0..n, font, MIN_PROBE_PX, tracking);
    tracing::debug!(width = w, max_width, "no size or split fits; using minimum-size fallback");
    Layout {
        size_px: MIN_PROBE_PX,
        tracking,
        lines: vec![0..n],
        line_widths: vec![w],
        fallback: true,
    }
}
