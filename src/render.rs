use image::RgbaImage;

use crate::core::{Canvas, Rgb8, mul_div255_u8};
use crate::emoji::{EmojiCache, EmojiKey, is_emoji};
use crate::font::GlyphSource;
use crate::layout::{Layout, tracking_px};
use crate::phrase::{Phrase, RevealClass};

/// Which reveal groups are shown for one frame.
///
/// All classes up to and including `revealed` are visible; `fade` applies
/// only to the `revealed` (newest) class. Constructed per animation step by
/// the sequencer and consumed once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityState {
    pub revealed: RevealClass,
    /// 0.0 = newest group invisible, 1.0 = fully opaque.
    pub fade: f64,
}

impl VisibilityState {
    pub fn new(revealed: RevealClass, fade: f64) -> Self {
        Self {
            revealed,
            fade: fade.clamp(0.0, 1.0),
        }
    }

    pub fn full(revealed: RevealClass) -> Self {
        Self::new(revealed, 1.0)
    }

    fn alpha_for(&self, class: RevealClass) -> Option<u8> {
        if class > self.revealed {
            return None;
        }
        if class == self.revealed {
            Some((255.0 * self.fade).round() as u8)
        } else {
            Some(255)
        }
    }
}

/// Renders one raster frame per visibility state.
///
/// The cursor advances by a glyph's full reserved width whether or not its
/// word is visible, so every frame of a reveal sequence positions the text
/// identically to the final fully-visible frame.
pub struct RevealRenderer<'f> {
    pub canvas: Canvas,
    pub background: Rgb8,
    pub foreground: Rgb8,
    pub font: &'f dyn GlyphSource,
}

impl RevealRenderer<'_> {
    pub fn render_frame(
        &self,
        phrase: &Phrase,
        layout: &Layout,
        state: &VisibilityState,
        emoji: &mut EmojiCache,
    ) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(
            self.canvas.width,
            self.canvas.height,
            image::Rgba(self.background.to_rgba(255)),
        );

        let px = layout.size_px;
        let track = tracking_px(px, layout.tracking);
        let space = self.font.space_advance(px);
        let line_h = self.font.line_height(px);
        let ascent = self.font.ascent(px);

        let total_h = line_h * layout.lines.len() as f32;
        let top = (self.canvas.height as f32 - total_h) / 2.0;

        for (li, range) in layout.lines.iter().enumerate() {
            let line_w = layout.line_widths[li];
            let baseline = (top + li as f32 * line_h + ascent).round() as i32;
            let mut cursor = ((self.canvas.width as f32 - line_w) / 2.0).floor();

            let last = range.end.saturating_sub(1);
            for wi in range.clone() {
                let alpha = state.alpha_for(phrase.classes()[wi]);

                for ch in phrase.words()[wi].chars() {
                    if is_emoji(ch) {
                        if let Some(alpha) = alpha {
                            self.paste_emoji(&mut img, emoji, ch, px, cursor, baseline, alpha);
                        }
                        cursor += px + track;
                    } else {
                        let gw = self.font.glyph_width(ch, px);
                        if let Some(alpha) = alpha
                            && alpha > 0
                        {
                            self.draw_glyph(&mut img, ch, px, cursor, baseline, alpha);
                        }
                        cursor += gw + track;
                    }
                }

                if wi != last {
                    cursor += space;
                }
            }
        }

        img
    }

    fn draw_glyph(
        &self,
        img: &mut RgbaImage,
        ch: char,
        px: f32,
        cursor: f32,
        baseline: i32,
        alpha: u8,
    ) {
        let raster = self.font.rasterize(ch, px);
        if raster.width == 0 || raster.height == 0 {
            return;
        }
        let x0 = cursor.round() as i32;
        let y0 = baseline - raster.height as i32 - raster.ymin;

        for row in 0..raster.height {
            for col in 0..raster.width {
                let coverage = raster.coverage[(row * raster.width + col) as usize];
                if coverage == 0 {
                    continue;
                }
                let a = mul_div255_u8(u16::from(coverage), u16::from(alpha));
                blend_px(
                    img,
                    x0 + col as i32,
                    y0 + row as i32,
                    self.foreground.to_rgba(255),
                    a,
                );
            }
        }
    }

    /// Paste a cached emoji bitmap sitting on the baseline. A cache miss
    /// (provider unavailable) draws nothing; the caller's cursor advance
    /// still reserves the bitmap's width.
    fn paste_emoji(
        &self,
        img: &mut RgbaImage,
        emoji: &mut EmojiCache,
        ch: char,
        px: f32,
        cursor: f32,
        baseline: i32,
        alpha: u8,
    ) {
        if alpha == 0 {
            return;
        }
        let key = EmojiKey::for_char(ch, px as u32);
        let Some(bitmap) = emoji.get_or_fetch(&key) else {
            return;
        };

        let x0 = cursor.round() as i32;
        let y0 = baseline - bitmap.height as i32;

        for row in 0..bitmap.height {
            for col in 0..bitmap.width {
                let i = ((row * bitmap.width + col) * 4) as usize;
                let src = &bitmap.rgba[i..i + 4];
                if src[3] == 0 {
                    continue;
                }
                let a = mul_div255_u8(u16::from(src[3]), u16::from(alpha));
                blend_px(
                    img,
                    x0 + col as i32,
                    y0 + row as i32,
                    [src[0], src[1], src[2], 255],
                    a,
                );
            }
        }
    }
}

/// Straight-alpha source-over against the (opaque) canvas.
fn blend_px(img: &mut RgbaImage, x: i32, y: i32, src: [u8; 4], a: u8) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let inv = 255 - u16::from(a);
    for c in 0..3 {
        dst.0[c] =
            mul_div255_u8(u16::from(src[c]), u16::from(a)) + mul_div255_u8(u16::from(dst.0[c]), inv);
    }
    dst.0[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::{EmojiBitmap, EmojiProvider};
    use crate::font::testing::FixedAdvanceFont;
    use crate::layout::fit_font;

    struct NoEmoji;
    impl EmojiProvider for NoEmoji {
        fn fetch(&self, _key: &EmojiKey) -> Option<EmojiBitmap> {
            None
        }
    }

    fn renderer(font: &FixedAdvanceFont) -> RevealRenderer<'_> {
        RevealRenderer {
            canvas: Canvas {
                width: 640,
                height: 360,
            },
            background: Rgb8::BLACK,
            foreground: Rgb8::WHITE,
            font,
        }
    }

    #[test]
    fn alpha_follows_reveal_order() {
        let s = VisibilityState::new(RevealClass::Marker, 0.5);
        assert_eq!(s.alpha_for(RevealClass::Before), Some(255));
        assert_eq!(s.alpha_for(RevealClass::Marker), Some(128));
        assert_eq!(s.alpha_for(RevealClass::After), None);
    }

    #[test]
    fn fade_clamps_to_unit_interval() {
        assert_eq!(VisibilityState::new(RevealClass::Before, 7.0).fade, 1.0);
        assert_eq!(VisibilityState::new(RevealClass::Before, -1.0).fade, 0.0);
    }

    #[test]
    fn zero_fade_first_group_renders_pure_background() {
        let font = FixedAdvanceFont::new();
        let r = renderer(&font);
        let phrase = Phrase::parse("A WILL RETURN IN B", "WILL RETURN IN").unwrap();
        let layout = fit_font(phrase.words(), phrase.marker_range(), &font, 600.0, 0.0);
        let mut emoji = EmojiCache::new(Box::new(NoEmoji));

        let frame = r.render_frame(
            &phrase,
            &layout,
            &VisibilityState::new(RevealClass::Before, 0.0),
            &mut emoji,
        );
        assert!(frame.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn full_reveal_draws_foreground_pixels() {
        let font = FixedAdvanceFont::new();
        let r = renderer(&font);
        let phrase = Phrase::parse("A WILL RETURN IN B", "WILL RETURN IN").unwrap();
        let layout = fit_font(phrase.words(), phrase.marker_range(), &font, 600.0, 0.0);
        let mut emoji = EmojiCache::new(Box::new(NoEmoji));

        let frame = r.render_frame(
            &phrase,
            &layout,
            &VisibilityState::full(RevealClass::After),
            &mut emoji,
        );
        assert!(frame.pixels().any(|p| p.0 == [255, 255, 255, 255]));
    }
}
