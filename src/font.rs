use crate::error::{UnveilError, UnveilResult};

/// Rasterized glyph coverage mask.
///
/// `ymin` is the offset of the bitmap's bottom edge relative to the baseline
/// (negative for descenders), matching fontdue's metric convention.
#[derive(Clone, Debug)]
pub struct GlyphRaster {
    pub width: u32,
    pub height: u32,
    pub ymin: i32,
    /// Row-major 0..=255 coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// Glyph metric and raster source for layout and rendering.
///
/// Only fixed per-character advance is required (no shaping, no kerning);
/// tests substitute a fixed-advance fake where pixel-exact determinism
/// matters more than real outlines.
pub trait GlyphSource {
    /// Bounding-box width in pixels of a non-space glyph at `px`.
    fn glyph_width(&self, ch: char, px: f32) -> f32;
    /// Native advance of the space character at `px`.
    fn space_advance(&self, px: f32) -> f32;
    /// Baseline ascent at `px`.
    fn ascent(&self, px: f32) -> f32;
    /// Line-to-line advance at `px`.
    fn line_height(&self, px: f32) -> f32;
    /// Coverage mask for a non-space glyph at `px`.
    fn rasterize(&self, ch: char, px: f32) -> GlyphRaster;
}

/// One whitelisted font choice: family + weight + tracking ratio.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct FontSpec {
    pub id: &'static str,
    pub family: &'static str,
    pub weight: &'static str,
    pub source: &'static str,
    /// Extra inter-character spacing as a ratio of the point size.
    pub tracking: f32,
}

/// Fixed whitelist of selectable fonts.
///
/// Paths cover stock DejaVu/Liberation installs on common Linux
/// distributions; the whitelist keeps the configuration surface always-valid.
pub struct FontCatalog;

impl FontCatalog {
    pub const DEFAULT_ID: &'static str = "dejavu-sans-bold";

    pub fn all() -> &'static [FontSpec] {
        &[
            FontSpec {
                id: "dejavu-sans-bold",
                family: "DejaVu Sans",
                weight: "bold",
                source: "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                tracking: 0.0,
            },
            FontSpec {
                id: "dejavu-sans",
                family: "DejaVu Sans",
                weight: "regular",
                source: "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                tracking: 0.0,
            },
            FontSpec {
                id: "dejavu-sans-bold-wide",
                family: "DejaVu Sans",
                weight: "bold",
                source: "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                tracking: 0.12,
            },
            FontSpec {
                id: "liberation-sans-bold",
                family: "Liberation Sans",
                weight: "bold",
                source: "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
                tracking: 0.0,
            },
        ]
    }

    pub fn find(id: &str) -> UnveilResult<&'static FontSpec> {
        Self::all()
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| UnveilError::validation(format!("unknown font id '{id}'")))
    }
}

impl FontSpec {
    pub fn load(&self) -> UnveilResult<FontFace> {
        let bytes = std::fs::read(self.source).map_err(|e| {
            UnveilError::validation(format!("failed to read font '{}': {e}", self.source))
        })?;
        FontFace::from_bytes(&bytes)
    }
}

/// fontdue-backed glyph source.
pub struct FontFace {
    font: fontdue::Font,
}

impl FontFace {
    pub fn from_bytes(bytes: &[u8]) -> UnveilResult<Self> {
        let font = fontdue::Font::from_bytes(bytes.to_vec(), fontdue::FontSettings::default())
            .map_err(|e| UnveilError::validation(format!("failed to parse font: {e}")))?;
        Ok(Self { font })
    }
}

impl GlyphSource for FontFace {
    fn glyph_width(&self, ch: char, px: f32) -> f32 {
        self.font.metrics(ch, px).width as f32
    }

    fn space_advance(&self, px: f32) -> f32 {
        self.font.metrics(' ', px).advance_width
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px * 0.8)
    }

    fn line_height(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px * 1.2)
    }

    fn rasterize(&self, ch: char, px: f32) -> GlyphRaster {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        GlyphRaster {
            width: metrics.width as u32,
            height: metrics.height as u32,
            ymin: metrics.ymin,
            coverage,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Fixed-advance fake: every glyph is a solid `advance x advance` square.
    pub(crate) struct FixedAdvanceFont {
        pub(crate) advance_ratio: f32,
    }

    impl FixedAdvanceFont {
        pub(crate) fn new() -> Self {
            Self {
                advance_ratio: 0.5,
            }
        }
    }

    impl GlyphSource for FixedAdvanceFont {
        fn glyph_width(&self, _ch: char, px: f32) -> f32 {
            (px * self.advance_ratio).floor()
        }

        fn space_advance(&self, px: f32) -> f32 {
            (px * self.advance_ratio).floor()
        }

        fn ascent(&self, px: f32) -> f32 {
            (px * 0.8).floor()
        }

        fn line_height(&self, px: f32) -> f32 {
            (px * 1.2).floor()
        }

        fn rasterize(&self, _ch: char, px: f32) -> GlyphRaster {
            let side = (px * self.advance_ratio).floor() as u32;
            GlyphRaster {
                width: side,
                height: side,
                ymin: 0,
                coverage: vec![255u8; (side * side) as usize],
            }
        }
    }
}
