#![forbid(unsafe_code)]

pub mod core;
pub mod ease;
pub mod emoji;
pub mod encode;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod phrase;
pub mod pipeline;
pub mod render;
pub mod sequence;

pub use crate::core::{Canvas, Resolution, Rgb8};
pub use ease::Fade;
pub use emoji::{EmojiBitmap, EmojiCache, EmojiKey, EmojiProvider, HttpEmojiProvider};
pub use encode::OutputFormat;
pub use error::{UnveilError, UnveilResult};
pub use font::{FontCatalog, FontFace, FontSpec, GlyphRaster, GlyphSource};
pub use layout::{Layout, fit_font, measure_width};
pub use model::RenderConfig;
pub use phrase::{DEFAULT_MARKER, Phrase, RevealClass, classify};
pub use pipeline::render_phrase;
pub use render::{RevealRenderer, VisibilityState};
pub use sequence::build_schedule;
