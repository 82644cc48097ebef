use crate::core::{Resolution, Rgb8};
use crate::ease::Fade;
use crate::encode::OutputFormat;
use crate::error::{UnveilError, UnveilResult};
use crate::font::FontCatalog;

pub const MIN_FPS: u32 = 6;
pub const MAX_FPS: u32 = 24;

/// Full configuration surface for one render pass.
///
/// Everything here is constrained to always-valid values by `validate`, so
/// the core renderer needs no further input checking.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    pub resolution: Resolution,
    pub fps: u32,
    /// Duration each reveal stage stays on screen.
    pub hold_ms: u32,
    /// Fade-in portion at the start of each stage; must not exceed `hold_ms`.
    pub fade_ms: u32,
    pub background: Rgb8,
    pub foreground: Rgb8,
    /// Id into the fixed font whitelist.
    pub font: String,
    pub format: OutputFormat,
    pub fade: Fade,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::Sd360,
            fps: 10,
            hold_ms: 1500,
            fade_ms: 600,
            background: Rgb8::BLACK,
            foreground: Rgb8::WHITE,
            font: FontCatalog::DEFAULT_ID.to_string(),
            format: OutputFormat::Gif,
            fade: Fade::HalfCosine,
        }
    }
}

impl RenderConfig {
    /// Parses a JSON config and validates it.
    pub fn from_json(text: &str) -> UnveilResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| UnveilError::validation(format!("parse config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &std::path::Path) -> UnveilResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            UnveilError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> UnveilResult<()> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(UnveilError::validation(format!(
                "fps must be within {MIN_FPS}..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        if self.hold_ms == 0 {
            return Err(UnveilError::validation("hold_ms must be > 0"));
        }
        if self.fade_ms > self.hold_ms {
            return Err(UnveilError::validation(
                "fade_ms must not exceed hold_ms",
            ));
        }
        FontCatalog::find(&self.font)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_fps() {
        let mut cfg = RenderConfig::default();
        cfg.fps = 5;
        assert!(cfg.validate().is_err());
        cfg.fps = 25;
        assert!(cfg.validate().is_err());
        cfg.fps = 24;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_fade_longer_than_hold() {
        let mut cfg = RenderConfig::default();
        cfg.fade_ms = cfg.hold_ms + 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_font() {
        let mut cfg = RenderConfig::default();
        cfg.font = "papyrus".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn json_roundtrip() {
        let cfg = RenderConfig::default();
        let s = serde_json::to_string_pretty(&cfg).unwrap();
        let de: RenderConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(de.fps, cfg.fps);
        assert_eq!(de.background, cfg.background);
        assert_eq!(de.font, cfg.font);
    }

    #[test]
    fn from_json_validates_after_parsing() {
        let mut cfg = RenderConfig::default();
        cfg.fps = 60;
        let s = serde_json::to_string(&cfg).unwrap();
        let err = RenderConfig::from_json(&s).unwrap_err();
        assert!(err.to_string().contains("fps"));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(RenderConfig::from_json("{").is_err());
    }
}
