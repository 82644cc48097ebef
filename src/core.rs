use crate::error::{UnveilError, UnveilResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// The two supported output resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Resolution {
    Sd360,
    Hd720,
}

impl Resolution {
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Sd360 => Canvas {
                width: 640,
                height: 360,
            },
            Self::Hd720 => Canvas {
                width: 1280,
                height: 720,
            },
        }
    }

    /// Parse the `"640x360"` form used by the configuration surface.
    pub fn parse(s: &str) -> UnveilResult<Self> {
        match s.trim() {
            "640x360" => Ok(Self::Sd360),
            "1280x720" => Ok(Self::Hd720),
            other => Err(UnveilError::validation(format!(
                "unsupported resolution '{other}' (expected 640x360 or 1280x720)"
            ))),
        }
    }
}

/// Straight (non-premultiplied) opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse a `#RRGGBB` hex triplet.
    pub fn parse_hex(s: &str) -> UnveilResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| UnveilError::validation(format!("color '{s}' must start with '#'")))?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(UnveilError::validation(format!(
                "color '{s}' must be #RRGGBB"
            )));
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        Ok(Self {
            r: byte(0),
            g: byte(2),
            b: byte(4),
        })
    }

    pub fn to_rgba(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

/// `(x * y + 127) / 255`: exact rounding for 8-bit alpha arithmetic.
pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
