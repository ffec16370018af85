use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 24-bit RGB colour stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

/// Errors from parsing a hex colour string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0} characters")]
    Length(usize),
    #[error("invalid hex colour: {0:?}")]
    NotHex(String),
}

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// Channels in `[0, 1]`.
    pub fn to_rgb(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }

    pub fn to_rgba(self) -> [f32; 4] {
        let [r, g, b] = self.to_rgb();
        [r, g, b, 1.0]
    }

    /// Channels decoded from sRGB to linear light, for sRGB render targets.
    pub fn to_linear_rgb(self) -> [f32; 3] {
        self.to_rgb().map(srgb_to_linear)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `RRGGBB`, `#RRGGBB` or `0xRRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 6 {
            return Err(ColorParseError::Length(digits.len()));
        }
        // from_str_radix would also take a leading sign.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::NotHex(digits.to_owned()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ColorParseError::NotHex(digits.to_owned()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_prefixes() {
        assert_eq!("336699".parse::<Color>(), Ok(Color(0x336699)));
        assert_eq!("#336699".parse::<Color>(), Ok(Color(0x336699)));
        assert_eq!("0x336699".parse::<Color>(), Ok(Color(0x336699)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("fff".parse::<Color>(), Err(ColorParseError::Length(3)));
        assert_eq!(
            "zzzzzz".parse::<Color>(),
            Err(ColorParseError::NotHex("zzzzzz".into()))
        );
    }

    #[test]
    fn rejects_sign_prefix() {
        assert_eq!(
            "+fffff".parse::<Color>(),
            Err(ColorParseError::NotHex("+fffff".into()))
        );
        assert!("#+12345".parse::<Color>().is_err());
        assert!("0x-12345".parse::<Color>().is_err());
    }

    #[test]
    fn channels_are_normalized() {
        assert_eq!(Color::WHITE.to_rgb(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.to_rgba(), [0.0, 0.0, 0.0, 1.0]);
        let [r, g, b] = Color::from_hex(0x336699).to_rgb();
        assert!((r - 0.2).abs() < 1e-6);
        assert!((g - 0.4).abs() < 1e-6);
        assert!((b - 0.6).abs() < 1e-6);
    }

    #[test]
    fn linear_conversion_keeps_endpoints() {
        assert_eq!(Color::BLACK.to_linear_rgb(), [0.0, 0.0, 0.0]);
        let [r, g, b] = Color::WHITE.to_linear_rgb();
        assert!((r - 1.0).abs() < 1e-6 && (g - 1.0).abs() < 1e-6 && (b - 1.0).abs() < 1e-6);
        let [grey, _, _] = Color::from_hex(0x888888).to_linear_rgb();
        assert!((grey - 0.2462).abs() < 1e-3);
    }

    #[test]
    fn display_round_trips() {
        let c = Color(0x00ff00);
        assert_eq!(c.to_string(), "#00ff00");
        assert_eq!(c.to_string().parse::<Color>(), Ok(c));
    }
}
