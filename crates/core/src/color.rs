//! sRGB color type used for glyph tints and glare highlights.
//!
//! Colors serialize as `"#rrggbb"` hex strings so scenes and traces stay
//! readable. CSS output adds alpha through [`Srgb::css_rgba`].

use crate::error::FxError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const WHITE: Srgb = Srgb { r: 1.0, g: 1.0, b: 1.0 };

    /// Parses `"#rrggbb"` or `"rrggbb"`, case insensitive.
    pub fn from_hex(hex: &str) -> Result<Srgb, FxError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(FxError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, label: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| FxError::InvalidColor(format!("invalid {label} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Quantized 8-bit channels, clamped.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// CSS `rgba(r, g, b, a)` with alpha clamped to [0, 1].
    pub fn css_rgba(self, alpha: f64) -> String {
        let [r, g, b] = self.to_rgb8();
        let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
        format!("rgba({r}, {g}, {b}, {a:.3})")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let a = Srgb::from_hex("#9ca3af").unwrap();
        let b = Srgb::from_hex("9CA3AF").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rgb8(), [0x9c, 0xa3, 0xaf]);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(Srgb::from_hex("#fff"), Err(FxError::InvalidColor(_))));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Srgb::from_hex("#gg0000").is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input_without_panicking() {
        assert!(Srgb::from_hex("€€").is_err());
    }

    #[test]
    fn to_hex_round_trips() {
        assert_eq!(Srgb::from_hex("#3b82f6").unwrap().to_hex(), "#3b82f6");
    }

    #[test]
    fn css_rgba_formats_and_clamps_alpha() {
        assert_eq!(Srgb::WHITE.css_rgba(0.9), "rgba(255, 255, 255, 0.900)");
        assert_eq!(Srgb::WHITE.css_rgba(3.0), "rgba(255, 255, 255, 1.000)");
        assert_eq!(Srgb::WHITE.css_rgba(f64::NAN), "rgba(255, 255, 255, 0.000)");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let c = Srgb::from_hex("#4b5563").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#4b5563\"");
        let back: Srgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_hex(), "#4b5563");
    }

    #[test]
    fn deserialize_rejects_bad_hex() {
        assert!(serde_json::from_str::<Srgb>("\"nope\"").is_err());
    }
}
