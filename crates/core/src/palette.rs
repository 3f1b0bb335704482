//! Named glyph sets and tint colors for particle fields.
//!
//! A [`GlyphPalette`] pairs a list of glyphs with a list of tints. Particles
//! draw one of each at creation and keep them for their lifetime.

use crate::color::Srgb;
use crate::error::FxError;
use serde::{Deserialize, Serialize};

/// Registered glyph set names.
const GLYPH_SET_NAMES: &[&str] = &["currency", "majors", "crypto"];

/// Registered tint names.
const TINT_NAMES: &[&str] = &["slate", "ocean", "ember"];

/// A single drawable symbol with a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub symbol: String,
    pub name: String,
}

impl Glyph {
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Glyphs plus tint colors. Both lists are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPalette {
    glyphs: Vec<Glyph>,
    tints: Vec<Srgb>,
}

impl GlyphPalette {
    /// Builds a palette, rejecting empty glyph or tint lists.
    pub fn new(glyphs: Vec<Glyph>, tints: Vec<Srgb>) -> Result<Self, FxError> {
        if glyphs.is_empty() {
            return Err(FxError::InvalidParam {
                name: "glyphs".into(),
                reason: "palette requires at least 1 glyph".into(),
            });
        }
        if tints.is_empty() {
            return Err(FxError::InvalidParam {
                name: "tints".into(),
                reason: "palette requires at least 1 tint".into(),
            });
        }
        Ok(Self { glyphs, tints })
    }

    /// Resolves `"<glyphs>"` or `"<glyphs>/<tint>"`, e.g. `"majors/ocean"`.
    /// The tint defaults to `slate`.
    pub fn from_name(name: &str) -> Result<Self, FxError> {
        let (set, tint) = name.split_once('/').unwrap_or((name, "slate"));
        Self::new(glyph_set(set)?, tint_set(tint)?)
    }

    /// All glyph set names accepted by [`GlyphPalette::from_name`].
    pub fn list_glyph_sets() -> &'static [&'static str] {
        GLYPH_SET_NAMES
    }

    /// All tint names accepted after the `/` in [`GlyphPalette::from_name`].
    pub fn list_tints() -> &'static [&'static str] {
        TINT_NAMES
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn tints(&self) -> &[Srgb] {
        &self.tints
    }

    /// The eleven currency symbols.
    pub fn currency() -> Self {
        Self {
            glyphs: currency_glyphs(),
            tints: slate(),
        }
    }
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self::currency()
    }
}

fn currency_glyphs() -> Vec<Glyph> {
    [
        ("$", "dollar"),
        ("€", "euro"),
        ("¥", "yen"),
        ("£", "pound"),
        ("₹", "rupee"),
        ("₩", "won"),
        ("฿", "baht"),
        ("₽", "ruble"),
        ("₺", "lira"),
        ("د.إ", "dirham"),
        ("₿", "bitcoin"),
    ]
    .iter()
    .map(|(s, n)| Glyph::new(s, n))
    .collect()
}

fn glyph_set(name: &str) -> Result<Vec<Glyph>, FxError> {
    match name {
        "currency" => Ok(currency_glyphs()),
        "majors" => Ok(vec![
            Glyph::new("$", "dollar"),
            Glyph::new("€", "euro"),
            Glyph::new("¥", "yen"),
            Glyph::new("£", "pound"),
        ]),
        "crypto" => Ok(vec![
            Glyph::new("₿", "bitcoin"),
            Glyph::new("Ξ", "ether"),
            Glyph::new("Ł", "litecoin"),
        ]),
        _ => Err(FxError::UnknownPalette(name.to_string())),
    }
}

fn slate() -> Vec<Srgb> {
    hexes(&["#9ca3af", "#4b5563"])
}

fn tint_set(name: &str) -> Result<Vec<Srgb>, FxError> {
    match name {
        "slate" => Ok(slate()),
        "ocean" => Ok(hexes(&["#3b82f6", "#6366f1", "#0ea5e9"])),
        "ember" => Ok(hexes(&["#f59e0b", "#ef4444", "#f97316"])),
        _ => Err(FxError::UnknownPalette(name.to_string())),
    }
}

/// Parses compile-time hex literals. Any malformed entry is skipped.
fn hexes(list: &[&str]) -> Vec<Srgb> {
    list.iter().filter_map(|h| Srgb::from_hex(h).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_has_eleven_glyphs() {
        let p = GlyphPalette::currency();
        assert_eq!(p.glyphs().len(), 11);
        assert!(p.glyphs().iter().any(|g| g.name == "bitcoin"));
    }

    #[test]
    fn from_name_without_tint_uses_slate() {
        let p = GlyphPalette::from_name("majors").unwrap();
        assert_eq!(p.glyphs().len(), 4);
        assert_eq!(p.tints()[0].to_hex(), "#9ca3af");
    }

    #[test]
    fn from_name_with_tint() {
        let p = GlyphPalette::from_name("crypto/ember").unwrap();
        assert_eq!(p.glyphs().len(), 3);
        assert_eq!(p.tints().len(), 3);
    }

    #[test]
    fn every_listed_combination_resolves() {
        for set in GlyphPalette::list_glyph_sets() {
            for tint in GlyphPalette::list_tints() {
                let name = format!("{set}/{tint}");
                assert!(GlyphPalette::from_name(&name).is_ok(), "{name} failed");
            }
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            GlyphPalette::from_name("emoji"),
            Err(FxError::UnknownPalette(n)) if n == "emoji"
        ));
        assert!(matches!(
            GlyphPalette::from_name("currency/neon"),
            Err(FxError::UnknownPalette(n)) if n == "neon"
        ));
    }

    #[test]
    fn new_rejects_empty_lists() {
        assert!(GlyphPalette::new(vec![], slate()).is_err());
        assert!(GlyphPalette::new(currency_glyphs(), vec![]).is_err());
    }
}
