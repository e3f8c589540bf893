//! Color token resolution
//!
//! Maps a color token (named keyword, palette override, or hex string) to a
//! concrete RGBA value. Palette overrides are layered over a built-in table
//! of CSS-style names so existing content keeps rendering when a custom
//! palette only redefines a few tokens.

use std::collections::HashMap;

use image::Rgba;
use thiserror::Error;

use crate::palette::Palette;

/// Errors that can occur when resolving a color token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("unrecognized color token: '{token}'")]
    Unrecognized { token: String },

    #[error("invalid hex color: '{token}' (expected 3, 4, 6 or 8 hex digits)")]
    InvalidHex { token: String },
}

/// Built-in named colors. Covers the CSS keywords that show up in e-paper
/// dashboards; anything else can be expressed as hex or a palette entry.
const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("pink", [255, 192, 203, 255]),
    ("brown", [165, 42, 42, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("darkgray", [169, 169, 169, 255]),
    ("darkgrey", [169, 169, 169, 255]),
    ("lightgray", [211, 211, 211, 255]),
    ("lightgrey", [211, 211, 211, 255]),
    ("silver", [192, 192, 192, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("aqua", [0, 255, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("lime", [0, 255, 0, 255]),
    ("navy", [0, 0, 128, 255]),
    ("teal", [0, 128, 128, 255]),
    ("olive", [128, 128, 0, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("gold", [255, 215, 0, 255]),
    ("indigo", [75, 0, 130, 255]),
    ("violet", [238, 130, 238, 255]),
    ("darkred", [139, 0, 0, 255]),
    ("darkgreen", [0, 100, 0, 255]),
    ("darkblue", [0, 0, 139, 255]),
    ("transparent", [0, 0, 0, 0]),
];

/// Resolves color tokens to RGBA values
#[derive(Debug, Clone, Default)]
pub struct ColorResolver {
    /// Palette overrides: token name -> hex color string
    overrides: HashMap<String, String>,
}

impl ColorResolver {
    /// Create a resolver with only the built-in named table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver layering a palette's colors over the built-in table
    pub fn with_palette(palette: &Palette) -> Self {
        Self {
            overrides: palette.colors.clone(),
        }
    }

    /// Resolve a color token to a concrete RGBA value
    ///
    /// Resolution order: palette override, built-in named color, hex literal.
    pub fn resolve(&self, token: &str) -> Result<Rgba<u8>, ColorError> {
        if let Some(hex) = self.overrides.get(token) {
            return parse_hex(hex);
        }

        let lowered = token.to_ascii_lowercase();
        if let Some((_, rgba)) = NAMED_COLORS.iter().find(|(name, _)| *name == lowered) {
            return Ok(Rgba(*rgba));
        }

        if token.starts_with('#') {
            return parse_hex(token);
        }

        Err(ColorError::Unrecognized {
            token: token.to_string(),
        })
    }
}

/// Parse a hex color string with an optional leading `#`
///
/// Accepts 3 (rgb), 4 (rgba), 6 (rrggbb) or 8 (rrggbbaa) hex digits.
/// Short forms expand each nibble (`#f0a` -> `#ff00aa`).
pub fn parse_hex(token: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = token.strip_prefix('#').unwrap_or(token);

    let invalid = || ColorError::InvalidHex {
        token: token.to_string(),
    };

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let nibble = |c: char| c.to_digit(16).unwrap() as u8;

    let channels: Vec<u8> = match digits.len() {
        3 | 4 => digits.chars().map(|c| nibble(c) * 0x11).collect(),
        6 | 8 => digits
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                let hi = nibble(pair[0] as char);
                let lo = nibble(pair[1] as char);
                hi * 16 + lo
            })
            .collect(),
        _ => return Err(invalid()),
    };

    let alpha = channels.get(3).copied().unwrap_or(255);
    Ok(Rgba([channels[0], channels[1], channels[2], alpha]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    #[test]
    fn test_resolve_named_color() {
        let colors = ColorResolver::new();
        assert_eq!(colors.resolve("black").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(colors.resolve("red").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(colors.resolve("White").unwrap(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_resolve_hex_forms() {
        let colors = ColorResolver::new();
        assert_eq!(colors.resolve("#0f0").unwrap(), Rgba([0, 255, 0, 255]));
        assert_eq!(colors.resolve("#0f08").unwrap(), Rgba([0, 255, 0, 136]));
        assert_eq!(colors.resolve("#00ffaa").unwrap(), Rgba([0, 255, 170, 255]));
        assert_eq!(
            colors.resolve("#00FFAA80").unwrap(),
            Rgba([0, 255, 170, 128])
        );
    }

    #[test]
    fn test_resolve_unrecognized_token() {
        let colors = ColorResolver::new();
        assert!(matches!(
            colors.resolve("not-a-color"),
            Err(ColorError::Unrecognized { .. })
        ));
    }

    #[test]
    fn test_resolve_invalid_hex() {
        let colors = ColorResolver::new();
        assert!(matches!(
            colors.resolve("#12345"),
            Err(ColorError::InvalidHex { .. })
        ));
        assert!(matches!(
            colors.resolve("#zzz"),
            Err(ColorError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_palette_override_wins() {
        let palette = Palette::from_toml_str(
            r##"
[colors]
black = "#111111"
night = "#001122"
"##,
        )
        .expect("Should parse");
        let colors = ColorResolver::with_palette(&palette);
        assert_eq!(colors.resolve("black").unwrap(), Rgba([17, 17, 17, 255]));
        assert_eq!(colors.resolve("night").unwrap(), Rgba([0, 17, 34, 255]));
        // Built-ins still reachable for tokens the palette does not define
        assert_eq!(colors.resolve("white").unwrap(), Rgba([255, 255, 255, 255]));
    }
}
