//! Palette files for named-color overrides
//!
//! A palette maps additional color tokens to hex values so dashboards can use
//! symbolic names ("night", "accent") or redefine the stock keywords for a
//! particular display. Palettes are TOML files loaded once at startup.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing palette files
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("failed to read palette file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse palette TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A palette mapping color tokens to hex values
#[derive(Debug, Clone, Default)]
pub struct Palette {
    /// Optional name for the palette
    pub name: Option<String>,
    /// Color mappings: token name -> hex color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

impl Palette {
    /// Load a palette from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a palette from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;

        Ok(Palette {
            name: parsed.metadata.and_then(|m| m.name),
            colors: parsed.colors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Kitchen display"

[colors]
accent = "#2196f3"
"##;
        let palette = Palette::from_toml_str(toml_str).expect("Should parse");
        assert_eq!(palette.name, Some("Kitchen display".to_string()));
        assert_eq!(palette.colors.get("accent").map(String::as_str), Some("#2196f3"));
    }

    #[test]
    fn test_parse_without_metadata() {
        let toml_str = r##"
[colors]
accent = "#ff9800"
"##;
        let palette = Palette::from_toml_str(toml_str).expect("Should parse");
        assert_eq!(palette.name, None);
        assert_eq!(palette.colors.len(), 1);
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Palette::from_toml_str("not valid toml {{{{");
        assert!(result.is_err());
    }
}
