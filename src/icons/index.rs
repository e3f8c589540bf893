//! Icon name index
//!
//! Maps every icon name and alias from the Material Design Icons metadata
//! file to its glyph codepoint. The index is built once and never mutated.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::IconError;

/// One record from the icon metadata file
///
/// The metadata carries more fields than these; everything else is ignored.
/// Records missing a name or codepoint are skipped rather than rejected so a
/// metadata update cannot take down the whole index.
#[derive(Debug, Clone, Deserialize)]
pub struct IconRecord {
    pub name: Option<String>,
    pub codepoint: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Immutable mapping from icon name (canonical or alias) to codepoint
#[derive(Debug, Clone, Default)]
pub struct IconIndex {
    codepoints: HashMap<String, String>,
}

impl IconIndex {
    /// Build an index from metadata records
    pub fn from_records(records: impl IntoIterator<Item = IconRecord>) -> Self {
        let mut codepoints = HashMap::new();
        for record in records {
            let (Some(name), Some(codepoint)) = (record.name, record.codepoint) else {
                continue;
            };
            if name.is_empty() || codepoint.is_empty() {
                continue;
            }
            for alias in record.aliases {
                if !alias.is_empty() {
                    codepoints.insert(alias, codepoint.clone());
                }
            }
            codepoints.insert(name, codepoint);
        }
        Self { codepoints }
    }

    /// Build an index from a JSON array of metadata records
    pub fn from_json_str(json: &str) -> Result<Self, IconError> {
        let records: Vec<IconRecord> =
            serde_json::from_str(json).map_err(|err| IconError::Metadata {
                message: err.to_string(),
            })?;
        Ok(Self::from_records(records))
    }

    /// Load an index from a metadata file
    pub fn load(path: &Path) -> Result<Self, IconError> {
        let content = std::fs::read_to_string(path).map_err(|err| IconError::Metadata {
            message: format!("{}: {}", path.display(), err),
        })?;
        Self::from_json_str(&content)
    }

    /// Look up the codepoint for an icon name or alias
    pub fn codepoint(&self, name: &str) -> Option<&str> {
        self.codepoints.get(name).map(String::as_str)
    }

    /// Number of indexed names (aliases included)
    pub fn len(&self) -> usize {
        self.codepoints.len()
    }

    /// Whether the index holds no names
    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }
}
