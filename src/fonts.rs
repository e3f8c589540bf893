//! Lazy font asset loading
//!
//! Font files are read once per process and the raw bytes cached, errors
//! included: a missing or unreadable font stays broken until the asset is
//! fixed and the process restarted. `ab_glyph` faces are parsed from these
//! bytes at each use site, so no face instance is cached across sizes.

use std::path::PathBuf;
use std::sync::OnceLock;

use ab_glyph::FontRef;
use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Errors that can occur when loading or parsing a font asset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    #[error("failed to load font '{path}': {message}")]
    Load { path: String, message: String },

    #[error("failed to parse font: {message}")]
    Parse { message: String },
}

/// Anything that can measure and draw single-line text runs
///
/// This is the seam text handlers draw through; tests substitute an
/// in-memory implementation so layout logic can be exercised without font
/// assets. The shipped implementation is [`FontStore`].
pub trait TextSource {
    /// Advance width of `text` at the given pixel size
    fn measure(&self, text: &str, size: f32) -> Result<f32, FontError>;

    /// Draw `text` with its top-left corner at `(x, y)`
    ///
    /// Returns the advance width so callers can chain runs on one baseline.
    fn draw(
        &self,
        canvas: &mut RgbaImage,
        x: i32,
        y: i32,
        text: &str,
        size: f32,
        color: Rgba<u8>,
    ) -> Result<f32, FontError>;
}

/// A lazily-loaded source of font bytes
#[derive(Debug)]
pub struct FontStore {
    path: PathBuf,
    bytes: OnceLock<Result<Vec<u8>, FontError>>,
}

impl FontStore {
    /// Create a store backed by a font file, loaded on first use
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            bytes: OnceLock::new(),
        }
    }

    /// Create a store with pre-loaded bytes (used by tests)
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Ok(bytes));
        Self {
            path: PathBuf::new(),
            bytes: cell,
        }
    }

    /// Get the font bytes, reading the file on first call
    pub fn bytes(&self) -> Result<&[u8], FontError> {
        let path = self.path.clone();
        self.bytes
            .get_or_init(|| {
                std::fs::read(&path).map_err(|err| FontError::Load {
                    path: path.display().to_string(),
                    message: err.to_string(),
                })
            })
            .as_ref()
            .map(Vec::as_slice)
            .map_err(Clone::clone)
    }

    /// Parse a face over the cached bytes; faces are cheap views
    fn face(&self) -> Result<FontRef<'_>, FontError> {
        FontRef::try_from_slice(self.bytes()?).map_err(|err| FontError::Parse {
            message: err.to_string(),
        })
    }
}

impl TextSource for FontStore {
    fn measure(&self, text: &str, size: f32) -> Result<f32, FontError> {
        Ok(crate::raster::measure_text(&self.face()?, text, size))
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        x: i32,
        y: i32,
        text: &str,
        size: f32,
        color: Rgba<u8>,
    ) -> Result<f32, FontError> {
        Ok(crate::raster::draw_text(
            canvas,
            &self.face()?,
            x,
            y,
            text,
            size,
            color,
        ))
    }
}
