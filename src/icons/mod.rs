//! Icon lookup and rasterization
//!
//! Icons come from a single glyph font plus a metadata file mapping names
//! (and aliases) to codepoints. The index and the font bytes are loaded
//! lazily, cached for the process lifetime, and shared read-only between
//! renders. Over 10,000 icons are available; see
//! <https://pictogrammers.com/library/mdi/>.

pub mod index;
pub mod raster;

use std::path::PathBuf;
use std::sync::OnceLock;

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::fonts::{FontError, FontStore};

pub use index::IconIndex;
pub use raster::render_icon;

/// Errors that can occur during icon lookup or rasterization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IconError {
    /// The metadata file could not be read or parsed. Fatal for icon
    /// rendering until the asset is fixed and the process restarted.
    #[error("failed to load icon metadata: {message}")]
    Metadata { message: String },

    /// The icon font file could not be read
    #[error(transparent)]
    Font(#[from] FontError),

    /// The icon font bytes are not a usable font
    #[error("failed to parse icon font: {message}")]
    FontParse { message: String },

    /// The requested name is not in the index
    #[error("icon '{name}' not found; search icons at https://pictogrammers.com/library/mdi/")]
    NotFound { name: String },

    /// The indexed codepoint is not a valid glyph codepoint
    #[error("invalid codepoint '{codepoint}' for icon '{name}'")]
    Codepoint { name: String, codepoint: String },
}

/// Anything that can turn an icon name into a rasterized glyph image
///
/// This is the seam handlers draw through; tests substitute an in-memory
/// implementation so rendering logic can be exercised without font assets.
pub trait IconSource {
    /// Rasterize `name` as a `size` x `size` image in the given color
    fn render(&self, name: &str, size: u32, color: Rgba<u8>) -> Result<RgbaImage, IconError>;
}

type IndexLoader = Box<dyn Fn() -> Result<IconIndex, IconError> + Send + Sync>;

/// Process-wide icon state: the lazily-built name index plus the glyph font
///
/// Both pieces are computed once on first use, errors included, and never
/// invalidated. The loader is injected so tests can substitute a small
/// in-memory metadata table for the real asset.
pub struct IconLibrary {
    index_loader: IndexLoader,
    index: OnceLock<Result<IconIndex, IconError>>,
    font: FontStore,
}

impl std::fmt::Debug for IconLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconLibrary")
            .field("index", &self.index.get().map(|r| r.is_ok()))
            .finish_non_exhaustive()
    }
}

impl IconLibrary {
    /// Create a library backed by asset files
    pub fn new(metadata_path: PathBuf, font_path: PathBuf) -> Self {
        Self::with_loader(move || IconIndex::load(&metadata_path), FontStore::new(font_path))
    }

    /// Create a library with an injected index loader and font store
    pub fn with_loader(
        loader: impl Fn() -> Result<IconIndex, IconError> + Send + Sync + 'static,
        font: FontStore,
    ) -> Self {
        Self {
            index_loader: Box::new(loader),
            index: OnceLock::new(),
            font,
        }
    }

    /// Get the icon index, building it on first call
    ///
    /// The loader runs at most once per library; later calls reuse the
    /// cached result, a cached failure included.
    pub fn index(&self) -> Result<&IconIndex, IconError> {
        self.index
            .get_or_init(|| (self.index_loader)())
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl IconSource for IconLibrary {
    fn render(&self, name: &str, size: u32, color: Rgba<u8>) -> Result<RgbaImage, IconError> {
        let index = self.index()?;
        raster::render_icon(index, &self.font, name, size, color)
    }
}
