//! drawcustom - declarative bitmap rendering for e-paper dashboards
//!
//! Renders an RGBA bitmap from a JSON-like list of "elements" (icons, text
//! runs, shapes) positioned by coordinate and anchor rules. Callers describe
//! what to draw; handlers resolve colors, coordinates and icon glyphs and
//! paint onto a single shared canvas in list order.
//!
//! # Example
//!
//! ```rust
//! use drawcustom::{generate_image, ImageRequest};
//!
//! let request: ImageRequest = serde_json::from_str(
//!     r#"{
//!         "width": 296,
//!         "height": 128,
//!         "elements": [
//!             {"type": "rectangle", "x_start": 10, "y_start": 10,
//!              "x_end": 120, "y_end": 60, "fill": "red"}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let image = generate_image(&request).unwrap();
//! assert_eq!(image.dimensions(), (296, 128));
//! ```

pub mod color;
pub mod coords;
pub mod elements;
pub mod fonts;
pub mod icons;
pub mod palette;
mod raster;
pub mod registry;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

pub use color::{ColorError, ColorResolver};
pub use coords::{Anchor, CoordError, CoordResolver};
pub use elements::text::{parse_colored_text, TextSegment};
pub use fonts::{FontError, FontStore, TextSource};
pub use icons::{IconError, IconIndex, IconLibrary, IconSource};
pub use palette::{Palette, PaletteError};
pub use registry::{DrawError, DrawingContext, Element, Handler, HandlerRegistry};

/// Errors that can occur during a full image render
#[derive(Error, Debug)]
pub enum RenderError {
    /// The background color token did not resolve
    #[error("invalid background color: {0}")]
    Background(#[from] ColorError),

    /// One element failed hard under the abort policy
    #[error("element {index} ('{type_tag}'): {source}")]
    Element {
        index: usize,
        type_tag: String,
        source: DrawError,
    },
}

/// What to do when one element fails during a render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the whole render on the first failing element
    #[default]
    Abort,
    /// Log the failure and continue with the remaining elements
    Skip,
}

/// Locations of the font and icon assets
#[derive(Debug, Clone)]
pub struct AssetPaths {
    /// Icon metadata JSON (name/codepoint/alias records)
    pub icon_metadata: PathBuf,
    /// Icon glyph font
    pub icon_font: PathBuf,
    /// Font used for text elements
    pub text_font: PathBuf,
}

impl AssetPaths {
    /// Standard asset layout inside a directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            icon_metadata: dir.join("materialdesignicons-webfont_meta.json"),
            icon_font: dir.join("materialdesignicons-webfont.ttf"),
            text_font: dir.join("DejaVuSans.ttf"),
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("assets"))
    }
}

/// Configuration for the render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Asset locations
    pub assets: AssetPaths,
    /// Palette with named-color overrides
    pub palette: Palette,
    /// Per-element failure policy
    pub on_error: ErrorPolicy,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset locations
    pub fn with_assets(mut self, assets: AssetPaths) -> Self {
        self.assets = assets;
        self
    }

    /// Set the palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the per-element failure policy
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }
}

/// One image to render: canvas size, background, and the element list
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRequest {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Background color token (default white)
    #[serde(default = "default_background")]
    pub background: String,
    /// Elements, drawn strictly in list order
    #[serde(default)]
    pub elements: Vec<Element>,
}

fn default_background() -> String {
    "white".to_string()
}

/// Long-lived rendering state: handler registry, resolvers and asset caches
///
/// Build one `Renderer` per process and reuse it; the icon index and font
/// bytes are loaded lazily on first use and cached across renders.
pub struct Renderer {
    registry: HandlerRegistry,
    colors: ColorResolver,
    icons: IconLibrary,
    text_font: FontStore,
    on_error: ErrorPolicy,
}

impl Renderer {
    /// Create a renderer from a configuration
    pub fn new(config: RenderConfig) -> Self {
        Self {
            registry: HandlerRegistry::with_builtins(),
            colors: ColorResolver::with_palette(&config.palette),
            icons: IconLibrary::new(config.assets.icon_metadata, config.assets.icon_font),
            text_font: FontStore::new(config.assets.text_font),
            on_error: config.on_error,
        }
    }

    /// Render one image request to an RGBA bitmap
    pub fn render(&self, request: &ImageRequest) -> Result<RgbaImage, RenderError> {
        let background = self.colors.resolve(&request.background)?;
        let canvas = RgbaImage::from_pixel(request.width, request.height, background);

        let mut ctx = DrawingContext::new(canvas, &self.colors, &self.icons, &self.text_font);

        for (index, element) in request.elements.iter().enumerate() {
            if let Err(source) = self.registry.dispatch(&mut ctx, element) {
                let type_tag = element
                    .get("type")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("<untyped>")
                    .to_string();
                match self.on_error {
                    ErrorPolicy::Abort => {
                        return Err(RenderError::Element {
                            index,
                            type_tag,
                            source,
                        })
                    }
                    ErrorPolicy::Skip => {
                        warn!(index, type_tag = %type_tag, error = %source, "skipping element");
                    }
                }
            }
        }

        Ok(ctx.canvas)
    }
}

/// Render an image request with the default configuration
///
/// Convenience entry point; hosts that render repeatedly should build a
/// [`Renderer`] once and call [`Renderer::render`] instead.
pub fn generate_image(request: &ImageRequest) -> Result<RgbaImage, RenderError> {
    Renderer::new(RenderConfig::default()).render(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use serde_json::json;

    fn request(value: serde_json::Value) -> ImageRequest {
        serde_json::from_value(value).expect("Should deserialize")
    }

    #[test]
    fn test_render_background_only() {
        let image = generate_image(&request(json!({
            "width": 296, "height": 128
        })))
        .expect("Should render");
        assert_eq!(image.dimensions(), (296, 128));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_render_rectangle_element() {
        let image = generate_image(&request(json!({
            "width": 64, "height": 64, "background": "white",
            "elements": [
                {"type": "rectangle", "x_start": 8, "y_start": 8,
                 "x_end": 40, "y_end": 40, "fill": "red", "outline": "black"}
            ]
        })))
        .expect("Should render");
        assert_eq!(image.get_pixel(20, 20), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(8, 20), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(50, 50), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_invalid_background_color() {
        let result = generate_image(&request(json!({
            "width": 10, "height": 10, "background": "not-a-color"
        })));
        assert!(matches!(result, Err(RenderError::Background(_))));
    }

    #[test]
    fn test_unknown_element_type_aborts() {
        let result = generate_image(&request(json!({
            "width": 10, "height": 10,
            "elements": [{"type": "hologram", "x": 0, "y": 0}]
        })));
        let err = result.expect_err("Should fail");
        assert!(matches!(
            err,
            RenderError::Element {
                index: 0,
                source: DrawError::UnknownElementType { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_skip_policy_renders_valid_elements() {
        let config = RenderConfig::new().with_error_policy(ErrorPolicy::Skip);
        let image = Renderer::new(config)
            .render(&request(json!({
                "width": 32, "height": 32,
                "elements": [
                    {"type": "hologram"},
                    {"type": "line", "x_start": 0, "y_start": 16,
                     "x_end": 31, "y_end": 16, "color": "blue"}
                ]
            })))
            .expect("Should render");
        assert_eq!(image.get_pixel(10, 16), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_percentage_positioned_line() {
        let image = generate_image(&request(json!({
            "width": 100, "height": 50,
            "elements": [
                {"type": "line", "x_start": "0%", "y_start": "50%",
                 "x_end": 99, "y_end": "50%"}
            ]
        })))
        .expect("Should render");
        assert_eq!(image.get_pixel(50, 25), &Rgba([0, 0, 0, 255]));
    }
}
