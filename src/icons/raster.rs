//! Icon glyph rasterization
//!
//! Turns a resolved icon name into a square transparent RGBA image holding a
//! single centered glyph. Coverage is thresholded rather than blended so
//! small icons stay crisp on binary e-paper displays.

use ab_glyph::{Font, FontRef, PxScale};
use image::{Rgba, RgbaImage};

use crate::fonts::FontStore;

use super::{IconError, IconIndex};

/// Coverage at or above this value becomes a fully opaque pixel.
const COVERAGE_THRESHOLD: f32 = 0.5;

/// Rasterize a named icon to a `size` x `size` transparent image
///
/// The name may carry an `mdi:` prefix. The index lookup happens before any
/// font work so an unknown name surfaces as `IconError::NotFound` even when
/// the font asset is unavailable.
///
/// The glyph is centered on its ink box, not on font line metrics, so a
/// glyph with asymmetric bearings can sit a pixel or two away from where a
/// metric-centered layout would put it.
pub fn render_icon(
    index: &IconIndex,
    font: &FontStore,
    name: &str,
    size: u32,
    color: Rgba<u8>,
) -> Result<RgbaImage, IconError> {
    let name = name.strip_prefix("mdi:").unwrap_or(name);

    let codepoint = index.codepoint(name).ok_or_else(|| IconError::NotFound {
        name: name.to_string(),
    })?;

    let glyph_char = u32::from_str_radix(codepoint, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| IconError::Codepoint {
            name: name.to_string(),
            codepoint: codepoint.to_string(),
        })?;

    let bytes = font.bytes()?;
    // Parsed per call; faces are cheap views over the cached bytes.
    let face = FontRef::try_from_slice(bytes).map_err(|err| IconError::FontParse {
        message: err.to_string(),
    })?;

    let mut canvas = RgbaImage::new(size, size);

    let glyph = face
        .glyph_id(glyph_char)
        .with_scale(PxScale::from(size as f32));
    let Some(outlined) = face.outline_glyph(glyph) else {
        // Whitespace or an empty glyph: nothing to draw
        return Ok(canvas);
    };

    // Center the ink box; floor offsets match the anchor math elsewhere.
    let bounds = outlined.px_bounds();
    let offset_x = (size as i32 - bounds.width() as i32) / 2;
    let offset_y = (size as i32 - bounds.height() as i32) / 2;

    outlined.draw(|gx, gy, coverage| {
        if coverage < COVERAGE_THRESHOLD {
            return;
        }
        let px = offset_x + gx as i32;
        let py = offset_y + gy as i32;
        if px >= 0 && py >= 0 && (px as u32) < size && (py as u32) < size {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    });

    Ok(canvas)
}
