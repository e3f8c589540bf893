//! Pixel-level drawing primitives
//!
//! Shared helpers for the shape and text handlers: alpha blending, filled
//! and stroked rectangles, Bresenham lines, and single-line text runs.
//! Everything clips silently at the canvas edges.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Source-over blend of `color` onto one pixel with extra coverage
pub(crate) fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let alpha = (color.0[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let inv = 1.0 - alpha;
    for channel in 0..3 {
        let blended = color.0[channel] as f32 * alpha + dst.0[channel] as f32 * inv;
        dst.0[channel] = blended.round() as u8;
    }
    let out_alpha = alpha * 255.0 + dst.0[3] as f32 * inv;
    dst.0[3] = out_alpha.round() as u8;
}

/// Fill the inclusive rectangle between two corner points
pub(crate) fn fill_rect(
    canvas: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba<u8>,
) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            blend_pixel(canvas, x, y, color, 1.0);
        }
    }
}

/// Stroke the inclusive rectangle border, `width` pixels growing inward
pub(crate) fn stroke_rect(
    canvas: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba<u8>,
    width: u32,
) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    for ring in 0..width as i32 {
        let (ix0, iy0) = (x0 + ring, y0 + ring);
        let (ix1, iy1) = (x1 - ring, y1 - ring);
        if ix0 > ix1 || iy0 > iy1 {
            break;
        }
        for x in ix0..=ix1 {
            blend_pixel(canvas, x, iy0, color, 1.0);
            blend_pixel(canvas, x, iy1, color, 1.0);
        }
        for y in iy0..=iy1 {
            blend_pixel(canvas, ix0, y, color, 1.0);
            blend_pixel(canvas, ix1, y, color, 1.0);
        }
    }
}

/// Draw a line between two points with the given stroke width (Bresenham)
pub(crate) fn draw_line(
    canvas: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba<u8>,
    width: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    let pad = width as i32 / 2;

    loop {
        // A square pen keeps thick diagonals gap-free
        for py in (y - pad)..(y - pad + width as i32) {
            for px in (x - pad)..(x - pad + width as i32) {
                blend_pixel(canvas, px, py, color, 1.0);
            }
        }
        if x == x1 && y == y1 {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Measure the advance width of a single text line at the given pixel size
pub(crate) fn measure_text(face: &FontRef<'_>, text: &str, size: f32) -> f32 {
    let scaled = face.as_scaled(PxScale::from(size));
    text.chars()
        .map(|ch| scaled.h_advance(face.glyph_id(ch)))
        .sum()
}

/// Draw a single text line with its top-left corner at `(x, y)`
///
/// Anti-aliased (coverage blended), unlike icon glyphs. Returns the advance
/// width so callers can chain colored runs on one baseline.
pub(crate) fn draw_text(
    canvas: &mut RgbaImage,
    face: &FontRef<'_>,
    x: i32,
    y: i32,
    text: &str,
    size: f32,
    color: Rgba<u8>,
) -> f32 {
    let scaled = face.as_scaled(PxScale::from(size));
    let ascent = scaled.ascent();
    let mut pen = 0.0f32;

    for ch in text.chars() {
        let glyph_id = face.glyph_id(ch);
        let glyph = glyph_id.with_scale_and_position(
            PxScale::from(size),
            ab_glyph::point(x as f32 + pen, y as f32 + ascent),
        );
        if let Some(outlined) = face.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                blend_pixel(
                    canvas,
                    bounds.min.x as i32 + gx as i32,
                    bounds.min.y as i32 + gy as i32,
                    color,
                    coverage,
                );
            });
        }
        pen += scaled.h_advance(glyph_id);
    }

    pen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_blend_opaque_replaces_pixel() {
        let mut img = canvas();
        blend_pixel(&mut img, 2, 3, Rgba([255, 0, 0, 255]), 1.0);
        assert_eq!(img.get_pixel(2, 3), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_blend_out_of_bounds_is_noop() {
        let mut img = canvas();
        blend_pixel(&mut img, -1, 0, Rgba([255, 0, 0, 255]), 1.0);
        blend_pixel(&mut img, 10, 10, Rgba([255, 0, 0, 255]), 1.0);
        assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_blend_half_coverage_mixes() {
        let mut img = canvas();
        blend_pixel(&mut img, 0, 0, Rgba([0, 0, 0, 255]), 0.5);
        let pixel = img.get_pixel(0, 0);
        assert_eq!(pixel.0[0], 128);
    }

    #[test]
    fn test_fill_rect_corners_swappable() {
        let mut img = canvas();
        fill_rect(&mut img, 4, 4, 1, 1, Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(1, 1), &Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(4, 4), &Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(5, 5), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut img = canvas();
        stroke_rect(&mut img, 0, 0, 6, 6, Rgba([0, 0, 0, 255]), 1);
        assert_eq!(img.get_pixel(0, 3), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(6, 6), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(3, 3), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut img = canvas();
        draw_line(&mut img, 1, 5, 8, 5, Rgba([0, 128, 0, 255]), 1);
        for x in 1..=8 {
            assert_eq!(img.get_pixel(x, 5), &Rgba([0, 128, 0, 255]));
        }
        assert_eq!(img.get_pixel(0, 5), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_draw_line_single_point() {
        let mut img = canvas();
        draw_line(&mut img, 3, 3, 3, 3, Rgba([0, 0, 0, 255]), 1);
        assert_eq!(img.get_pixel(3, 3), &Rgba([0, 0, 0, 255]));
    }
}
