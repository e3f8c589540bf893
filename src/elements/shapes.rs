//! Shape element handlers
//!
//! Plain lines and rectangles, drawn with the pixel primitives in
//! [`crate::raster`]. Coordinates go through the coordinate resolver so
//! percentages work the same as for icons and text.

use crate::raster;
use crate::registry::{int_field, str_field, DrawError, DrawingContext, Element};

use super::resolve_color;

/// Draw a straight line between two points
///
/// Fields: `x_start`/`y_start`/`x_end`/`y_end`, optional `color`/`fill`
/// (default black) and `width` (default 1).
pub(crate) fn draw_line(ctx: &mut DrawingContext<'_>, element: &Element) -> Result<(), DrawError> {
    let x0 = ctx.coords.parse_x(&element["x_start"])?;
    let y0 = ctx.coords.parse_y(&element["y_start"])?;
    let x1 = ctx.coords.parse_x(&element["x_end"])?;
    let y1 = ctx.coords.parse_y(&element["y_end"])?;

    let color = resolve_color(ctx, element)?;
    let width = int_field(element, "width").unwrap_or(1).max(1) as u32;

    raster::draw_line(&mut ctx.canvas, x0, y0, x1, y1, color, width);
    ctx.pos_y = y0.max(y1);

    Ok(())
}

/// Draw a rectangle between two corner points
///
/// Fields: `x_start`/`y_start`/`x_end`/`y_end`, optional `fill` (no fill
/// when absent), `outline` (default black) and `width` (outline thickness,
/// default 1).
pub(crate) fn draw_rectangle(
    ctx: &mut DrawingContext<'_>,
    element: &Element,
) -> Result<(), DrawError> {
    let x0 = ctx.coords.parse_x(&element["x_start"])?;
    let y0 = ctx.coords.parse_y(&element["y_start"])?;
    let x1 = ctx.coords.parse_x(&element["x_end"])?;
    let y1 = ctx.coords.parse_y(&element["y_end"])?;

    let fill = str_field(element, "fill")
        .map(|token| ctx.colors.resolve(token))
        .transpose()?;
    let outline = ctx
        .colors
        .resolve(str_field(element, "outline").unwrap_or("black"))?;
    let width = int_field(element, "width").unwrap_or(1).max(1) as u32;

    if let Some(fill) = fill {
        raster::fill_rect(&mut ctx.canvas, x0, y0, x1, y1, fill);
    }
    raster::stroke_rect(&mut ctx.canvas, x0, y0, x1, y1, outline, width);
    ctx.pos_y = y0.max(y1);

    Ok(())
}
