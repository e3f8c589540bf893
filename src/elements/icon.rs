//! Icon element handlers
//!
//! Draws single glyph icons and evenly-spaced icon sequences from the
//! bundled icon font. Icon names accept an optional `mdi:` prefix; over
//! 10,000 names and aliases resolve through the icon index.

use image::imageops::overlay;
use tracing::warn;

use crate::coords::Anchor;
use crate::registry::{
    int_field, require_size, require_str, str_field, DrawError, DrawingContext, Element,
};

use super::resolve_color;

/// Direction an icon sequence advances in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Parse a direction token, degrading to `right` with a warning
    fn parse_lenient(token: &str) -> Self {
        match token {
            "right" => Direction::Right,
            "left" => Direction::Left,
            "up" => Direction::Up,
            "down" => Direction::Down,
            other => {
                warn!(direction = other, "unknown direction, using right");
                Direction::Right
            }
        }
    }
}

/// Draw a single icon
///
/// Fields: `value` (icon name), `x`/`y` (numbers or percentages), `size`,
/// optional `color`/`fill` (default black) and `anchor` (default `mm`).
pub(crate) fn draw_icon(ctx: &mut DrawingContext<'_>, element: &Element) -> Result<(), DrawError> {
    let x = ctx.coords.parse_x(&element["x"])?;
    let y = ctx.coords.parse_y(&element["y"])?;

    let name = require_str(element, "value")?;
    let size = require_size(element, "size")?;
    let color = resolve_color(ctx, element)?;
    let anchor = str_field(element, "anchor")
        .map(Anchor::parse_lenient)
        .unwrap_or(Anchor::MiddleMiddle);

    let icon = ctx.icons.render(name, size, color)?;

    let (paste_x, paste_y) = anchor.paste_origin(x, y, size as i32, size as i32);
    overlay(&mut ctx.canvas, &icon, paste_x as i64, paste_y as i64);
    ctx.pos_y = paste_y + size as i32;

    Ok(())
}

/// Draw a sequence of icons with consistent spacing
///
/// Fields: `icons` (list of names), `x`/`y` (start position), `size`,
/// optional `spacing` (default `size / 4`), `direction` (right/left/up/down,
/// default right), `color`/`fill`, and `anchor` (only `mm` centers; anything
/// else behaves as top-left).
///
/// Icons that fail to resolve are skipped with a warning; the rest of the
/// sequence still renders.
pub(crate) fn draw_icon_sequence(
    ctx: &mut DrawingContext<'_>,
    element: &Element,
) -> Result<(), DrawError> {
    let x_start = ctx.coords.parse_x(&element["x"])?;
    let y_start = ctx.coords.parse_y(&element["y"])?;

    let size = require_size(element, "size")?;
    let spacing = int_field(element, "spacing").unwrap_or(size as i64 / 4) as i32;
    let color = resolve_color(ctx, element)?;
    let anchor = str_field(element, "anchor")
        .map(Anchor::parse_lenient)
        .unwrap_or(Anchor::MiddleMiddle);
    let direction = str_field(element, "direction")
        .map(Direction::parse_lenient)
        .unwrap_or(Direction::Right);

    let names = element["icons"]
        .as_array()
        .ok_or_else(|| DrawError::InvalidField {
            field: "icons".to_string(),
            expected: "an array of icon names",
        })?;

    let step = size as i32 + spacing;
    let (mut current_x, mut current_y) = (x_start, y_start);
    let (mut max_x, mut max_y) = (x_start, y_start);

    for name in names {
        let Some(name) = name.as_str() else {
            warn!(?name, "skipping non-string icon name");
            continue;
        };

        let icon = match ctx.icons.render(name, size, color) {
            Ok(icon) => icon,
            Err(err) => {
                warn!(icon = name, error = %err, "skipping icon");
                continue;
            }
        };

        // Only centered placement is meaningful inside a sequence; every
        // other anchor behaves as top-left.
        let (paste_x, paste_y) = if anchor == Anchor::MiddleMiddle {
            (current_x - size as i32 / 2, current_y - size as i32 / 2)
        } else {
            (current_x, current_y)
        };

        overlay(&mut ctx.canvas, &icon, paste_x as i64, paste_y as i64);

        max_x = max_x.max(paste_x + size as i32);
        max_y = max_y.max(paste_y + size as i32);

        match direction {
            Direction::Right => current_x += step,
            Direction::Left => current_x -= step,
            Direction::Down => current_y += step,
            Direction::Up => current_y -= step,
        }
    }

    ctx.pos_y = max_y;
    Ok(())
}
