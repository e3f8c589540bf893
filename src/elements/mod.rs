//! Built-in element handlers
//!
//! Each submodule draws one family of element types. Registration is an
//! explicit startup step so the full element vocabulary is visible in one
//! place.

pub mod icon;
pub mod shapes;
pub mod text;

use image::Rgba;

use crate::registry::{str_field, DrawError, DrawingContext, Element, HandlerRegistry};

/// Register every built-in element handler
pub fn register_builtins(registry: &mut HandlerRegistry) {
    registry.register("icon", &["x", "y", "value", "size"], icon::draw_icon);
    registry.register(
        "icon_sequence",
        &["x", "y", "icons", "size"],
        icon::draw_icon_sequence,
    );
    registry.register("text", &["x", "value"], text::draw_text);
    registry.register(
        "line",
        &["x_start", "y_start", "x_end", "y_end"],
        shapes::draw_line,
    );
    registry.register(
        "rectangle",
        &["x_start", "y_start", "x_end", "y_end"],
        shapes::draw_rectangle,
    );
}

/// The element's color token: `color`, then `fill`, then black
pub(crate) fn color_token<'a>(element: &'a Element) -> &'a str {
    str_field(element, "color")
        .or_else(|| str_field(element, "fill"))
        .unwrap_or("black")
}

/// Resolve the element's color with the standard precedence
pub(crate) fn resolve_color(
    ctx: &DrawingContext<'_>,
    element: &Element,
) -> Result<Rgba<u8>, DrawError> {
    Ok(ctx.colors.resolve(color_token(element))?)
}
