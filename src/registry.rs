//! Element handler registry and drawing context
//!
//! Elements are JSON dictionaries with a `type` tag. The registry maps each
//! tag to a handler plus the fields that must be present before the handler
//! runs, so an invalid element fails before anything touches the canvas.

use std::collections::HashMap;

use image::RgbaImage;
use serde_json::Value;
use thiserror::Error;

use crate::color::{ColorError, ColorResolver};
use crate::coords::{CoordError, CoordResolver};
use crate::fonts::{FontError, TextSource};
use crate::icons::{IconError, IconSource};

/// One declarative drawing instruction, as authored by the caller
pub type Element = serde_json::Map<String, Value>;

/// Errors raised while dispatching or drawing one element
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("unknown element type: '{type_tag}'")]
    UnknownElementType { type_tag: String },

    #[error("element '{type_tag}' is missing required field '{field}'")]
    MissingField { type_tag: String, field: String },

    #[error("field '{field}' has an invalid value (expected {expected})")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error(transparent)]
    Icon(#[from] IconError),

    #[error(transparent)]
    Font(#[from] FontError),
}

/// Mutable state threaded through one rendering pass
///
/// The canvas is exclusively owned and mutated in place; the resolvers and
/// asset sources are shared read-only for the duration of the render.
pub struct DrawingContext<'a> {
    /// The target canvas, drawn onto in element-list order
    pub canvas: RgbaImage,
    /// Running vertical cursor; handlers that produce vertical layout set it
    /// past the content they drew so y-less elements can stack below
    pub pos_y: i32,
    /// Coordinate resolver captured for this canvas size
    pub coords: CoordResolver,
    /// Color token resolver
    pub colors: &'a ColorResolver,
    /// Icon name -> glyph image source
    pub icons: &'a dyn IconSource,
    /// Text measurement and drawing source
    pub text_font: &'a dyn TextSource,
}

impl<'a> DrawingContext<'a> {
    /// Create a context over a fresh canvas
    pub fn new(
        canvas: RgbaImage,
        colors: &'a ColorResolver,
        icons: &'a dyn IconSource,
        text_font: &'a dyn TextSource,
    ) -> Self {
        let coords = CoordResolver::new(canvas.width(), canvas.height());
        Self {
            canvas,
            pos_y: 0,
            coords,
            colors,
            icons,
            text_font,
        }
    }
}

/// A handler draws one element type onto the context's canvas
pub type Handler = fn(&mut DrawingContext<'_>, &Element) -> Result<(), DrawError>;

struct Registration {
    required_fields: &'static [&'static str],
    handler: Handler,
}

/// Maps element type tags to their handlers
///
/// Populated explicitly at startup (see [`crate::elements::register_builtins`]);
/// registration is a one-time setup step, never mutated during a render.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Registration>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in element handlers registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::elements::register_builtins(&mut registry);
        registry
    }

    /// Associate a type tag with its handler and required fields
    pub fn register(
        &mut self,
        type_tag: impl Into<String>,
        required_fields: &'static [&'static str],
        handler: Handler,
    ) {
        self.handlers.insert(
            type_tag.into(),
            Registration {
                required_fields,
                handler,
            },
        );
    }

    /// Check whether a type tag has a handler
    pub fn contains(&self, type_tag: &str) -> bool {
        self.handlers.contains_key(type_tag)
    }

    /// Validate and draw one element
    ///
    /// Validation (type tag, required fields) completes before the handler
    /// runs, so a rejected element leaves the canvas untouched.
    pub fn dispatch(
        &self,
        ctx: &mut DrawingContext<'_>,
        element: &Element,
    ) -> Result<(), DrawError> {
        let type_tag =
            element
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| DrawError::MissingField {
                    type_tag: "<untyped>".to_string(),
                    field: "type".to_string(),
                })?;

        let registration =
            self.handlers
                .get(type_tag)
                .ok_or_else(|| DrawError::UnknownElementType {
                    type_tag: type_tag.to_string(),
                })?;

        for field in registration.required_fields {
            if !element.contains_key(*field) {
                return Err(DrawError::MissingField {
                    type_tag: type_tag.to_string(),
                    field: (*field).to_string(),
                });
            }
        }

        (registration.handler)(ctx, element)
    }
}

/// Get a non-empty string field, mirroring the lenient truthiness of the
/// authoring format (empty strings count as absent)
pub(crate) fn str_field<'a>(element: &'a Element, key: &str) -> Option<&'a str> {
    element
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Get an integer field, accepting whole-valued floats
pub(crate) fn int_field(element: &Element, key: &str) -> Option<i64> {
    match element.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        _ => None,
    }
}

/// Require a string field that the registry already verified is present
pub(crate) fn require_str<'a>(element: &'a Element, key: &str) -> Result<&'a str, DrawError> {
    element
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| DrawError::InvalidField {
            field: key.to_string(),
            expected: "a string",
        })
}

/// Require a non-negative integer field (sizes, widths)
pub(crate) fn require_size(element: &Element, key: &str) -> Result<u32, DrawError> {
    int_field(element, key)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| DrawError::InvalidField {
            field: key.to_string(),
            expected: "a non-negative integer",
        })
}
