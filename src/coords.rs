//! Coordinate and anchor resolution
//!
//! Element positions are either absolute pixel numbers or percentage strings
//! resolved against the canvas dimensions. Anchors decide how a content box
//! of known size is offset relative to the resolved reference point.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when resolving a coordinate token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("invalid coordinate token: {token} (expected a number or a percentage string)")]
    Invalid { token: String },
}

/// Resolves raw coordinate values against the canvas dimensions
#[derive(Debug, Clone, Copy)]
pub struct CoordResolver {
    width: u32,
    height: u32,
}

impl CoordResolver {
    /// Create a resolver for a canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Resolve a horizontal coordinate
    pub fn parse_x(&self, value: &Value) -> Result<i32, CoordError> {
        parse_dimension(value, self.width)
    }

    /// Resolve a vertical coordinate
    pub fn parse_y(&self, value: &Value) -> Result<i32, CoordError> {
        parse_dimension(value, self.height)
    }
}

/// Resolve one coordinate against a reference dimension
///
/// Numbers pass through as pixel offsets (negative values included, so
/// callers can hang content past an edge). Strings ending in `%` resolve as
/// `round(percent / 100 * dimension)`. Anything else is an error.
fn parse_dimension(value: &Value, dimension: u32) -> Result<i32, CoordError> {
    let invalid = || CoordError::Invalid {
        token: value.to_string(),
    };

    match value {
        Value::Number(n) => {
            let n = n.as_f64().ok_or_else(invalid)?;
            Ok(n.round() as i32)
        }
        Value::String(s) => {
            let percent = s.strip_suffix('%').ok_or_else(invalid)?;
            let percent: f64 = percent.trim().parse().map_err(|_| invalid())?;
            Ok((percent / 100.0 * dimension as f64).round() as i32)
        }
        _ => Err(invalid()),
    }
}

/// Anchor tags determining how a content box is placed around a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopMiddle,
    BottomMiddle,
    LeftMiddle,
    RightMiddle,
    MiddleMiddle,
}

impl Anchor {
    /// Parse an anchor token
    ///
    /// Accepts the short codes used by the element schema (`mm`, `tl`, ...)
    /// and the equivalent hyphenated names (`middle-middle`, `top-left`, ...).
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "mm" | "middle-middle" => Some(Anchor::MiddleMiddle),
            "tl" | "lt" | "top-left" => Some(Anchor::TopLeft),
            "tr" | "rt" | "top-right" => Some(Anchor::TopRight),
            "bl" | "lb" | "bottom-left" => Some(Anchor::BottomLeft),
            "br" | "rb" | "bottom-right" => Some(Anchor::BottomRight),
            "mt" | "tm" | "top-middle" => Some(Anchor::TopMiddle),
            "mb" | "bm" | "bottom-middle" => Some(Anchor::BottomMiddle),
            "lm" | "ml" | "left-middle" => Some(Anchor::LeftMiddle),
            "rm" | "mr" | "right-middle" => Some(Anchor::RightMiddle),
            _ => None,
        }
    }

    /// Parse an anchor token, degrading to top-left with a warning
    ///
    /// Unknown anchors are non-fatal: existing content with a typo keeps
    /// rendering, just pinned at the reference point.
    pub fn parse_lenient(token: &str) -> Self {
        Self::parse(token).unwrap_or_else(|| {
            warn!(anchor = token, "unknown anchor, using top-left");
            Anchor::TopLeft
        })
    }

    /// Compute the top-left paste origin for a `width` x `height` content box
    /// anchored at `(x, y)`
    ///
    /// Halving uses floor division; downstream pixel placement depends on
    /// this truncation.
    pub fn paste_origin(self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        match self {
            Anchor::MiddleMiddle => (x - width / 2, y - height / 2),
            Anchor::TopLeft => (x, y),
            Anchor::TopRight => (x - width, y),
            Anchor::BottomLeft => (x, y - height),
            Anchor::BottomRight => (x - width, y - height),
            Anchor::TopMiddle => (x - width / 2, y),
            Anchor::BottomMiddle => (x - width / 2, y - height),
            Anchor::LeftMiddle => (x, y - height / 2),
            Anchor::RightMiddle => (x - width, y - height / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_coordinates_pass_through() {
        let coords = CoordResolver::new(296, 128);
        assert_eq!(coords.parse_x(&json!(50)).unwrap(), 50);
        assert_eq!(coords.parse_y(&json!(0)).unwrap(), 0);
        // Negative offsets are preserved as-is
        assert_eq!(coords.parse_x(&json!(-10)).unwrap(), -10);
        assert_eq!(coords.parse_x(&json!(12.6)).unwrap(), 13);
    }

    #[test]
    fn test_percentage_coordinates() {
        let coords = CoordResolver::new(296, 128);
        assert_eq!(coords.parse_x(&json!("50%")).unwrap(), 148);
        assert_eq!(coords.parse_y(&json!("100%")).unwrap(), 128);
        assert_eq!(coords.parse_y(&json!("0%")).unwrap(), 0);
        // round(33 / 100 * 296) = round(97.68) = 98
        assert_eq!(coords.parse_x(&json!("33%")).unwrap(), 98);
        assert_eq!(coords.parse_x(&json!("12.5%")).unwrap(), 37);
    }

    #[test]
    fn test_invalid_coordinate_tokens() {
        let coords = CoordResolver::new(296, 128);
        assert!(matches!(
            coords.parse_x(&json!("abc")),
            Err(CoordError::Invalid { .. })
        ));
        assert!(matches!(
            coords.parse_x(&json!("50px")),
            Err(CoordError::Invalid { .. })
        ));
        assert!(matches!(
            coords.parse_y(&json!(null)),
            Err(CoordError::Invalid { .. })
        ));
        assert!(matches!(
            coords.parse_y(&json!([1, 2])),
            Err(CoordError::Invalid { .. })
        ));
    }

    #[test]
    fn test_paste_origin_table() {
        // 9x7 box anchored at (100, 50); halving floors: 9/2 = 4, 7/2 = 3
        let cases = [
            (Anchor::MiddleMiddle, (96, 47)),
            (Anchor::TopLeft, (100, 50)),
            (Anchor::TopRight, (91, 50)),
            (Anchor::BottomLeft, (100, 43)),
            (Anchor::BottomRight, (91, 43)),
            (Anchor::TopMiddle, (96, 50)),
            (Anchor::BottomMiddle, (96, 43)),
            (Anchor::LeftMiddle, (100, 47)),
            (Anchor::RightMiddle, (91, 47)),
        ];
        for (anchor, expected) in cases {
            assert_eq!(
                anchor.paste_origin(100, 50, 9, 7),
                expected,
                "anchor {anchor:?}"
            );
        }
    }

    #[test]
    fn test_anchor_parse_codes_and_names() {
        assert_eq!(Anchor::parse("mm"), Some(Anchor::MiddleMiddle));
        assert_eq!(Anchor::parse("bottom-right"), Some(Anchor::BottomRight));
        assert_eq!(Anchor::parse("lt"), Some(Anchor::TopLeft));
        assert_eq!(Anchor::parse("diagonal"), None);
    }

    #[test]
    fn test_unknown_anchor_degrades_to_top_left() {
        assert_eq!(Anchor::parse_lenient("diagonal"), Anchor::TopLeft);
    }
}
