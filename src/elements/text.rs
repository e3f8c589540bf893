//! Text element handler and inline color-tag parsing
//!
//! Text values may carry inline color tags: `"Out [red]21°[/red] in"`.
//! The parser splits such a string into ordered (text, color) segments;
//! the handler draws each segment in its own color on one baseline.
//!
//! Parsing is deliberately lenient. Unpaired or mismatched tags are kept as
//! literal text instead of failing, because existing dashboard content
//! depends on that behavior.

use tracing::debug;

use crate::coords::Anchor;
use crate::registry::{int_field, require_str, str_field, DrawError, DrawingContext, Element};

use super::color_token;

/// Default font pixel size for text elements
const DEFAULT_TEXT_SIZE: u32 = 20;

/// A contiguous run of text sharing one color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub color: String,
}

impl TextSegment {
    fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

/// Split an inline-color-tagged string into ordered colored segments
///
/// Untagged runs default to `"black"`. Each `[color]...[/color]` pair yields
/// its own segment even when adjacent pairs repeat a color. Concatenating
/// the segment texts reproduces the input with the tag markup stripped.
pub fn parse_colored_text(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some((color, open_len)) = match_open_tag(rest) {
            let close = format!("[/{color}]");
            if let Some(inner_len) = rest[open_len..].find(&close) {
                if !plain.is_empty() {
                    segments.push(TextSegment::new(std::mem::take(&mut plain), "black"));
                }
                let inner = &rest[open_len..open_len + inner_len];
                if !inner.is_empty() {
                    segments.push(TextSegment::new(inner, color));
                }
                rest = &rest[open_len + inner_len + close.len()..];
                continue;
            }
        }

        // No tag pair starts here; the character is literal text.
        let ch = rest.chars().next().expect("non-empty");
        plain.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !plain.is_empty() {
        segments.push(TextSegment::new(plain, "black"));
    }

    segments
}

/// Match an opening tag `[<color>]` at the start of `text`
///
/// `<color>` is either a run of ASCII letters or `#` followed by 3 to 8 hex
/// digits. Returns the color token and the byte length of the whole tag.
fn match_open_tag(text: &str) -> Option<(&str, usize)> {
    let body = text.strip_prefix('[')?;
    let end = body.find(']')?;
    let token = &body[..end];

    let is_keyword = !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic());
    let is_hex = token
        .strip_prefix('#')
        .is_some_and(|d| (3..=8).contains(&d.len()) && d.chars().all(|c| c.is_ascii_hexdigit()));

    if is_keyword || is_hex {
        Some((token, end + 2))
    } else {
        None
    }
}

/// Draw a single line of (possibly color-tagged) text
///
/// Fields: `value`, `x`, optional `y` (omitted: stacks at the context's
/// vertical cursor), `size` (font pixels, default 20), `color`/`fill`
/// (applies to untagged runs), and `anchor` for the whole measured line box
/// (default top-left).
pub(crate) fn draw_text(ctx: &mut DrawingContext<'_>, element: &Element) -> Result<(), DrawError> {
    let x = ctx.coords.parse_x(&element["x"])?;
    let y = match element.get("y") {
        Some(serde_json::Value::Null) | None => {
            let y = ctx.pos_y;
            debug!(pos_y = y, "text element without y, stacking at cursor");
            y
        }
        Some(value) => ctx.coords.parse_y(value)?,
    };

    let value = require_str(element, "value")?;
    let size = int_field(element, "size")
        .unwrap_or(DEFAULT_TEXT_SIZE as i64)
        .max(1) as u32;
    let default_color = color_token(element);
    let anchor = str_field(element, "anchor")
        .map(Anchor::parse_lenient)
        .unwrap_or(Anchor::TopLeft);

    let segments = parse_colored_text(value);

    // Resolve every color before any font work so a bad token cannot leave
    // a half-drawn line behind.
    let mut runs = Vec::with_capacity(segments.len());
    for segment in &segments {
        let token = if segment.color == "black" {
            default_color
        } else {
            segment.color.as_str()
        };
        runs.push((segment.text.as_str(), ctx.colors.resolve(token)?));
    }

    let font = ctx.text_font;
    let mut total_width = 0.0f32;
    for &(text, _) in &runs {
        total_width += font.measure(text, size as f32)?;
    }

    let (origin_x, origin_y) = anchor.paste_origin(x, y, total_width.round() as i32, size as i32);

    let mut pen_x = origin_x as f32;
    for (text, color) in runs {
        pen_x += font.draw(
            &mut ctx.canvas,
            pen_x.round() as i32,
            origin_y,
            text,
            size as f32,
            color,
        )?;
    }

    ctx.pos_y = origin_y + size as i32;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(segments: &[TextSegment]) -> Vec<(&str, &str)> {
        segments
            .iter()
            .map(|s| (s.text.as_str(), s.color.as_str()))
            .collect()
    }

    #[test]
    fn test_plain_text_is_black() {
        let segments = parse_colored_text("Hello world");
        assert_eq!(pairs(&segments), vec![("Hello world", "black")]);
    }

    #[test]
    fn test_adjacent_tagged_runs() {
        let segments = parse_colored_text("[blue]B[/blue][green]G[/green]");
        assert_eq!(pairs(&segments), vec![("B", "blue"), ("G", "green")]);
    }

    #[test]
    fn test_untagged_prefix_stays_black() {
        let segments = parse_colored_text("Hello [blue]B[/blue]");
        assert_eq!(pairs(&segments), vec![("Hello ", "black"), ("B", "blue")]);
    }

    #[test]
    fn test_hex_color_tags() {
        let segments = parse_colored_text("[#0f0]G[/#0f0][#00FFAA]H[/#00FFAA]");
        assert_eq!(pairs(&segments), vec![("G", "#0f0"), ("H", "#00FFAA")]);
    }

    #[test]
    fn test_same_color_pairs_not_merged() {
        let segments = parse_colored_text("[red]a[/red][red]b[/red]");
        assert_eq!(pairs(&segments), vec![("a", "red"), ("b", "red")]);
    }

    #[test]
    fn test_unmatched_close_tag_is_literal() {
        let segments = parse_colored_text("x[/blue]y");
        assert_eq!(pairs(&segments), vec![("x[/blue]y", "black")]);
    }

    #[test]
    fn test_unmatched_open_tag_is_literal() {
        let segments = parse_colored_text("[blue]never closed");
        assert_eq!(pairs(&segments), vec![("[blue]never closed", "black")]);
    }

    #[test]
    fn test_mismatched_pair_is_literal() {
        let segments = parse_colored_text("[blue]x[/green]");
        assert_eq!(pairs(&segments), vec![("[blue]x[/green]", "black")]);
    }

    #[test]
    fn test_empty_tag_pair_yields_no_segment() {
        let segments = parse_colored_text("a[red][/red]b");
        assert_eq!(pairs(&segments), vec![("a", "black"), ("b", "black")]);
    }

    #[test]
    fn test_non_color_brackets_are_literal() {
        let segments = parse_colored_text("array[0] = [1]");
        assert_eq!(pairs(&segments), vec![("array[0] = [1]", "black")]);
    }

    #[test]
    fn test_round_trip_strips_only_markup() {
        let inputs = [
            "plain",
            "Out [red]21°[/red] in [blue]18°[/blue]",
            "[#abc]x[/#abc]tail",
            "[red]a[/red][red]b[/red]",
        ];
        for input in inputs {
            let segments = parse_colored_text(input);
            let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
            let mut stripped = input.to_string();
            for tag in [
                "[red]", "[/red]", "[blue]", "[/blue]", "[#abc]", "[/#abc]",
            ] {
                stripped = stripped.replace(tag, "");
            }
            assert_eq!(joined, stripped, "input: {input}");
        }
    }
}
