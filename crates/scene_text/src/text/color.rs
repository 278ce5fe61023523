//! Color resolution
//!
//! Turns a text box color specification into a normalized RGBA value. A
//! specification is either a named color (case-insensitive) or a literal
//! four-component sequence such as `[0.5, 0.5, 0.5, 1]` or `(1, 0, 0, 1)`.

use crate::foundation::math::{rgba, Rgba, WHITE};

/// Named colors available to text boxes
pub const NAMED_COLORS: [(&str, [f32; 4]); 8] = [
    ("WHITE", [1.0, 1.0, 1.0, 1.0]),
    ("RED", [1.0, 0.0, 0.0, 1.0]),
    ("GREEN", [0.0, 1.0, 0.0, 1.0]),
    ("BLUE", [0.0, 0.0, 1.0, 1.0]),
    ("YELLOW", [1.0, 1.0, 0.0, 1.0]),
    ("PURPLE", [1.0, 0.0, 1.0, 1.0]),
    ("CYAN", [0.0, 1.0, 1.0, 1.0]),
    ("BLACK", [0.0, 0.0, 0.0, 1.0]),
];

/// Errors produced while parsing a color specification
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// Not a literal and not a known color name
    #[error("Unknown color name '{0}'")]
    UnknownName(String),

    /// Literal could not be parsed as a numeric sequence
    #[error("Malformed color literal '{0}'")]
    Malformed(String),

    /// Literal parsed but does not have four components
    #[error("Color literal has {found} components, expected 4")]
    Arity {
        /// Number of components found
        found: usize,
    },
}

/// Look up a named color, ignoring case
pub fn named_color(name: &str) -> Option<Rgba> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name.trim()))
        .map(|(_, value)| Rgba::from(*value))
}

/// Parse a color specification
pub fn parse_color(spec: &str) -> Result<Rgba, ColorError> {
    let trimmed = spec.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('(') {
        parse_literal(trimmed)
    } else {
        named_color(trimmed).ok_or_else(|| ColorError::UnknownName(trimmed.to_string()))
    }
}

/// Resolve a color specification, degrading to opaque white
///
/// Never fails: unknown names, malformed literals and literals of the wrong
/// length all produce white.
pub fn resolve(spec: &str) -> Rgba {
    parse_color(spec).unwrap_or_else(|err| {
        log::debug!("Color '{}' falls back to white: {}", spec, err);
        Rgba::from(WHITE)
    })
}

fn parse_literal(literal: &str) -> Result<Rgba, ColorError> {
    let malformed = || ColorError::Malformed(literal.to_string());

    let close = match literal.chars().next() {
        Some('[') => ']',
        Some('(') => ')',
        _ => return Err(malformed()),
    };
    let inner = literal
        .strip_suffix(close)
        .map(|rest| &rest[1..])
        .ok_or_else(malformed)?;

    let mut parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    // A single trailing comma is allowed: "(1, 0, 0, 1,)"
    if parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    if parts.len() == 1 && parts[0].is_empty() {
        parts.clear();
    }

    let components = parts
        .iter()
        .map(|p| {
            p.parse::<f32>()
                .ok()
                .filter(|c| c.is_finite())
                .ok_or_else(malformed)
        })
        .collect::<Result<Vec<_>, _>>()?;

    match components.as_slice() {
        [r, g, b, a] => Ok(rgba(*r, *g, *b, *a)),
        _ => Err(ColorError::Arity { found: components.len() }),
    }
}
