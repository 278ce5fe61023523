//! Text layout engine
//!
//! Breaks raw text into display lines for a fixed-cell font: greedy word
//! wrapping to a column width, then per-line justification padding. Pure
//! functions; identical inputs always give identical lines.
//!
//! # Wrapping rules
//!
//! - Tabs expand to 8-column stops, then every whitespace character
//!   becomes a plain space.
//! - Text is split into whitespace runs and words. A word also splits
//!   right after a hyphen joining two word characters (`well-known`).
//! - Chunks are packed greedily. Whitespace is dropped at the end of every
//!   line and at the start of every line after the first.
//! - A word longer than the width is broken to fill the rest of the line.

use std::fmt;

/// Tab stop width used when expanding tabs
const TAB_SIZE: usize = 8;

/// Horizontal alignment of each wrapped line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    /// No padding
    #[default]
    Left,
    /// Pad both sides to the wrap width
    Center,
    /// Pad on the left to the wrap width
    Right,
}

impl Justify {
    /// Parse a justification name, ignoring case
    ///
    /// Unknown names leave lines unpadded, like `left`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        }
    }

    /// Pad `line` to `width` characters according to this mode
    pub fn apply(self, line: &str, width: usize) -> String {
        let len = line.chars().count();
        if len >= width {
            return line.to_string();
        }
        let margin = width - len;
        let left = match self {
            Self::Left => return line.to_string(),
            // Odd margins put the extra space on the left only when the width is odd too
            Self::Center => margin / 2 + (margin & width & 1),
            Self::Right => margin,
        };
        format!("{}{}{}", " ".repeat(left), line, " ".repeat(margin - left))
    }
}

impl fmt::Display for Justify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Wrap and justify `text` into display lines
///
/// `wrap_width` must be at least 1; the controller clamps it on ingestion.
pub fn layout(text: &str, wrap_width: usize, justify: Justify) -> Vec<String> {
    wrap(text, wrap_width)
        .into_iter()
        .map(|line| justify.apply(&line, wrap_width))
        .collect()
}

/// Greedy word wrap without justification
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut chunks = split_chunks(&normalize_whitespace(text));
    chunks.reverse();

    let mut lines = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<Vec<char>> = Vec::new();
        let mut line_len = 0;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_space(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            if line_len + chunk.len() > width {
                break;
            }
            line_len += chunk.len();
            line.extend(chunks.pop());
        }

        if chunks.last().is_some_and(|c| c.len() > width) {
            break_long_word(&mut chunks, &mut line, line_len, width);
        }

        if line.last().is_some_and(|c| is_space(c)) {
            line.pop();
        }

        if !line.is_empty() {
            lines.push(line.concat().into_iter().collect());
        }
    }

    lines
}

/// Move the head of an over-long word onto the current line
fn break_long_word(chunks: &mut [Vec<char>], line: &mut Vec<Vec<char>>, line_len: usize, width: usize) {
    let space_left = if width < 1 { 1 } else { width - line_len };
    if let Some(word) = chunks.last_mut() {
        // A partially filled line may have no room at all
        if space_left > 0 {
            let tail = word.split_off(space_left.min(word.len()));
            line.push(std::mem::replace(word, tail));
        }
    }
}

fn is_space(chunk: &[char]) -> bool {
    chunk.iter().all(|&c| c == ' ')
}

fn normalize_whitespace(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            c if c.is_whitespace() => {
                out.push(' ');
                column += 1;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

fn split_chunks(chars: &[char]) -> Vec<Vec<char>> {
    let mut chunks: Vec<Vec<char>> = Vec::new();
    let mut current: Vec<char> = Vec::new();

    for (i, &ch) in chars.iter().enumerate() {
        let boundary = current
            .last()
            .is_some_and(|&prev| (prev == ' ') != (ch == ' '));
        if boundary {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(ch);

        let hyphen_break = ch == '-'
            && i > 0
            && chars[i - 1].is_alphanumeric()
            && chars.get(i + 1).is_some_and(|next| next.is_alphabetic());
        if hyphen_break {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
