//! Static character-to-cell table for the glyph atlas
//!
//! The atlas is a single texture split into a grid of [`CHARS_X`] columns by
//! [`CHARS_Y`] rows, each cell holding one glyph. Row 0 is the top row.

use crate::foundation::math::uv;

/// Atlas grid columns
pub const CHARS_X: u32 = 16;

/// Atlas grid rows
pub const CHARS_Y: u32 = 8;

/// Supported characters in atlas order, one string per grid row
const ROWS: [&str; CHARS_Y as usize] = [
    "!\"#$%&'()*+,-./0",
    "123456789:;<=>?@",
    "ABCDEFGHIJKLMNOP",
    "QRSTUVWXYZ[\\]^_`",
    "abcdefghijklmnop",
    "qrstuvwxyz{|}~¡¢",
    "£¥©®ÀÁÂÃÇÉÊÍÑÓÔÕ",
    "ÚÜàáâãçéêíñóôõúü",
];

/// Position of a glyph in the atlas grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasCell {
    /// Column, 0 at the left
    pub col: u32,
    /// Row, 0 at the top
    pub row: u32,
}

impl AtlasCell {
    /// Create a cell
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Recover the cell from the minimum UV of a glyph quad
    ///
    /// Integer offsets are discarded the way repeat addressing discards them.
    /// UV rows run bottom-up while atlas rows run top-down.
    pub fn from_uv_min(uv_min: [f32; 2]) -> Option<Self> {
        let col = (uv::wrap(uv_min[0]) * CHARS_X as f32).round() % CHARS_X as f32;
        let v_cells = (uv::wrap(uv_min[1]) * CHARS_Y as f32).round() % CHARS_Y as f32;
        let row = (CHARS_Y as f32 - 1.0) - v_cells;

        let in_range = |value: f32, max: u32| (0.0..max as f32).contains(&value);
        (in_range(col, CHARS_X) && in_range(row, CHARS_Y))
            .then(|| Self::new(col as u32, row as u32))
    }
}

/// Atlas cell holding `ch`, if the character is supported
pub fn cell_of(ch: char) -> Option<AtlasCell> {
    ROWS.iter().enumerate().find_map(|(row, chars)| {
        chars
            .chars()
            .position(|c| c == ch)
            .map(|col| AtlasCell::new(col as u32, row as u32))
    })
}

/// Character stored in `cell`
pub fn char_at(cell: AtlasCell) -> Option<char> {
    ROWS.get(cell.row as usize)?.chars().nth(cell.col as usize)
}

/// Every supported character, in atlas order
pub fn supported_chars() -> impl Iterator<Item = char> {
    ROWS.iter().flat_map(|row| row.chars())
}

/// Number of supported characters
pub fn supported_count() -> usize {
    supported_chars().count()
}

/// Whether `ch` has a cell in the atlas
pub fn is_supported(ch: char) -> bool {
    cell_of(ch).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_fills_grid() {
        assert_eq!(supported_count(), (CHARS_X * CHARS_Y) as usize);
        for row in ROWS {
            assert_eq!(row.chars().count(), CHARS_X as usize);
        }
    }

    #[test]
    fn test_cells_are_unique() {
        let cells: HashSet<_> = supported_chars().filter_map(cell_of).collect();
        assert_eq!(cells.len(), supported_count());
    }

    #[test]
    fn test_known_cells() {
        assert_eq!(cell_of('!'), Some(AtlasCell::new(0, 0)));
        assert_eq!(cell_of('0'), Some(AtlasCell::new(15, 0)));
        assert_eq!(cell_of('A'), Some(AtlasCell::new(0, 2)));
        assert_eq!(cell_of('\\'), Some(AtlasCell::new(11, 3)));
        assert_eq!(cell_of('ü'), Some(AtlasCell::new(15, 7)));
        assert_eq!(cell_of(' '), None);
        assert_eq!(cell_of('\n'), None);
    }

    #[test]
    fn test_char_at_inverts_cell_of() {
        for ch in supported_chars() {
            assert_eq!(char_at(cell_of(ch).unwrap()), Some(ch));
        }
        assert_eq!(char_at(AtlasCell::new(16, 0)), None);
    }

    #[test]
    fn test_cell_from_uv_min() {
        // Row 0 sits at the top of the texture
        assert_eq!(AtlasCell::from_uv_min([0.0, 0.875]), Some(AtlasCell::new(0, 0)));
        assert_eq!(AtlasCell::from_uv_min([0.9375, 0.0]), Some(AtlasCell::new(15, 7)));
        // Whole-texture offsets wrap away
        assert_eq!(AtlasCell::from_uv_min([2.25, 15.5]), Some(AtlasCell::new(4, 3)));
    }
}
