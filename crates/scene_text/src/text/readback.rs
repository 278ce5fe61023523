//! Reading rendered text back out of a [`MemoryScene`]
//!
//! Reconstructs what a text box actually shows from the scene itself: each
//! visible glyph's character is recovered from the atlas cell its mesh's
//! texture coordinates point at, and a new row starts after every line
//! break glyph. Hidden glyphs read back as spaces.

use super::atlas_map::{self, AtlasCell};
use super::state::TextBoxState;
use crate::scene::{MemoryScene, ObjectHandle};

/// Character shown by a glyph object, if it is visible and bound
pub fn displayed_char(scene: &MemoryScene, object: ObjectHandle) -> Option<char> {
    let object = scene.object(object)?;
    if !object.visible {
        return None;
    }
    let (uv_min, _) = scene.mesh(object.mesh?)?.uv_bounds()?;
    atlas_map::char_at(AtlasCell::from_uv_min(uv_min)?)
}

/// Rows of text as displayed, top row first
pub fn read_rows(scene: &MemoryScene, state: &TextBoxState) -> Vec<String> {
    if state.instances.is_empty() {
        return Vec::new();
    }
    let mut rows = vec![String::new()];
    for instance in &state.instances {
        if instance.glyph == Some('\n') {
            rows.push(String::new());
            continue;
        }
        if scene.object(instance.object).is_none() {
            continue;
        }
        let ch = displayed_char(scene, instance.object).unwrap_or(' ');
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AtlasConfig;
    use crate::text::glyph_cache::{GlyphAtlasCache, Style};
    use crate::text::instance_pool::reconcile;
    use crate::text::properties::TextBoxConfig;

    fn setup() -> (MemoryScene, GlyphAtlasCache, TextBoxState) {
        let config = AtlasConfig::default();
        let mut scene = MemoryScene::with_glyph_templates(&config);
        let mut atlas = GlyphAtlasCache::new(config);
        atlas.ensure_style_built(&mut scene, Style::default());
        let owner = scene.spawn_root("TextBox");
        (scene, atlas, TextBoxState::new(owner, TextBoxConfig::default()))
    }

    #[test]
    fn test_reads_back_rendered_rows() {
        let (mut scene, atlas, mut state) = setup();
        let lines = vec!["Hi yo".to_string(), "~Çü!".to_string()];
        reconcile(&mut scene, &atlas, &mut state, &lines).unwrap();
        assert_eq!(read_rows(&scene, &state), lines);
    }

    #[test]
    fn test_rows_split_at_line_breaks_with_zero_spacing() {
        let (mut scene, atlas, mut state) = setup();
        state.config.offset_v = 0.0;

        let lines = vec!["ab".to_string(), "cd".to_string()];
        reconcile(&mut scene, &atlas, &mut state, &lines).unwrap();
        assert_eq!(read_rows(&scene, &state), lines);
    }

    #[test]
    fn test_empty_box_has_no_rows() {
        let (scene, _, state) = setup();
        assert!(read_rows(&scene, &state).is_empty());
    }
}
