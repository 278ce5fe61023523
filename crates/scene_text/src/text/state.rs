//! Per-text-box state
//!
//! Owned by one controller: the resolved configuration, the values derived
//! from it that are cached between ticks, and the glyph instances currently
//! parented under the text box.

use super::color;
use super::glyph_cache::Style;
use super::properties::TextBoxConfig;
use crate::foundation::math::{Rgba, WHITE};
use crate::scene::ObjectHandle;

/// One displayed character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphInstance {
    /// Host object showing the glyph
    pub object: ObjectHandle,
    /// Character the object's mesh was last bound for
    pub glyph: Option<char>,
}

impl GlyphInstance {
    /// Instance that has not been bound to any glyph yet
    pub fn unbound(object: ObjectHandle) -> Self {
        Self { object, glyph: None }
    }
}

/// Mutable state of one text box
#[derive(Debug, Clone)]
pub struct TextBoxState {
    /// Host object the glyph instances are parented to
    pub owner: ObjectHandle,
    /// Current configuration snapshot
    pub config: TextBoxConfig,
    /// Resolved color of `config.color_spec`
    pub color: Rgba,
    /// Color specification `color` was resolved from
    pub last_color_spec: String,
    /// Text of the last successful render
    pub last_text: Option<String>,
    /// Style of the last successful render
    pub last_style: Option<Style>,
    /// Live glyph instances in display order
    pub instances: Vec<GlyphInstance>,
}

impl TextBoxState {
    /// Fresh state for a text box owned by `owner`
    pub fn new(owner: ObjectHandle, config: TextBoxConfig) -> Self {
        Self {
            owner,
            config,
            color: Rgba::from(WHITE),
            last_color_spec: "WHITE".to_string(),
            last_text: None,
            last_style: None,
            instances: Vec::new(),
        }
    }

    /// Re-resolve the color if its specification changed
    ///
    /// Returns whether the color was re-resolved.
    pub fn refresh_color(&mut self) -> bool {
        if self.config.color_spec == self.last_color_spec {
            return false;
        }
        self.color = color::resolve(&self.config.color_spec);
        self.last_color_spec.clone_from(&self.config.color_spec);
        true
    }

    /// Whether the configured text differs from the last rendered text
    pub fn text_changed(&self) -> bool {
        self.last_text.as_deref() != Some(self.config.text.as_str())
    }

    /// Live glyph instance objects, in display order
    pub fn instance_objects(&self) -> Vec<ObjectHandle> {
        self.instances.iter().map(|i| i.object).collect()
    }
}
