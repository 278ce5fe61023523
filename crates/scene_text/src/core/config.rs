//! # Text System Configuration
//!
//! Scene-level configuration for the glyph text system: where the atlas
//! template quads come from, which object template backs a glyph instance,
//! and the property values a text box starts with before its template
//! overrides any of them.
//!
//! All types here are serializable so a scene can ship its text setup as a
//! TOML or RON file next to its other assets.

use serde::{Serialize, Deserialize};

// Re-export the config trait for convenience
pub use crate::config::{Config, ConfigError};

/// # Atlas Configuration
///
/// Names of the host templates the atlas builder and instance pool draw from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Prefix of the per-style template quad; the style number is appended
    pub glyph_template_prefix: String,
    /// Object template spawned for every glyph instance
    pub blank_glyph_template: String,
}

impl AtlasConfig {
    /// Host template name of the quad mesh for `style`
    pub fn glyph_template(&self, style: u8) -> String {
        format!("{}{}", self.glyph_template_prefix, style)
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            glyph_template_prefix: "_TxtChar".to_string(),
            blank_glyph_template: "_TxtCharBlank".to_string(),
        }
    }
}

/// # Text Box Defaults
///
/// Values a text box holds before its template supplies any property.
/// A template key that is absent on a tick keeps the previous value, so
/// these only matter until the first time a key is seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxDefaults {
    /// Uniform glyph scale
    pub size: f32,
    /// Spacing used for both axes unless overridden
    pub offset: f32,
    /// Wrap width in characters
    pub wrap: i32,
    /// Justification name (`left`, `center`, `right`)
    pub justify: String,
    /// Visual style, 1-5
    pub style: i32,
    /// Broadcast identifier
    pub id: String,
    /// Update interval; negative means change-driven
    pub update: i32,
    /// Color specification
    pub color: String,
    /// Initial text
    pub text: String,
}

impl Default for TextBoxDefaults {
    fn default() -> Self {
        Self {
            size: 1.0,
            offset: 1.0,
            wrap: 20,
            justify: "left".to_string(),
            style: 1,
            id: String::new(),
            update: -1,
            color: "WHITE".to_string(),
            text: String::new(),
        }
    }
}

/// # Text System Configuration
///
/// Top-level configuration bundle, loadable through [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSystemConfig {
    /// Atlas template names
    pub atlas: AtlasConfig,
    /// Initial text box property values
    pub defaults: TextBoxDefaults,
}

impl Config for TextSystemConfig {}
