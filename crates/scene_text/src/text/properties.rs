//! Text box configuration
//!
//! Each tick a text box pulls its properties from the template instance it
//! belongs to. [`TemplateProperties`] is that raw surface: every key may be
//! missing, in which case the text box keeps what it had. [`TextBoxConfig`]
//! is the resolved snapshot the rest of the pipeline reads.

use serde::{Deserialize, Serialize};

use super::binding::{resolve_text, BindingContext};
use super::glyph_cache::Style;
use super::layout::Justify;
use crate::core::TextBoxDefaults;

/// Properties supplied by the host template, keyed as the host names them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateProperties {
    /// Uniform glyph scale
    pub size: Option<f32>,
    /// Spacing for both axes
    pub offset: Option<f32>,
    /// Horizontal spacing, defaults to `offset`
    pub offset_h: Option<f32>,
    /// Vertical spacing, defaults to `offset`
    pub offset_v: Option<f32>,
    /// Wrap width in characters
    pub wrap: Option<i32>,
    /// `left`, `center` or `right`
    pub justify: Option<String>,
    /// Visual style, clamped to 1-5
    pub style: Option<i32>,
    /// Broadcast identifier
    pub id: Option<String>,
    /// Update interval; negative means change-driven
    pub update: Option<i32>,
    /// Color specification
    pub color: Option<String>,
    /// Literal text or a `>`-prefixed reference
    pub text: Option<String>,
    /// Suppresses all work while true
    pub disabled: Option<bool>,
}

impl TemplateProperties {
    /// Empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `Text`
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set `Wrap`
    pub fn with_wrap(mut self, wrap: i32) -> Self {
        self.wrap = Some(wrap);
        self
    }

    /// Set `Justify`
    pub fn with_justify(mut self, justify: impl Into<String>) -> Self {
        self.justify = Some(justify.into());
        self
    }

    /// Set `Style`
    pub fn with_style(mut self, style: i32) -> Self {
        self.style = Some(style);
        self
    }

    /// Set `Id`
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set `Update`
    pub fn with_update(mut self, update: i32) -> Self {
        self.update = Some(update);
        self
    }

    /// Set `Color`
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set `Size`
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Set `Offset`
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set `Disabled`
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Whether the template currently disables its text box
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }
}

/// Resolved per-text-box configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TextBoxConfig {
    /// Uniform glyph scale
    pub size: f32,
    /// Shared spacing
    pub offset: f32,
    /// Horizontal spacing between columns
    pub offset_h: f32,
    /// Vertical spacing between rows
    pub offset_v: f32,
    /// Wrap width, at least 1
    pub wrap: usize,
    /// Justification mode
    pub justify: Justify,
    /// Visual style
    pub style: Style,
    /// Broadcast identifier
    pub id: String,
    /// Update interval; negative means change-driven
    pub update: i32,
    /// Raw color specification
    pub color_spec: String,
    /// Text to display, references already resolved
    pub text: String,
}

impl TextBoxConfig {
    /// Starting configuration from scene defaults
    pub fn from_defaults(defaults: &TextBoxDefaults) -> Self {
        Self {
            size: defaults.size,
            offset: defaults.offset,
            offset_h: defaults.offset,
            offset_v: defaults.offset,
            wrap: clamp_wrap(defaults.wrap),
            justify: Justify::from_name(&defaults.justify),
            style: Style::clamped(defaults.style),
            id: defaults.id.clone(),
            update: defaults.update,
            color_spec: defaults.color.clone(),
            text: defaults.text.clone(),
        }
    }

    /// Pull present template properties into this snapshot
    ///
    /// Absent keys keep their previous value, except the per-axis offsets,
    /// which follow `offset` whenever they are not given explicitly.
    pub fn merge(&mut self, props: &TemplateProperties, bindings: &BindingContext) {
        if let Some(size) = props.size {
            self.size = size.max(0.0);
        }
        if let Some(offset) = props.offset {
            self.offset = offset;
        }
        self.offset_h = props.offset_h.unwrap_or(self.offset);
        self.offset_v = props.offset_v.unwrap_or(self.offset);

        if let Some(wrap) = props.wrap {
            self.wrap = clamp_wrap(wrap);
        }
        if let Some(justify) = &props.justify {
            self.justify = Justify::from_name(justify);
        }
        if let Some(style) = props.style {
            let clamped = Style::clamped(style);
            if i32::from(clamped.get()) != style {
                log::warn!("Style {} out of range, clamped to {}", style, clamped);
            }
            self.style = clamped;
        }
        if let Some(id) = &props.id {
            self.id.clone_from(id);
        }
        if let Some(update) = props.update {
            self.update = update;
        }
        if let Some(color) = &props.color {
            self.color_spec.clone_from(color);
        }
        if let Some(text) = &props.text {
            self.text = resolve_text(text, bindings);
        }
    }
}

impl Default for TextBoxConfig {
    fn default() -> Self {
        Self::from_defaults(&TextBoxDefaults::default())
    }
}

fn clamp_wrap(wrap: i32) -> usize {
    if wrap < 1 {
        log::warn!("Wrap width {} is not positive, using 1", wrap);
        1
    } else {
        wrap as usize
    }
}
