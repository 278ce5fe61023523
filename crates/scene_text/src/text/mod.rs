//! # Dynamic glyph text
//!
//! Text boxes made of one scene object per character, each showing a cell of
//! a shared glyph atlas texture.
//!
//! ## Pipeline
//!
//! ```text
//! TemplateProperties ──merge──▶ TextBoxConfig
//!                                   │
//!            color ◀────────────────┤
//!                                   ▼
//!            GlyphAtlasCache (per style, built once)
//!                                   │
//!            layout (wrap + justify) ▼
//!                                   │
//!            instance_pool::reconcile ──▶ SceneHost
//! ```
//!
//! [`TextBoxController`] runs the pipeline once per tick and decides when a
//! refresh is due.

pub mod atlas_map;
pub mod binding;
pub mod color;
pub mod controller;
pub mod glyph_cache;
pub mod instance_pool;
pub mod layout;
pub mod properties;
pub mod readback;
pub mod sensor;
pub mod state;

#[cfg(test)]
mod tests;

pub use binding::{BindingContext, BindingError};
pub use color::ColorError;
pub use controller::{ControllerState, RefreshTrigger, TextBoxController, TickContext, TickOutcome};
pub use glyph_cache::{AtlasBuildOutcome, AtlasError, GlyphAtlasCache, GlyphKey, Style};
pub use instance_pool::{ReconcileStats, TextError, TextResult};
pub use layout::Justify;
pub use properties::{TemplateProperties, TextBoxConfig};
pub use state::{GlyphInstance, TextBoxState};
