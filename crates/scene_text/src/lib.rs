//! # Scene Text
//!
//! Dynamic 3D glyph text for scene graphs: every character of a text box is
//! its own quad object whose texture coordinates select one cell of a glyph
//! atlas.
//!
//! ## Features
//!
//! - **Glyph atlas cache**: one mesh per style and character, built lazily
//! - **Layout**: greedy word wrap with left, center and right justification
//! - **Reconciliation**: glyph instances are reused, rebinding meshes only
//!   where the character or style changed
//! - **Refresh control**: periodic, broadcast or change-driven updates
//! - **Host agnostic**: all scene access goes through [`scene::SceneHost`]
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_text::prelude::*;
//!
//! let config = TextSystemConfig::default();
//! let mut scene = MemoryScene::with_glyph_templates(&config.atlas);
//! let mut atlas = GlyphAtlasCache::new(config.atlas.clone());
//!
//! let owner = scene.spawn_root("TextBox");
//! let mut text_box = TextBoxController::new(owner, &config.defaults);
//! let props = TemplateProperties::new().with_text("hello world").with_wrap(5);
//! let bindings = BindingContext::new();
//!
//! for _ in 0..2 {
//!     let ctx = TickContext { template: &props, messages: &[], bindings: &bindings };
//!     text_box.tick(&mut scene, &mut atlas, ctx)?;
//! }
//! assert_eq!(read_rows(&scene, text_box.state()), ["hello", "world"]);
//! # Ok::<(), TextError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

pub mod config;
pub mod core;
pub mod events;
pub mod foundation;
pub mod scene;
pub mod text;

/// Common imports for text system users
pub mod prelude {
    pub use crate::{
        core::config::{AtlasConfig, Config, ConfigError, TextBoxDefaults, TextSystemConfig},
        events::{Broadcast, BroadcastBus},
        foundation::math::{Rgba, Vec3},
        scene::{HostError, MemoryScene, MeshHandle, ObjectHandle, SceneHost},
        text::{
            readback::read_rows, AtlasBuildOutcome, BindingContext, ControllerState, GlyphAtlasCache,
            Justify, RefreshTrigger, Style, TemplateProperties, TextBoxController, TextError,
            TickContext, TickOutcome,
        },
    };
}
