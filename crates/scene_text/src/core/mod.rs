//! # Core Module
//!
//! Shared configuration used by every text box in a scene.
//!
//! ## Organization
//!
//! - **Config**: serializable atlas and text box defaults, loadable from TOML or RON

pub mod config;

pub use config::{
    AtlasConfig,
    TextBoxDefaults,
    TextSystemConfig,
    Config,
    ConfigError,
};
