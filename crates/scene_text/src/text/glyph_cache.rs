//! Per-style glyph mesh cache
//!
//! For every visual style the cache owns one mesh per supported character.
//! Each mesh is a clone of the style's template quad whose texture
//! coordinates have been moved onto that character's atlas cell. Meshes are
//! built lazily, the first time a text box needs the style, and are then
//! shared read-only by every glyph instance in the scene.
//!
//! A style only counts as ready once every supported character has a mesh.
//! A build that fails part way stops at the failing glyph; the glyphs that
//! did succeed are kept aside so a later attempt only builds what is missing.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::atlas_map::{self, AtlasCell, CHARS_X, CHARS_Y};
use crate::core::AtlasConfig;
use crate::foundation::math::{uv, Mat3};
use crate::foundation::time::Stopwatch;
use crate::scene::{HostError, MeshHandle, SceneHost};

/// Visual glyph style, always within `[Style::MIN, Style::MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Style(u8);

impl Style {
    /// Lowest style number
    pub const MIN: u8 = 1;
    /// Highest style number
    pub const MAX: u8 = 5;

    /// Create a style, clamping out-of-range values
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(i32::from(Self::MIN), i32::from(Self::MAX)) as u8)
    }

    /// Style number
    pub fn get(self) -> u8 {
        self.0
    }

    /// Every style
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cache key of one glyph mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    /// Visual style
    pub style: Style,
    /// Character
    pub codepoint: char,
}

impl GlyphKey {
    /// Create a key
    pub fn new(style: Style, codepoint: char) -> Self {
        Self { style, codepoint }
    }

    /// Name given to the glyph's mesh in the host scene
    pub fn mesh_name(&self) -> String {
        format!("{}-{}", self.style, u32::from(self.codepoint))
    }
}

/// Errors raised while building a style's glyph meshes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    /// The style's template quad could not be obtained
    #[error("Template quad for style {style} unavailable: {source}")]
    TemplateUnavailable {
        /// Style being built
        style: Style,
        /// Host failure
        source: HostError,
    },

    /// A single glyph mesh could not be created
    #[error("Failed to build glyph '{}' for style {}: {source}", .key.codepoint, .key.style)]
    GlyphBuild {
        /// Glyph being built
        key: GlyphKey,
        /// Host failure
        source: HostError,
    },
}

/// Result of [`GlyphAtlasCache::ensure_style_built`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtlasBuildOutcome {
    /// Every glyph was already cached
    AlreadyReady,
    /// The style was completed by this call
    Built {
        /// Glyph meshes created by this call
        glyphs: usize,
    },
    /// The build stopped; the style is not ready
    Failed(AtlasError),
}

impl AtlasBuildOutcome {
    /// Whether the style is ready after this outcome
    pub fn is_ready(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// The three UV transforms that move a full-texture quad onto `cell`
///
/// Applied in order: shrink to one cell, align the origin cell with the top
/// left of the atlas, then offset to the character's own cell.
pub fn cell_transforms(cell: AtlasCell) -> [Mat3; 3] {
    let (cx, cy) = (CHARS_X as f32, CHARS_Y as f32);
    [
        uv::scale(1.0 / cx, 1.0 / cy),
        uv::translation(0.0, cy - 1.0 / cy),
        uv::translation(cell.col as f32 / cx, cy - cell.row as f32 / cy),
    ]
}

/// Scene-scoped registry of glyph meshes keyed by style and character
#[derive(Debug, Default)]
pub struct GlyphAtlasCache {
    config: AtlasConfig,
    glyphs: HashMap<GlyphKey, MeshHandle>,
    staged: HashMap<GlyphKey, MeshHandle>,
    ready: HashSet<Style>,
    attempts: HashMap<Style, u32>,
}

impl GlyphAtlasCache {
    /// Create an empty cache drawing template quads as named by `config`
    pub fn new(config: AtlasConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Atlas configuration
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Whether every supported character has a mesh for `style`
    pub fn is_style_ready(&self, style: Style) -> bool {
        self.ready.contains(&style)
    }

    /// Cached mesh for a glyph of a ready style
    pub fn mesh_for(&self, key: GlyphKey) -> Option<MeshHandle> {
        self.glyphs.get(&key).copied()
    }

    /// Number of build attempts made for `style`
    pub fn build_attempts(&self, style: Style) -> u32 {
        self.attempts.get(&style).copied().unwrap_or(0)
    }

    /// Build every missing glyph mesh of `style`
    ///
    /// No-op when the style is already ready. Stops at the first glyph that
    /// fails; the style then stays not ready until a later call succeeds.
    pub fn ensure_style_built<H: SceneHost>(&mut self, host: &mut H, style: Style) -> AtlasBuildOutcome {
        if self.is_style_ready(style) {
            return AtlasBuildOutcome::AlreadyReady;
        }
        *self.attempts.entry(style).or_insert(0) += 1;

        let stopwatch = Stopwatch::start_new();
        let template = self.config.glyph_template(style.get());
        let base = match host.template_mesh(&template) {
            Ok(mesh) => mesh,
            Err(source) => {
                log::warn!("Glyph template '{}' unavailable for style {}: {}", template, style, source);
                return AtlasBuildOutcome::Failed(AtlasError::TemplateUnavailable { style, source });
            }
        };

        let mut built = 0;
        for ch in atlas_map::supported_chars() {
            let key = GlyphKey::new(style, ch);
            if self.staged.contains_key(&key) {
                continue;
            }
            let Some(cell) = atlas_map::cell_of(ch) else { continue };

            match build_glyph(host, base, key, cell) {
                Ok(mesh) => {
                    self.staged.insert(key, mesh);
                    built += 1;
                }
                Err(source) => {
                    log::warn!("Aborting style {} build at glyph '{}': {}", style, ch, source);
                    return AtlasBuildOutcome::Failed(AtlasError::GlyphBuild { key, source });
                }
            }
        }

        self.promote(style);
        log::info!(
            "Created glyph meshes for style {} ({} new) in {:.2}ms",
            style,
            built,
            stopwatch.elapsed_millis()
        );
        AtlasBuildOutcome::Built { glyphs: built }
    }

    /// Move a fully staged style into the live map
    fn promote(&mut self, style: Style) {
        let keys: Vec<GlyphKey> = self.staged.keys().filter(|k| k.style == style).copied().collect();
        for key in keys {
            if let Some(mesh) = self.staged.remove(&key) {
                self.glyphs.insert(key, mesh);
            }
        }
        self.ready.insert(style);
    }
}

fn build_glyph<H: SceneHost>(
    host: &mut H,
    base: MeshHandle,
    key: GlyphKey,
    cell: AtlasCell,
) -> Result<MeshHandle, HostError> {
    let mesh = host.clone_mesh_with_new_name(base, &key.mesh_name())?;
    for matrix in cell_transforms(cell) {
        if let Err(err) = host.transform_mesh_uv(mesh, &matrix) {
            if let Err(free_err) = host.free_mesh(mesh) {
                log::warn!("Could not release half-built mesh '{}': {}", key.mesh_name(), free_err);
            }
            return Err(err);
        }
    }
    Ok(mesh)
}
