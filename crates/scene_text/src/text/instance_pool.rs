//! Glyph instance reconciliation
//!
//! Brings a text box's live glyph instances in line with freshly laid-out
//! lines. The lines are rendered as one glyph stream, line breaks included,
//! with one instance per character: surplus trailing instances are
//! destroyed, missing ones are spawned, and every instance is then
//! positioned on the text grid.
//!
//! Mesh swaps are the expensive part, so an instance is only rebound when
//! its character or the text box's style changed. Color, visibility,
//! position and scale are refreshed on every pass.

use super::atlas_map;
use super::glyph_cache::{GlyphAtlasCache, GlyphKey};
use super::state::{GlyphInstance, TextBoxState};
use crate::foundation::math::Vec3;
use crate::scene::{HostError, SceneHost};

/// Result type for text box operations
pub type TextResult<T> = Result<T, TextError>;

/// Errors surfaced while updating a text box's glyph instances
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The host scene rejected an operation
    #[error("Scene host error: {0}")]
    Host(#[from] HostError),
}

/// What a reconciliation pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Glyphs in the rendered stream
    pub glyphs: usize,
    /// Instances spawned
    pub created: usize,
    /// Instances destroyed
    pub destroyed: usize,
    /// Instances whose mesh was replaced
    pub rebound: usize,
}

/// Characters that are laid out but never shown
pub fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n')
}

/// Join display lines into the glyph stream that gets rendered
pub fn glyph_stream(lines: &[String]) -> Vec<char> {
    lines.join("\n").chars().collect()
}

/// Reconcile `state.instances` against `lines`
///
/// Afterwards there is exactly one instance per glyph of the stream and
/// `state.last_style` holds the style the instances are bound for.
pub fn reconcile<H: SceneHost>(
    host: &mut H,
    atlas: &GlyphAtlasCache,
    state: &mut TextBoxState,
    lines: &[String],
) -> TextResult<ReconcileStats> {
    let glyphs = glyph_stream(lines);
    let mut stats = ReconcileStats {
        glyphs: glyphs.len(),
        ..ReconcileStats::default()
    };

    stats.destroyed = shrink(host, state, glyphs.len());
    stats.created = grow(host, atlas, state, glyphs.len())?;

    let config = &state.config;
    let style = config.style;
    let style_changed = state.last_style != Some(style);
    let scale = Vec3::new(config.size, config.size, 1.0);

    let (mut col, mut row) = (0i32, 0i32);
    for (instance, &ch) in state.instances.iter_mut().zip(&glyphs) {
        if instance.glyph != Some(ch) || style_changed {
            instance.glyph = Some(ch);
            if let Some(mesh) = atlas.mesh_for(GlyphKey::new(style, ch)) {
                host.replace_mesh(instance.object, mesh)?;
                stats.rebound += 1;
                log::trace!("Bound glyph '{}' (style {}) to {:?}", ch, style, instance.object);
            }
        }

        let visible = !is_blank(ch) && atlas_map::is_supported(ch);
        let position = Vec3::new(col as f32 * config.offset_h, row as f32 * config.offset_v, 0.0);
        host.set_color(instance.object, state.color)?;
        host.set_visible(instance.object, visible)?;
        host.set_local_position(instance.object, position)?;
        host.set_local_scale(instance.object, scale)?;

        col += 1;
        if ch == '\n' {
            col = 0;
            row -= 1;
        }
    }

    state.last_style = Some(style);
    Ok(stats)
}

/// Destroy trailing instances beyond `target`
fn shrink<H: SceneHost>(host: &mut H, state: &mut TextBoxState, target: usize) -> usize {
    if state.instances.len() <= target {
        return 0;
    }
    let surplus = state.instances.split_off(target);
    for instance in &surplus {
        // A failure here means the host already removed the object
        if let Err(err) = host.destroy_object(instance.object) {
            log::warn!("Surplus glyph {:?} already gone: {}", instance.object, err);
        }
    }
    log::debug!("Destroyed {} surplus glyph instances", surplus.len());
    surplus.len()
}

/// Spawn instances until there are `target`
fn grow<H: SceneHost>(
    host: &mut H,
    atlas: &GlyphAtlasCache,
    state: &mut TextBoxState,
    target: usize,
) -> TextResult<usize> {
    let missing = target.saturating_sub(state.instances.len());
    let template = &atlas.config().blank_glyph_template;
    for _ in 0..missing {
        let object = host.create_object(template)?;
        if let Err(err) = host.set_parent(object, state.owner) {
            if let Err(cleanup) = host.destroy_object(object) {
                log::warn!("Could not remove orphaned glyph {:?}: {}", object, cleanup);
            }
            return Err(err.into());
        }
        state.instances.push(GlyphInstance::unbound(object));
    }
    if missing > 0 {
        log::debug!("Spawned {} glyph instances", missing);
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AtlasConfig;
    use crate::foundation::math::rgba;
    use crate::text::glyph_cache::Style;
    use crate::scene::MemoryScene;
    use crate::text::properties::TextBoxConfig;

    struct Fixture {
        scene: MemoryScene,
        atlas: GlyphAtlasCache,
        state: TextBoxState,
    }

    fn fixture() -> Fixture {
        let config = AtlasConfig::default();
        let mut scene = MemoryScene::with_glyph_templates(&config);
        let mut atlas = GlyphAtlasCache::new(config);
        for style in Style::all() {
            atlas.ensure_style_built(&mut scene, style);
        }
        let owner = scene.spawn_root("TextBox");
        Fixture {
            scene,
            atlas,
            state: TextBoxState::new(owner, TextBoxConfig::default()),
        }
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn reconcile_fixture(f: &mut Fixture, text: &[&str]) -> ReconcileStats {
        reconcile(&mut f.scene, &f.atlas, &mut f.state, &lines(text)).unwrap()
    }

    #[test]
    fn test_instance_count_matches_stream() {
        let mut f = fixture();
        let stats = reconcile_fixture(&mut f, &["ab", "c"]);

        assert_eq!(stats.glyphs, 4);
        assert_eq!(stats.created, 4);
        assert_eq!(f.state.instances.len(), 4);
        assert_eq!(f.scene.children_of(f.state.owner).len(), 4);
    }

    #[test]
    fn test_grow_and_shrink() {
        let mut f = fixture();
        for text in [&["hello"][..], &["hi"], &[], &["a much longer line", "x"], &["z"]] {
            reconcile_fixture(&mut f, text);
            let expected = glyph_stream(&lines(text)).len();
            assert_eq!(f.state.instances.len(), expected);
            assert_eq!(f.scene.children_of(f.state.owner).len(), expected);
        }
    }

    #[test]
    fn test_shrink_keeps_leading_instances() {
        let mut f = fixture();
        reconcile_fixture(&mut f, &["abcd"]);
        let before = f.state.instance_objects();

        let stats = reconcile_fixture(&mut f, &["ab"]);
        assert_eq!(stats.destroyed, 2);
        assert_eq!(f.state.instance_objects(), before[..2]);
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let mut f = fixture();
        reconcile_fixture(&mut f, &["same", "text"]);
        let instances = f.state.instances.clone();
        let replacements = f.scene.stats().mesh_replacements;

        let stats = reconcile_fixture(&mut f, &["same", "text"]);
        assert_eq!(stats, ReconcileStats { glyphs: 9, ..ReconcileStats::default() });
        assert_eq!(f.state.instances, instances);
        assert_eq!(f.scene.stats().mesh_replacements, replacements);
    }

    #[test]
    fn test_only_changed_glyphs_rebound() {
        let mut f = fixture();
        reconcile_fixture(&mut f, &["cat"]);
        let stats = reconcile_fixture(&mut f, &["car"]);
        assert_eq!(stats.rebound, 1);
    }

    #[test]
    fn test_style_change_rebinds_everything() {
        let mut f = fixture();
        reconcile_fixture(&mut f, &["abc"]);
        f.state.config.style = Style::clamped(2);
        let stats = reconcile_fixture(&mut f, &["abc"]);

        assert_eq!(stats.rebound, 3);
        let mesh = f.scene.object(f.state.instances[0].object).unwrap().mesh.unwrap();
        assert_eq!(f.scene.mesh(mesh).unwrap().name, "2-97");
    }

    #[test]
    fn test_grid_positions() {
        let mut f = fixture();
        f.state.config.offset_h = 0.5;
        f.state.config.offset_v = 2.0;
        reconcile_fixture(&mut f, &["ab", "c"]);

        let positions: Vec<Vec3> = f
            .state
            .instances
            .iter()
            .map(|i| f.scene.object(i.object).unwrap().local_position)
            .collect();
        assert_eq!(positions[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(positions[1], Vec3::new(0.5, 0.0, 0.0));
        // Line break glyph sits at the end of its row
        assert_eq!(positions[2], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(positions[3], Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn test_visibility_color_and_scale() {
        let mut f = fixture();
        f.state.config.size = 0.25;
        f.state.config.color_spec = "GREEN".to_string();
        f.state.refresh_color();
        reconcile_fixture(&mut f, &["a b", "c\u{263A}"]);

        let visible: Vec<bool> = f
            .state
            .instances
            .iter()
            .map(|i| f.scene.object(i.object).unwrap().visible)
            .collect();
        assert_eq!(visible, vec![true, false, true, false, true, false]);

        let first = f.scene.object(f.state.instances[0].object).unwrap();
        assert_eq!(first.color, rgba(0.0, 1.0, 0.0, 1.0));
        assert_eq!(first.local_scale, Vec3::new(0.25, 0.25, 1.0));
    }

    #[test]
    fn test_color_refreshed_without_rebind() {
        let mut f = fixture();
        reconcile_fixture(&mut f, &["xy"]);
        f.state.config.color_spec = "BLUE".to_string();
        f.state.refresh_color();

        let stats = reconcile_fixture(&mut f, &["xy"]);
        assert_eq!(stats.rebound, 0);
        for instance in &f.state.instances {
            assert_eq!(f.scene.object(instance.object).unwrap().color, rgba(0.0, 0.0, 1.0, 1.0));
        }
    }

    #[test]
    fn test_missing_blank_template_is_an_error() {
        let mut f = fixture();
        let atlas = GlyphAtlasCache::new(AtlasConfig {
            blank_glyph_template: "nope".to_string(),
            ..AtlasConfig::default()
        });
        let err = reconcile(&mut f.scene, &atlas, &mut f.state, &lines(&["a"])).unwrap_err();
        assert_eq!(err, TextError::Host(HostError::UnknownTemplate("nope".to_string())));
    }
}
