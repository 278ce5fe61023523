//! Text demo application
//!
//! Drives a handful of text boxes through the full glyph pipeline against an
//! in-memory scene and logs what every box displays after each tick.
//!
//! Usage: `text_demo [scene.ron|scene.toml]`

use scene_text::prelude::*;
use serde::{Deserialize, Serialize};

const DEFAULT_SCENE: &str = "text_demo/scene.ron";

/// Binding updated with the tick number before every tick
const TICK_BINDING: &str = "demo.tick";

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to load scene: {0}")]
    Config(#[from] ConfigError),

    #[error("Text box '{name}' failed: {source}")]
    Text { name: String, source: TextError },
}

/// Property replacement applied to a box at a given tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PropertyChange {
    tick: u64,
    properties: TemplateProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct DemoBox {
    name: String,
    properties: TemplateProperties,
    changes: Vec<PropertyChange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct DemoBroadcast {
    tick: u64,
    addressees: Vec<String>,
}

/// Scene file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct DemoScene {
    system: TextSystemConfig,
    ticks: u64,
    bindings: BindingContext,
    boxes: Vec<DemoBox>,
    broadcasts: Vec<DemoBroadcast>,
}

impl Default for DemoScene {
    fn default() -> Self {
        Self {
            system: TextSystemConfig::default(),
            ticks: 8,
            bindings: BindingContext::new(),
            boxes: vec![DemoBox {
                name: "greeting".to_string(),
                properties: TemplateProperties::new().with_text("hello world"),
                changes: Vec::new(),
            }],
            broadcasts: Vec::new(),
        }
    }
}

impl Config for DemoScene {}

struct LiveBox {
    name: String,
    controller: TextBoxController,
    properties: TemplateProperties,
    changes: Vec<PropertyChange>,
}

fn run(scene_def: DemoScene) -> Result<(), DemoError> {
    let mut scene = MemoryScene::with_glyph_templates(&scene_def.system.atlas);
    let mut atlas = GlyphAtlasCache::new(scene_def.system.atlas.clone());
    let mut bus = BroadcastBus::new();
    let mut bindings = scene_def.bindings;

    let mut boxes: Vec<LiveBox> = scene_def
        .boxes
        .into_iter()
        .map(|def| {
            let owner = scene.spawn_root(&def.name);
            LiveBox {
                name: def.name,
                controller: TextBoxController::new(owner, &scene_def.system.defaults),
                properties: def.properties,
                changes: def.changes,
            }
        })
        .collect();

    for broadcast in scene_def.broadcasts {
        bus.post(broadcast.tick, Broadcast::new(0, broadcast.addressees));
    }

    for tick in 0..scene_def.ticks {
        bus.update_tick(tick);
        bindings.set(TICK_BINDING, tick);
        let messages = bus.dispatch_addressees();
        if !messages.is_empty() {
            log::info!("tick {}: broadcast {:?}", tick, messages);
        }

        for live in &mut boxes {
            if let Some(change) = live.changes.iter().find(|c| c.tick == tick) {
                live.properties = change.properties.clone();
            }

            let ctx = TickContext {
                template: &live.properties,
                messages: &messages,
                bindings: &bindings,
            };
            let outcome = live
                .controller
                .tick(&mut scene, &mut atlas, ctx)
                .map_err(|source| DemoError::Text {
                    name: live.name.clone(),
                    source,
                })?;

            match outcome {
                TickOutcome::Refreshed { triggers, stats } => {
                    log::info!(
                        "tick {} [{}] refreshed by {:?} ({} glyphs, {} created, {} destroyed)",
                        tick,
                        live.name,
                        triggers,
                        stats.glyphs,
                        stats.created,
                        stats.destroyed
                    );
                    for row in read_rows(&scene, live.controller.state()) {
                        log::info!("    |{}|", row);
                    }
                }
                TickOutcome::Deferred(build) => {
                    log::info!("tick {} [{}] waiting for glyph atlas: {:?}", tick, live.name, build);
                }
                TickOutcome::Skipped | TickOutcome::Disabled => {
                    log::debug!("tick {} [{}] {}", tick, live.name, live.controller.phase());
                }
            }
        }
    }

    log::info!(
        "Done: {} objects, {} meshes in scene",
        scene.object_count(),
        scene.mesh_count()
    );
    Ok(())
}

fn main() {
    scene_text::foundation::logging::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let scene_def = match DemoScene::load_from_file(&path) {
        Ok(scene_def) => scene_def,
        Err(e) => {
            log::warn!("Using built-in scene, could not load '{}': {}", path, e);
            DemoScene::default()
        }
    };

    if let Err(e) = run(scene_def) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
