//! End-to-end tests driving text boxes through a [`MemoryScene`]


use crate::core::TextSystemConfig;
use crate::scene::MemoryScene;
use crate::text::{BindingContext, GlyphAtlasCache, TemplateProperties, TextBoxController, TickContext, TickOutcome};

/// A scene with one text box in it
pub(super) struct Harness {
    pub scene: MemoryScene,
    pub atlas: GlyphAtlasCache,
    pub text_box: TextBoxController,
    pub bindings: BindingContext,
}

impl Harness {
    pub fn new() -> Self {
        let config = TextSystemConfig::default();
        let mut scene = MemoryScene::with_glyph_templates(&config.atlas);
        let owner = scene.spawn_root("TextBox");
        Self {
            scene,
            atlas: GlyphAtlasCache::new(config.atlas.clone()),
            text_box: TextBoxController::new(owner, &config.defaults),
            bindings: BindingContext::new(),
        }
    }

    pub fn tick_with(&mut self, props: &TemplateProperties, messages: &[&str]) -> TickOutcome {
        let messages: Vec<String> = messages.iter().map(ToString::to_string).collect();
        let ctx = TickContext {
            template: props,
            messages: &messages,
            bindings: &self.bindings,
        };
        self.text_box.tick(&mut self.scene, &mut self.atlas, ctx).unwrap()
    }

    pub fn tick(&mut self, props: &TemplateProperties) -> TickOutcome {
        self.tick_with(props, &[])
    }

    pub fn rows(&self) -> Vec<String> {
        crate::text::readback::read_rows(&self.scene, self.text_box.state())
    }
}
