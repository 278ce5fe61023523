//! Per-text-box refresh state machine
//!
//! The host ticks every text box once per frame. Each tick the controller
//! pulls the template's properties, makes sure the glyph meshes for the
//! current style exist and then decides whether the text needs to be laid
//! out and reconciled again.

use std::fmt;

use bitflags::bitflags;

use super::binding::BindingContext;
use super::glyph_cache::{AtlasBuildOutcome, GlyphAtlasCache};
use super::instance_pool::{self, ReconcileStats, TextResult};
use super::layout;
use super::properties::{TemplateProperties, TextBoxConfig};
use super::sensor::PulseSensor;
use super::state::TextBoxState;
use crate::core::TextBoxDefaults;
use crate::foundation::time::Stopwatch;
use crate::scene::{ObjectHandle, SceneHost};

/// Addressee that reaches every text box
pub const BROADCAST_ALL: &str = "all";

/// Where a controller is in its refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Nothing pending
    Idle,
    /// Waiting for the current style's glyph meshes
    Initializing,
    /// Laying out and reconciling
    Refreshing,
    /// Suppressed by the template
    Disabled,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Initializing => "initializing",
            Self::Refreshing => "refreshing",
            Self::Disabled => "disabled",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Reasons a refresh happened
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RefreshTrigger: u8 {
        /// The pulse sensor fired
        const TIMER = 1 << 0;
        /// A broadcast addressed this text box
        const MESSAGE = 1 << 1;
        /// Change-driven mode and the text changed
        const TEXT_CHANGED = 1 << 2;
    }
}

/// Inputs delivered to a controller for one tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Current properties of the owning template
    pub template: &'a TemplateProperties,
    /// Broadcast addressees received this tick
    pub messages: &'a [String],
    /// Values `>`-prefixed text may refer to
    pub bindings: &'a BindingContext,
}

/// What a tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The template disables the text box; nothing was touched
    Disabled,
    /// The style's glyph meshes were not ready; a build was attempted
    Deferred(AtlasBuildOutcome),
    /// No trigger fired
    Skipped,
    /// The text was laid out and reconciled
    Refreshed {
        /// Triggers that fired
        triggers: RefreshTrigger,
        /// Reconciliation summary
        stats: ReconcileStats,
    },
}

/// Drives one text box
#[derive(Debug, Clone)]
pub struct TextBoxController {
    state: TextBoxState,
    sensor: PulseSensor,
    phase: ControllerState,
}

impl TextBoxController {
    /// Controller for a text box owned by `owner`, starting from `defaults`
    pub fn new(owner: ObjectHandle, defaults: &TextBoxDefaults) -> Self {
        let config = TextBoxConfig::from_defaults(defaults);
        let mut sensor = PulseSensor::new();
        sensor.configure(config.update);
        Self {
            state: TextBoxState::new(owner, config),
            sensor,
            phase: ControllerState::Initializing,
        }
    }

    /// Current phase
    pub fn phase(&self) -> ControllerState {
        self.phase
    }

    /// Text box state
    pub fn state(&self) -> &TextBoxState {
        &self.state
    }

    /// Resolved configuration
    pub fn config(&self) -> &TextBoxConfig {
        &self.state.config
    }

    /// Run one tick
    pub fn tick<H: SceneHost>(
        &mut self,
        host: &mut H,
        atlas: &mut GlyphAtlasCache,
        ctx: TickContext<'_>,
    ) -> TextResult<TickOutcome> {
        if ctx.template.is_disabled() {
            if self.phase != ControllerState::Disabled {
                log::debug!("Text box {:?} disabled", self.state.owner);
            }
            self.phase = ControllerState::Disabled;
            return Ok(TickOutcome::Disabled);
        }

        self.state.config.merge(ctx.template, ctx.bindings);
        self.sensor.configure(self.state.config.update);
        self.state.refresh_color();

        let style = self.state.config.style;
        if !atlas.is_style_ready(style) {
            self.phase = ControllerState::Initializing;
            let outcome = atlas.ensure_style_built(host, style);
            return Ok(TickOutcome::Deferred(outcome));
        }

        let triggers = self.triggers(ctx.messages);
        if triggers.is_empty() {
            self.phase = ControllerState::Idle;
            return Ok(TickOutcome::Skipped);
        }

        self.phase = ControllerState::Refreshing;
        let stopwatch = Stopwatch::start_new();
        let config = &self.state.config;
        let lines = layout::layout(&config.text, config.wrap, config.justify);
        let stats = match instance_pool::reconcile(host, atlas, &mut self.state, &lines) {
            Ok(stats) => stats,
            Err(err) => {
                self.phase = ControllerState::Idle;
                return Err(err);
            }
        };
        self.state.last_text = Some(self.state.config.text.clone());
        self.phase = ControllerState::Idle;

        log::debug!(
            "Refreshed text box {:?} ({:?}): {} lines, {} glyphs, {} rebound in {:.3}ms",
            self.state.owner,
            triggers,
            lines.len(),
            stats.glyphs,
            stats.rebound,
            stopwatch.elapsed_millis()
        );
        Ok(TickOutcome::Refreshed { triggers, stats })
    }

    fn triggers(&mut self, messages: &[String]) -> RefreshTrigger {
        let mut triggers = RefreshTrigger::empty();
        if self.sensor.tick() {
            triggers |= RefreshTrigger::TIMER;
        }
        if messages.iter().any(|m| self.is_addressed_by(m)) {
            triggers |= RefreshTrigger::MESSAGE;
        }
        if self.state.config.update < 0 && self.state.text_changed() {
            triggers |= RefreshTrigger::TEXT_CHANGED;
        }
        triggers
    }

    /// Whether a broadcast addressee targets this text box
    pub fn is_addressed_by(&self, addressee: &str) -> bool {
        let id = &self.state.config.id;
        addressee.eq_ignore_ascii_case(BROADCAST_ALL) || (!id.is_empty() && addressee == id)
    }
}
