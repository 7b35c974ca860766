//! Visualizer - pipeline orchestration
//!
//! Every input change runs the whole pipeline (tree, simulation, graph,
//! layout) before anything is replaced, so a failing stage leaves the last
//! good state on screen.

use std::time::Duration;

use evis_dom::{BuildOptions, DomTree, NodeId, TargetSpec};
use evis_events::{EventConfig, EventDispatchingStep, StepNarration, narrate, simulate};
use evis_graph::Graph;
use evis_html::HtmlSerializer;
use evis_render::{GraphRenderer, RenderError, Scene};

use crate::{Config, PersistedState, PipelineError, Player, PRESETS, preset};

#[derive(Debug)]
pub struct Visualizer {
    config: Config,
    tree: Option<DomTree>,
    event: EventConfig,
    steps: Vec<EventDispatchingStep>,
    renderer: GraphRenderer,
    player: Player,
}

impl Visualizer {
    pub fn new(config: Config) -> Self {
        tracing::info!(
            "evis {} initialized ({} allocator)",
            crate::VERSION,
            crate::alloc::allocator_name()
        );
        Self {
            event: config.event,
            renderer: GraphRenderer::new(config.render.clone()),
            player: Player::new(config.step_duration()),
            tree: None,
            steps: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tree(&self) -> Option<&DomTree> {
        self.tree.as_ref()
    }

    pub fn event_config(&self) -> EventConfig {
        self.event
    }

    pub fn steps(&self) -> &[EventDispatchingStep] {
        &self.steps
    }

    pub fn active_step(&self) -> usize {
        self.player.active_step()
    }

    /// Step currently highlighted
    pub fn step(&self) -> Option<&EventDispatchingStep> {
        self.steps.get(self.player.active_step())
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.renderer.graph()
    }

    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    pub fn to_svg(&self) -> String {
        self.renderer.to_svg()
    }

    pub fn to_png(&self, scale: f32) -> Result<Vec<u8>, RenderError> {
        evis_render::encode_png(self.renderer.scene(), scale)
    }

    /// Description of every step
    pub fn narration(&self) -> Vec<StepNarration> {
        match &self.tree {
            Some(tree) => narrate(tree, self.event, &self.steps),
            None => Vec::new(),
        }
    }

    /// Parse and show `markup`
    pub fn load_markup(&mut self, markup: &str, options: &BuildOptions) -> Result<(), PipelineError> {
        let tree = evis_html::build_tree_with(markup, options).inspect_err(|e| {
            tracing::warn!("Invalid event tree, keeping the previous one: {}", e);
        })?;
        self.commit(tree, self.event)
    }

    pub fn load_preset(&mut self, id: &str) -> Result<(), PipelineError> {
        let preset = preset(id).ok_or_else(|| PipelineError::UnknownPreset(id.to_string()))?;
        tracing::info!("Loading preset \"{}\"", preset.label);
        self.load_markup(preset.markup, &preset.build_options())
    }

    /// Restore a persisted state. Without markup the first preset is shown.
    pub fn load_state(&mut self, state: &PersistedState) -> Result<(), PipelineError> {
        let tree = match (&state.raw_tree, &state.target_id) {
            (Some(markup), target_id) => {
                let options = BuildOptions {
                    target: target_id
                        .clone()
                        .map_or(TargetSpec::Marker, TargetSpec::Label),
                };
                evis_html::build_tree_with(markup, &options)?
            }
            (None, _) => PRESETS[0].build()?,
        };
        self.commit(tree, state.event)
    }

    /// Restore a state from a URL query string
    pub fn load_query(&mut self, query: &str) -> Result<(), PipelineError> {
        let state = PersistedState::from_query(query)?;
        self.load_state(&state)
    }

    /// Current tree, target and flags as a persisted state.
    ///
    /// The saved markup carries the `target` marker on the current target.
    /// `target-id` is only written when the target's label is unique.
    pub fn persisted_state(&self) -> Option<PersistedState> {
        let tree = self.tree.as_ref()?;
        Some(PersistedState {
            raw_tree: Some(HtmlSerializer::new().with_target_marker().serialize(tree)),
            target_id: tree.target_label().map(str::to_string),
            event: self.event,
        })
    }

    /// Show an already built tree
    pub fn set_tree(&mut self, tree: DomTree) -> Result<(), PipelineError> {
        self.commit(tree, self.event)
    }

    /// Dispatch on another element of the current tree
    pub fn set_target(&mut self, target: NodeId) -> Result<(), PipelineError> {
        let tree = self.tree.clone().ok_or(PipelineError::NoTree)?;
        let tree = tree.with_target(target)?;
        self.commit(tree, self.event)
    }

    /// Change the event flags: re-simulates, keeps the layout
    pub fn set_event_config(&mut self, event: EventConfig) -> Result<(), PipelineError> {
        let Some(tree) = &self.tree else {
            self.event = event;
            return Ok(());
        };

        self.steps = simulate(tree, event)?;
        self.event = event;
        self.player.set_step_count(self.steps.len());
        self.sync_step();
        Ok(())
    }

    pub fn set_active_step(&mut self, index: usize) -> Result<(), PipelineError> {
        if !self.player.seek(index) {
            return Err(PipelineError::StepOutOfRange {
                index,
                count: self.steps.len(),
            });
        }
        self.sync_step();
        Ok(())
    }

    pub fn next_step(&mut self) -> bool {
        self.player.next() && self.sync_step()
    }

    pub fn previous_step(&mut self) -> bool {
        self.player.previous() && self.sync_step()
    }

    pub fn play(&mut self) -> bool {
        self.player.play()
    }

    pub fn pause(&mut self) {
        self.player.stop();
    }

    /// Advance playback by `elapsed`. Returns the new step when it changed.
    pub fn tick(&mut self, elapsed: Duration) -> Option<usize> {
        let step = self.player.tick(elapsed)?;
        self.sync_step();
        Some(step)
    }

    fn commit(&mut self, tree: DomTree, event: EventConfig) -> Result<(), PipelineError> {
        let steps = simulate(&tree, event).inspect_err(|e| {
            tracing::warn!("Cannot simulate dispatch, keeping the previous tree: {}", e);
        })?;

        self.renderer.set_tree(&tree);
        self.tree = Some(tree);
        self.event = event;
        self.steps = steps;
        self.player.set_step_count(self.steps.len());
        self.sync_step();

        tracing::debug!("Pipeline produced {} steps", self.steps.len());
        Ok(())
    }

    fn sync_step(&mut self) -> bool {
        match self.steps.get(self.player.active_step()) {
            Some(step) => {
                self.renderer.set_step(step);
                true
            }
            None => {
                self.renderer.clear_step();
                false
            }
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
