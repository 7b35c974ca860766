//! evis Engine
//!
//! Event propagation visualizer pipeline: markup is parsed into a tree,
//! dispatch is simulated over it, and the tree is laid out and drawn with the
//! active step highlighted.
//!
//! # Features
//!
//! - `mimalloc`: use mimalloc as the global allocator
//!
//! # Example
//! ```rust,ignore
//! use evis_engine::{Config, Visualizer};
//!
//! let mut visualizer = Visualizer::new(Config::default());
//! visualizer.load_preset("shadow-tree")?;
//! for line in visualizer.narration() {
//!     println!("{line}");
//! }
//! let svg = visualizer.to_svg();
//! ```

mod alloc;
mod config;
mod player;
mod presets;
mod state;
mod visualizer;

pub use config::Config;
pub use player::Player;
pub use presets::{PRESETS, Preset, preset};
pub use state::{PersistedState, StateError};
pub use visualizer::Visualizer;

pub use evis_dom::{BuildOptions, DomTree, NodeId, TargetSpec, TreeError};
pub use evis_events::{EventConfig, EventDispatchingStep, EventPhase, SimulationError, StepNarration};
pub use evis_html::ParseError;
pub use evis_render::{RenderConfig, RenderError, Scene};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pipeline error. A failed stage leaves the visualizer unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("Unknown preset \"{0}\"")]
    UnknownPreset(String),

    #[error("Step {index} is out of range ({count} steps)")]
    StepOutOfRange { index: usize, count: usize },

    #[error("No tree is loaded")]
    NoTree,
}
