//! Example: Basic usage of the evis engine

use evis_engine::{Config, EventConfig, Visualizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut visualizer = Visualizer::new(Config::default());
    visualizer.load_preset("slotted-content")?;

    for config in [EventConfig::new(true, true), EventConfig::new(true, false)] {
        visualizer.set_event_config(config)?;
        println!("{config}");
        for narration in visualizer.narration() {
            println!("  {}. {}", narration.step + 1, narration);
        }
    }

    if let Some(state) = visualizer.persisted_state() {
        println!("Share: ?{}", state.to_query());
    }
    Ok(())
}
