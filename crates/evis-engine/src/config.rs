//! Engine Configuration

use std::time::Duration;

use evis_events::EventConfig;
use evis_render::RenderConfig;
use serde::{Deserialize, Serialize};

/// Visualizer configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout, spacing and colors
    pub render: RenderConfig,

    /// Event flags used until a state or caller sets others
    pub event: EventConfig,

    /// Time each step stays active while playing (milliseconds)
    pub step_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            event: EventConfig::new(true, true),
            step_duration_ms: 3_000,
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "step_duration_ms": 500, "render": { "padding": 5 } }"#)
            .unwrap();

        assert_eq!(config.step_duration(), Duration::from_millis(500));
        assert_eq!(config.render.padding, 5.0);
        assert_eq!(config.render.layout.horizontal_spacing, 70.0);
        assert_eq!(config.event, EventConfig::new(true, true));
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config::default();
        assert_eq!(Config::from_json(&config.to_json().unwrap()).unwrap(), config);
    }
}
