//! Persisted state
//!
//! The tree markup, target and event flags encoded as URL query parameters:
//! `raw-tree`, `target-id`, `event-bubbles` and `event-composed`.

use evis_events::EventConfig;
use url::{Url, form_urlencoded};

const RAW_TREE: &str = "raw-tree";
const TARGET_ID: &str = "target-id";
const EVENT_BUBBLES: &str = "event-bubbles";
const EVENT_COMPOSED: &str = "event-composed";

/// State decoding error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid value \"{value}\" for \"{key}\", expected true or false")]
    InvalidFlag { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub raw_tree: Option<String>,
    /// Label of the target element; the `target` marker is used when missing
    pub target_id: Option<String>,
    pub event: EventConfig,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            raw_tree: None,
            target_id: None,
            event: EventConfig::new(true, true),
        }
    }
}

impl PersistedState {
    /// Decode a query string, with or without the leading `?`.
    /// Missing flags default to `true`.
    pub fn from_query(query: &str) -> Result<Self, StateError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                RAW_TREE => state.raw_tree = Some(value.into_owned()),
                TARGET_ID => state.target_id = Some(value.into_owned()),
                EVENT_BUBBLES => state.event.bubbles = parse_flag(&key, &value)?,
                EVENT_COMPOSED => state.event.composed = parse_flag(&key, &value)?,
                _ => tracing::debug!("Ignoring unknown state parameter {:?}", key),
            }
        }

        Ok(state)
    }

    /// Decode the query part of a full URL
    pub fn from_url(url: &str) -> Result<Self, StateError> {
        let url = Url::parse(url)?;
        Self::from_query(url.query().unwrap_or(""))
    }

    /// Encode as a query string (without `?`)
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(raw_tree) = &self.raw_tree {
            serializer.append_pair(RAW_TREE, raw_tree);
        }
        if let Some(target_id) = &self.target_id {
            serializer.append_pair(TARGET_ID, target_id);
        }
        serializer.append_pair(EVENT_BUBBLES, flag(self.event.bubbles));
        serializer.append_pair(EVENT_COMPOSED, flag(self.event.composed));
        serializer.finish()
    }

    /// `base` with its query replaced by this state
    pub fn to_url(&self, base: &str) -> Result<String, StateError> {
        let mut url = Url::parse(base)?;
        url.set_query(Some(&self.to_query()));
        Ok(url.into())
    }
}

/// A bare key counts as `true`
fn parse_flag(key: &str, value: &str) -> Result<bool, StateError> {
    match value {
        "" | "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(StateError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
