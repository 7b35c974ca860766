//! Comprehensive tests for evis-engine
//!
//! Full pipeline: markup → tree → steps → graph → scene.

use std::time::Duration;

use evis_engine::{
    BuildOptions, Config, EventConfig, PRESETS, PersistedState, Visualizer, preset,
};

fn current_targets(visualizer: &Visualizer) -> Vec<String> {
    let tree = visualizer.tree().unwrap();
    visualizer
        .steps()
        .iter()
        .map(|s| tree.get(s.current_target).unwrap().display_label())
        .collect()
}

#[test]
fn test_every_preset_runs() {
    for preset in PRESETS {
        let mut visualizer = Visualizer::default();
        visualizer.load_preset(preset.id).unwrap();

        let tree = visualizer.tree().unwrap();
        assert_eq!(visualizer.scene().nodes.len(), tree.len());
        assert!(visualizer.graph().unwrap().is_laid_out());
        assert!(!visualizer.steps().is_empty());
        assert_eq!(visualizer.narration().len(), visualizer.steps().len());
        assert!(visualizer.to_svg().contains("pointer__event"));
    }
}

#[test]
fn test_preset_step_sequences() {
    let mut visualizer = Visualizer::default();

    visualizer.load_preset("simple-tree").unwrap();
    assert_eq!(current_targets(&visualizer), ["div#b", "div#a"]);

    visualizer.load_preset("shadow-tree").unwrap();
    assert_eq!(current_targets(&visualizer), ["div#b", "div#a"]);

    visualizer.load_preset("nested-shadow-tree").unwrap();
    assert_eq!(current_targets(&visualizer), ["div#c", "div#b", "div#a"]);

    visualizer.load_preset("slotted-content").unwrap();
    assert_eq!(current_targets(&visualizer), ["div#c", "slot", "div#b", "div#a"]);
}

#[test]
fn test_event_config_change_keeps_layout() {
    let mut visualizer = Visualizer::default();
    visualizer.load_preset("shadow-tree").unwrap();
    let graph = visualizer.graph().cloned();

    visualizer.set_event_config(EventConfig::new(true, false)).unwrap();
    assert_eq!(visualizer.steps().len(), 1);
    assert_eq!(visualizer.graph().cloned(), graph);

    visualizer.set_event_config(EventConfig::new(false, true)).unwrap();
    assert_eq!(visualizer.steps().len(), 1);
}

#[test]
fn test_playback() {
    let mut visualizer = Visualizer::new(Config {
        step_duration_ms: 100,
        ..Config::default()
    });
    visualizer.load_preset("nested-shadow-tree").unwrap();

    assert!(visualizer.play());
    assert_eq!(visualizer.tick(Duration::from_millis(50)), None);
    assert_eq!(visualizer.tick(Duration::from_millis(50)), Some(1));
    assert_eq!(visualizer.step().unwrap().current_target, visualizer.tree().unwrap().find_by_label("b").unwrap());
    assert_eq!(visualizer.tick(Duration::from_millis(500)), Some(2));
    assert!(!visualizer.player().is_playing());

    assert!(visualizer.previous_step());
    assert_eq!(visualizer.active_step(), 1);
    assert!(visualizer.next_step());
    assert!(!visualizer.next_step());
}

#[test]
fn test_state_round_trip() {
    let mut visualizer = Visualizer::default();
    visualizer.load_preset("slotted-content").unwrap();
    visualizer.set_event_config(EventConfig::new(true, false)).unwrap();

    let state = visualizer.persisted_state().unwrap();
    assert_eq!(state.target_id.as_deref(), Some("c"));

    let decoded = PersistedState::from_query(&state.to_query()).unwrap();
    let mut restored = Visualizer::default();
    restored.load_state(&decoded).unwrap();

    assert_eq!(restored.event_config(), EventConfig::new(true, false));
    assert_eq!(current_targets(&restored), current_targets(&visualizer));
    assert_eq!(restored.tree().unwrap().len(), visualizer.tree().unwrap().len());
}

#[test]
fn test_empty_state_loads_first_preset() {
    let mut visualizer = Visualizer::default();
    visualizer.load_state(&PersistedState::default()).unwrap();

    let expected = preset("simple-tree").unwrap().build().unwrap();
    assert_eq!(visualizer.tree(), Some(&expected));
}

#[test]
fn test_markup_with_target_marker() {
    let mut visualizer = Visualizer::default();
    visualizer
        .load_markup(
            r#"<section id="s"><article id="t" target></article></section>"#,
            &BuildOptions::default(),
        )
        .unwrap();

    assert_eq!(current_targets(&visualizer), ["article#t", "section#s"]);
    let narration = visualizer.narration();
    assert_eq!(
        narration[0].summary,
        "Dispatching new Event({ bubbles: true, composed: true }) on article#t."
    );
}

#[test]
fn test_retarget_current_tree() {
    let mut visualizer = Visualizer::default();
    visualizer.load_preset("nested-shadow-tree").unwrap();

    let b = visualizer.tree().unwrap().find_by_label("b").unwrap();
    visualizer.set_target(b).unwrap();
    assert_eq!(current_targets(&visualizer), ["div#b", "div#a"]);
    assert_eq!(visualizer.persisted_state().unwrap().target_id.as_deref(), Some("b"));
}

#[test]
fn test_load_query() {
    let mut visualizer = Visualizer::default();
    visualizer
        .load_query("?raw-tree=%3Cp+id%3Dx%3E%3Cspan+id%3Dy%3E%3C%2Fspan%3E%3C%2Fp%3E&target-id=y&event-bubbles=false")
        .unwrap();

    assert_eq!(visualizer.event_config(), EventConfig::new(false, true));
    assert_eq!(current_targets(&visualizer), ["span#y"]);
}

fn reload(visualizer: &Visualizer) -> Visualizer {
    let state = visualizer.persisted_state().unwrap();
    let decoded = PersistedState::from_query(&state.to_query()).unwrap();
    let mut restored = Visualizer::default();
    restored.load_state(&decoded).unwrap();
    restored
}

#[test]
fn test_state_round_trip_unlabeled_target() {
    let mut visualizer = Visualizer::default();
    visualizer
        .load_markup(r#"<div id="a" target><p></p></div>"#, &BuildOptions::default())
        .unwrap();
    let tree = visualizer.tree().unwrap();
    let p = tree.children(tree.root())[0];
    visualizer.set_target(p).unwrap();

    let state = visualizer.persisted_state().unwrap();
    assert_eq!(state.target_id, None);
    assert_eq!(state.raw_tree.as_deref(), Some(r#"<div id="a"><p target></p></div>"#));

    let restored = reload(&visualizer);
    assert_eq!(current_targets(&restored), ["p", "div#a"]);
}

#[test]
fn test_state_round_trip_duplicate_labels() {
    let mut visualizer = Visualizer::default();
    visualizer
        .load_markup(r#"<div id="x"><div id="x" target></div></div>"#, &BuildOptions::default())
        .unwrap();

    let state = visualizer.persisted_state().unwrap();
    assert_eq!(state.target_id, None);

    let restored = reload(&visualizer);
    let tree = restored.tree().unwrap();
    assert_eq!(tree.target(), Some(tree.children(tree.root())[0]));
    assert_eq!(restored.steps().len(), 2);
}
