//! Comprehensive tests for evis-events
//!
//! Dispatch over light trees, shadow trees, nested shadow trees and slots.

use evis_dom::{DomTree, NodeId};
use evis_events::{EventConfig, EventPhase, event_path, narrate, simulate};
use evis_html::build_tree;

const SIMPLE_TREE: &str = r#"<div id=a><div id=b target></div><div id=c></div></div>"#;

const SHADOW_TREE: &str =
    r#"<div id=a><template shadow-root mode=open><div id=b target></div></template></div>"#;

const NESTED_SHADOW_TREE: &str = r#"
<div id="a">
  <template shadow-root mode="open">
    <div id="b">
      <template shadow-root mode="open">
        <div id="c" target></div>
      </template>
    </div>
  </template>
</div>
"#;

const SLOTTED_CONTENT: &str = r#"
<div id="a">
  <template shadow-root mode="open">
    <div id="b">
      <slot></slot>
    </div>
  </template>
  <div id="c" target></div>
</div>
"#;

fn id(tree: &DomTree, label: &str) -> NodeId {
    tree.find_by_label(label).unwrap()
}

fn labels(tree: &DomTree, ids: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    ids.into_iter()
        .map(|id| tree.get(id).unwrap().display_label())
        .collect()
}

#[test]
fn test_simple_tree() {
    let tree = build_tree(SIMPLE_TREE).unwrap();
    let steps = simulate(&tree, EventConfig::new(true, true)).unwrap();

    assert_eq!(steps.len(), 2);
    assert_eq!(
        labels(&tree, steps.iter().map(|s| s.current_target)),
        ["div#b", "div#a"]
    );
    assert!(steps.iter().all(|s| s.target == id(&tree, "b")));
    assert!(steps.iter().all(|s| !s.touches(id(&tree, "c"))));
}

#[test]
fn test_single_shadow_tree_retargets_to_host() {
    let tree = build_tree(SHADOW_TREE).unwrap();
    let steps = simulate(&tree, EventConfig::new(true, true)).unwrap();

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].current_target, id(&tree, "b"));
    assert_eq!(steps[0].target, id(&tree, "b"));
    assert_eq!(steps[1].current_target, id(&tree, "a"));
    assert_eq!(steps[1].target, id(&tree, "a"));
    assert_eq!(steps[1].phase, EventPhase::AtTarget);

    let shadow_root = tree.shadow_root(id(&tree, "a")).unwrap();
    assert_eq!(
        steps[0].composed_path,
        [id(&tree, "b"), shadow_root, id(&tree, "a")]
    );
}

#[test]
fn test_uncomposed_event_stops_at_shadow_root() {
    let tree = build_tree(SHADOW_TREE).unwrap();
    let steps = simulate(&tree, EventConfig::new(true, false)).unwrap();

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].current_target, id(&tree, "b"));
    assert!(!steps[0].touches(id(&tree, "a")));
}

#[test]
fn test_slotted_content_passes_through_slot() {
    let tree = build_tree(SLOTTED_CONTENT).unwrap();
    let steps = simulate(&tree, EventConfig::new(true, true)).unwrap();

    assert_eq!(
        labels(&tree, steps.iter().map(|s| s.current_target)),
        ["div#c", "slot", "div#b", "div#a"]
    );
    assert!(steps[0].touches(id(&tree, "c")));
    assert!(steps[0].touches(id(&tree, "b")));
    // The target lives in the outer tree, so it is never retargeted
    assert!(steps.iter().all(|s| s.target == id(&tree, "c")));
}

#[test]
fn test_nested_shadow_trees_retarget_per_level() {
    let tree = build_tree(NESTED_SHADOW_TREE).unwrap();
    let steps = simulate(&tree, EventConfig::new(true, true)).unwrap();

    assert_eq!(labels(&tree, steps.iter().map(|s| s.target)), ["div#c", "div#b", "div#a"]);
    assert_eq!(
        labels(&tree, steps.iter().map(|s| s.current_target)),
        ["div#c", "div#b", "div#a"]
    );
    assert!(steps.iter().all(|s| s.phase == EventPhase::AtTarget));
}

#[test]
fn test_non_bubbling_event_has_one_step() {
    for markup in [SIMPLE_TREE, SHADOW_TREE, NESTED_SHADOW_TREE, SLOTTED_CONTENT] {
        let tree = build_tree(markup).unwrap();
        for composed in [true, false] {
            let steps = simulate(&tree, EventConfig::new(false, composed)).unwrap();
            assert_eq!(steps.len(), 1);
            assert_eq!(Some(steps[0].current_target), tree.target());
        }
    }
}

#[test]
fn test_composed_bubbling_visits_every_element_ancestor() {
    for markup in [SIMPLE_TREE, SHADOW_TREE, NESTED_SHADOW_TREE] {
        let tree = build_tree(markup).unwrap();
        let target = tree.target().unwrap();
        let ancestors = tree
            .shadow_including_ancestors(target)
            .filter(|id| tree.get(*id).unwrap().is_element())
            .count();

        let steps = simulate(&tree, EventConfig::new(true, true)).unwrap();
        assert_eq!(steps.len(), ancestors);
        assert_eq!(steps.last().unwrap().current_target, tree.root());
    }
}

#[test]
fn test_uncomposed_paths_stay_in_observer_tree() {
    for markup in [SIMPLE_TREE, SHADOW_TREE, NESTED_SHADOW_TREE, SLOTTED_CONTENT] {
        let tree = build_tree(markup).unwrap();
        let steps = simulate(&tree, EventConfig::new(true, false)).unwrap();

        for step in &steps {
            let observer_root = tree.root_of(step.current_target);
            assert!(
                step.composed_path
                    .iter()
                    .all(|id| tree.root_of(*id) == observer_root)
            );
        }
    }
}

#[test]
fn test_event_path_is_leaf_to_root() {
    let tree = build_tree(NESTED_SHADOW_TREE).unwrap();
    let path = event_path(&tree, tree.target().unwrap(), true);

    assert_eq!(path.first(), tree.target().as_ref());
    assert_eq!(path.last(), Some(&tree.root()));
    assert_eq!(path.len(), tree.len());
}

#[test]
fn test_narration_mentions_retargeting() {
    let tree = build_tree(SHADOW_TREE).unwrap();
    let config = EventConfig::new(true, true);
    let steps = simulate(&tree, config).unwrap();
    let narration = narrate(&tree, config, &steps);

    assert_eq!(
        narration[0].summary,
        "Dispatching new Event({ bubbles: true, composed: true }) on div#b."
    );
    assert_eq!(narration[1].summary, "Event propagates to div#a.");
    assert_eq!(narration[1].retargeted.as_deref(), Some("Target is set to div#a."));
    assert!(narration[1].composed_path.is_none());
}
