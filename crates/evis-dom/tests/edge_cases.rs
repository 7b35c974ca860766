//! Edge case tests for evis-dom
//!
//! Malformed markup, degenerate trees and unusual nesting.

use evis_dom::{BuildOptions, MarkupElement, MarkupFragment, TreeError, build_tree};

// ============================================================================
// ROOT ELEMENT
// ============================================================================

#[test]
fn test_empty_fragment() {
    let err = build_tree(&MarkupFragment::default(), &BuildOptions::deferred()).unwrap_err();
    assert_eq!(err, TreeError::MalformedTree { found: 0 });
}

#[test]
fn test_multiple_roots() {
    let fragment = MarkupFragment::new(vec![
        MarkupElement::new("div"),
        MarkupElement::new("div"),
        MarkupElement::new("span"),
    ]);
    let err = build_tree(&fragment, &BuildOptions::deferred()).unwrap_err();
    assert_eq!(err, TreeError::MalformedTree { found: 3 });
    assert_eq!(err.to_string(), "Invalid tree. Expected 1 root element but found 3.");
}

#[test]
fn test_single_node_tree() {
    let fragment = MarkupFragment::from(MarkupElement::new("div").with_attr("target", ""));
    let tree = build_tree(&fragment, &BuildOptions::default()).unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.target(), Some(tree.root()));
    assert!(tree.children(tree.root()).is_empty());
}

// ============================================================================
// SHADOW ROOT MARKERS
// ============================================================================

#[test]
fn test_root_cannot_be_marker() {
    let fragment = MarkupFragment::from(
        MarkupElement::new("template")
            .with_attr("shadow-root", "")
            .with_attr("mode", "open"),
    );
    let err = build_tree(&fragment, &BuildOptions::deferred()).unwrap_err();
    assert!(matches!(err, TreeError::MalformedShadowMarker { .. }));
}

#[test]
fn test_invalid_mode_value() {
    let fragment = MarkupFragment::from(
        MarkupElement::new("div").with_child(
            MarkupElement::new("template")
                .with_attr("shadow-root", "")
                .with_attr("mode", "ajar"),
        ),
    );
    let err = build_tree(&fragment, &BuildOptions::deferred()).unwrap_err();
    assert!(err.to_string().contains("\"ajar\""));
}

#[test]
fn test_marker_directly_in_shadow_content() {
    let nested_marker = MarkupElement::new("template")
        .with_attr("shadow-root", "")
        .with_attr("mode", "open");
    let fragment = MarkupFragment::from(
        MarkupElement::new("div").with_child(
            MarkupElement::new("template")
                .with_attr("shadow-root", "")
                .with_attr("mode", "open")
                .with_content(nested_marker),
        ),
    );
    let err = build_tree(&fragment, &BuildOptions::deferred()).unwrap_err();
    assert!(matches!(err, TreeError::MalformedShadowMarker { .. }));
}

#[test]
fn test_plain_template_is_a_leaf_element() {
    let fragment = MarkupFragment::from(
        MarkupElement::new("div").with_child(
            MarkupElement::new("template").with_content(MarkupElement::new("span")),
        ),
    );
    let tree = build_tree(&fragment, &BuildOptions::deferred()).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.shadow_root_count(), 0);
    let template = tree.children(tree.root())[0];
    assert!(tree.children(template).is_empty());
}

#[test]
fn test_empty_shadow_root() {
    let fragment = MarkupFragment::from(
        MarkupElement::new("div").with_attr("target", "").with_child(
            MarkupElement::new("template")
                .with_attr("shadow-root", "")
                .with_attr("mode", "open"),
        ),
    );
    let tree = build_tree(&fragment, &BuildOptions::default()).unwrap();
    let shadow_root = tree.shadow_root(tree.root()).unwrap();

    assert_eq!(tree.len(), 2);
    assert!(tree.children(shadow_root).is_empty());
}

// ============================================================================
// STRESS
// ============================================================================

#[test]
fn test_deep_nesting() {
    let mut element = MarkupElement::new("span").with_attr("target", "");
    for _ in 0..500 {
        element = MarkupElement::new("div").with_child(element);
    }
    let tree = build_tree(&MarkupFragment::from(element), &BuildOptions::default()).unwrap();

    assert_eq!(tree.len(), 501);
    let target = tree.target().unwrap();
    assert_eq!(tree.shadow_including_ancestors(target).count(), 501);
}

#[test]
fn test_deep_shadow_nesting() {
    let mut element = MarkupElement::new("span").with_attr("target", "");
    for _ in 0..50 {
        element = MarkupElement::new("div").with_child(
            MarkupElement::new("template")
                .with_attr("shadow-root", "")
                .with_attr("mode", "closed")
                .with_content(element),
        );
    }
    let tree = build_tree(&MarkupFragment::from(element), &BuildOptions::default()).unwrap();

    assert_eq!(tree.shadow_root_count(), 50);
    assert_eq!(tree.retarget(tree.target().unwrap(), tree.root()), tree.root());
}
