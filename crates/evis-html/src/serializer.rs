//! Tree Serialization
//!
//! Serializes a [`DomTree`] back to markup. Shadow roots are written as a
//! `<template shadow-root mode="...">` first child of their host, so the output
//! rebuilds into a tree of the same shape.

use evis_dom::{DomTree, NodeId, NodeKind, SHADOW_ROOT_MARKER, TARGET_MARKER};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Markup serializer
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Whether to format output with indentation
    pub pretty_print: bool,
    /// Indentation string
    pub indent: String,
    /// Write the `target` marker on the tree's target only, in place of the
    /// markers of the source markup
    pub mark_target: bool,
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
            mark_target: false,
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            ..Self::default()
        }
    }

    /// Move the `target` marker onto the tree's current target
    pub fn with_target_marker(mut self) -> Self {
        self.mark_target = true;
        self
    }

    /// Serialize the whole tree from its root
    pub fn serialize(&self, tree: &DomTree) -> String {
        let mut output = String::new();
        if !tree.is_empty() {
            self.serialize_node(tree, tree.root(), &mut output, 0);
        }
        output
    }

    /// Serialize a node and its descendants
    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String, depth: usize) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        self.newline(output, depth);
        match &node.kind {
            NodeKind::Element(elem) => {
                output.push('<');
                output.push_str(&elem.name);
                let attrs = elem
                    .attrs
                    .iter()
                    .filter(|attr| !(self.mark_target && attr.name == TARGET_MARKER));
                for attr in attrs {
                    output.push(' ');
                    output.push_str(&attr.name);
                    if !attr.value.is_empty() {
                        output.push_str("=\"");
                        escape_attribute(&attr.value, output);
                        output.push('"');
                    }
                }
                if self.mark_target && tree.target() == Some(node_id) {
                    output.push(' ');
                    output.push_str(TARGET_MARKER);
                }

                if VOID_ELEMENTS.contains(&elem.name.as_str()) {
                    output.push('>');
                    return;
                }
                output.push('>');

                if let Some(shadow_root) = elem.shadow_root {
                    self.serialize_node(tree, shadow_root, output, depth + 1);
                }
                for child in &node.children {
                    self.serialize_node(tree, *child, output, depth + 1);
                }

                if elem.shadow_root.is_some() || !node.children.is_empty() {
                    self.newline(output, depth);
                }
                output.push_str("</");
                output.push_str(&elem.name);
                output.push('>');
            }
            NodeKind::ShadowRoot(shadow) => {
                output.push_str("<template ");
                output.push_str(SHADOW_ROOT_MARKER);
                output.push_str(" mode=\"");
                output.push_str(shadow.mode.as_str());
                output.push('"');
                if let Some(label) = &node.label {
                    output.push_str(" id=\"");
                    escape_attribute(label, output);
                    output.push('"');
                }
                output.push('>');

                for child in &node.children {
                    self.serialize_node(tree, *child, output, depth + 1);
                }

                if !node.children.is_empty() {
                    self.newline(output, depth);
                }
                output.push_str("</template>");
            }
        }
    }

    fn newline(&self, output: &mut String, depth: usize) {
        if self.pretty_print && !output.is_empty() {
            output.push('\n');
            for _ in 0..depth {
                output.push_str(&self.indent);
            }
        }
    }
}

/// Serialize a tree with the compact serializer
pub fn serialize_tree(tree: &DomTree) -> String {
    HtmlSerializer::new().serialize(tree)
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evis_dom::{BuildOptions, MarkupElement, build_tree};

    #[test]
    fn test_escape_attribute() {
        let mut output = String::new();
        escape_attribute("a <b> & \"c\"", &mut output);
        assert_eq!(output, "a &lt;b&gt; &amp; &quot;c&quot;");
    }

    #[test]
    fn test_serialize_shadow_root() {
        let root = MarkupElement::new("div").with_attr("id", "a").with_child(
            MarkupElement::new("template")
                .with_attr("shadow-root", "")
                .with_attr("mode", "closed")
                .with_content(MarkupElement::new("div").with_attr("id", "b").with_attr("target", "")),
        );
        let tree = build_tree(&root.into(), &BuildOptions::default()).unwrap();

        assert_eq!(
            serialize_tree(&tree),
            r#"<div id="a"><template shadow-root mode="closed"><div id="b" target></div></template></div>"#
        );
    }

    #[test]
    fn test_serialize_moves_target_marker() {
        let root = MarkupElement::new("div")
            .with_attr("id", "a")
            .with_attr("target", "")
            .with_child(MarkupElement::new("p"));
        let tree = build_tree(&root.into(), &BuildOptions::default()).unwrap();
        let p = tree.children(tree.root())[0];
        let tree = tree.with_target(p).unwrap();

        assert_eq!(serialize_tree(&tree), r#"<div id="a" target><p></p></div>"#);
        assert_eq!(
            HtmlSerializer::new().with_target_marker().serialize(&tree),
            r#"<div id="a"><p target></p></div>"#
        );
    }

    #[test]
    fn test_serialize_pretty() {
        let root = MarkupElement::new("div")
            .with_attr("target", "")
            .with_child(MarkupElement::new("input"));
        let tree = build_tree(&root.into(), &BuildOptions::default()).unwrap();

        assert_eq!(HtmlSerializer::pretty().serialize(&tree), "<div target>\n  <input>\n</div>");
    }
}
