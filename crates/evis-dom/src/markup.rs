//! Pre-parsed markup
//!
//! Owned element tree produced by a markup parser and consumed by the
//! [`TreeBuilder`](crate::TreeBuilder). Text, comments and doctypes are not
//! represented; only elements matter to the visualizer.

/// Attribute (name, value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A parsed element with its children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupElement {
    /// Lowercase tag name
    pub name: String,
    pub attrs: Vec<Attribute>,
    /// Element children, in document order
    pub children: Vec<MarkupElement>,
    /// Inert content of a `<template>` element
    pub content: Vec<MarkupElement>,
}

impl MarkupElement {
    /// Create an element without attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: MarkupElement) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style template content append
    pub fn with_content(mut self, child: MarkupElement) -> Self {
        self.content.push(child);
        self
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if an attribute is present (valueless attributes included)
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value;
            return;
        }
        self.attrs.push(Attribute { name, value });
    }

    /// Whether this is a `<template shadow-root>` marker
    pub fn is_shadow_root_marker(&self) -> bool {
        self.name == "template" && self.has_attr(crate::SHADOW_ROOT_MARKER)
    }
}

/// Top-level content of a markup string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupFragment {
    pub elements: Vec<MarkupElement>,
}

impl MarkupFragment {
    pub fn new(elements: Vec<MarkupElement>) -> Self {
        Self { elements }
    }

    /// The single root element, if the fragment has exactly one
    pub fn single_root(&self) -> Option<&MarkupElement> {
        match self.elements.as_slice() {
            [root] => Some(root),
            _ => None,
        }
    }
}

impl From<MarkupElement> for MarkupFragment {
    fn from(root: MarkupElement) -> Self {
        Self { elements: vec![root] }
    }
}
