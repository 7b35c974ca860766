//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts the element structure to an owned
//! [`MarkupFragment`]. Markup is parsed as the content of a `<template>`, so
//! table parts such as `<tr>` are valid roots. Text and comments are dropped.
//! Template content is kept apart from regular children since html5ever stores
//! it in a separate document fragment.

use evis_dom::{MarkupElement, MarkupFragment};
use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, ns, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse markup into its top-level elements.
    ///
    /// The fragment parser puts the parsed nodes under a synthetic `<html>`
    /// root, whose element children are the top-level elements.
    pub fn parse(&self, markup: &str) -> Result<MarkupFragment, ParseError> {
        let context = QualName::new(None, ns!(html), local_name!("template"));
        let dom = parse_fragment(RcDom::default(), Default::default(), context, Vec::new(), false)
            .from_utf8()
            .read_from(&mut markup.as_bytes())?;

        let elements: Vec<MarkupElement> = element_children(&dom.document)
            .iter()
            .flat_map(|root| element_children(root))
            .filter_map(|child| self.convert_element(&child))
            .collect();

        tracing::debug!("Parsed {} top-level elements", elements.len());
        Ok(MarkupFragment::new(elements))
    }

    /// Convert an RcDom element to our markup format
    fn convert_element(&self, handle: &Handle) -> Option<MarkupElement> {
        let RcNodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } = &handle.data
        else {
            return None;
        };

        let mut element = MarkupElement::new(name.local.to_string());
        for attr in attrs.borrow().iter() {
            element.set_attr(attr.name.local.to_string(), attr.value.to_string());
        }

        element.children = handle
            .children
            .borrow()
            .iter()
            .filter_map(|child| self.convert_element(child))
            .collect();

        if let Some(contents) = template_contents.borrow().as_ref() {
            element.content = contents
                .children
                .borrow()
                .iter()
                .filter_map(|child| self.convert_element(child))
                .collect();
        }

        Some(element)
    }
}

fn element_children(handle: &Handle) -> Vec<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, RcNodeData::Element { .. }))
        .cloned()
        .collect()
}
