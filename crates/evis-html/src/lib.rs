//! evis HTML - Markup front end
//!
//! Parses tree markup with html5ever and builds the logical tree, and
//! serializes a tree back to markup using the same shadow root convention.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, serialize_tree};

use evis_dom::{BuildOptions, DomTree, MarkupFragment, TreeError};

/// Parse markup into its top-level elements
pub fn parse_markup(markup: &str) -> Result<MarkupFragment, ParseError> {
    HtmlParser::new().parse(markup)
}

/// Parse markup and build a tree whose target carries the `target` attribute
pub fn build_tree(markup: &str) -> Result<DomTree, ParseError> {
    build_tree_with(markup, &BuildOptions::default())
}

/// Parse markup and build a tree with explicit options
pub fn build_tree_with(markup: &str, options: &BuildOptions) -> Result<DomTree, ParseError> {
    let fragment = parse_markup(markup)?;
    Ok(evis_dom::build_tree(&fragment, options)?)
}

/// Markup parsing error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read markup: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
