//! Built-in example trees

use evis_dom::{BuildOptions, DomTree};
use evis_html::ParseError;

/// Example tree with its dispatch target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub markup: &'static str,
    /// `id` attribute of the target element
    pub target: &'static str,
}

impl Preset {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::with_target_label(self.target)
    }

    pub fn build(&self) -> Result<DomTree, ParseError> {
        evis_html::build_tree_with(self.markup, &self.build_options())
    }
}

const SIMPLE_TREE: &str = r#"
<div id="a">
  <div id="b"></div>
</div>
"#;

const SHADOW_TREE: &str = r#"
<div id="a">
  <template shadow-root mode="open">
    <div id="b"></div>
  </template>
</div>
"#;

const NESTED_SHADOW_TREE: &str = r#"
<div id="a">
  <template shadow-root mode="open">
    <div id="b">
      <template shadow-root mode="open">
        <div id="c"></div>
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
  <div id="c"></div>
</div>
"#;

pub const PRESETS: &[Preset] = &[
    Preset {
        id: "simple-tree",
        label: "A simple tree",
        markup: SIMPLE_TREE,
        target: "b",
    },
    Preset {
        id: "shadow-tree",
        label: "A single shadow tree",
        markup: SHADOW_TREE,
        target: "b",
    },
    Preset {
        id: "nested-shadow-tree",
        label: "Shadow trees nested into one another",
        markup: NESTED_SHADOW_TREE,
        target: "c",
    },
    Preset {
        id: "slotted-content",
        label: "A single shadow tree with slotted content",
        markup: SLOTTED_CONTENT,
        target: "c",
    },
];

/// Find a preset by id
pub fn preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}
