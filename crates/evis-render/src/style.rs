//! Paint styles and the color theme

use serde::{Deserialize, Serialize};

use crate::Color;

/// Fill style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FillStyle {
    None,
    Color(Color),
}

impl FillStyle {
    pub fn color(&self) -> Option<Color> {
        match self {
            FillStyle::None => None,
            FillStyle::Color(color) => Some(*color),
        }
    }
}

/// Stroke style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    /// Dash and gap lengths, solid when `None`
    pub dash: Option<[f32; 2]>,
}

impl StrokeStyle {
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub const fn dashed(color: Color, width: f32, dash: f32, gap: f32) -> Self {
        Self {
            color,
            width,
            dash: Some([dash, gap]),
        }
    }
}

/// Colors of every scene item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub node: Color,
    pub outline: Color,
    pub text: Color,
    pub label: Color,
    pub shadow_tree: Color,
    pub composed_path: Color,
    pub composed_path_outline: Color,
    pub target: Color,
    pub target_outline: Color,
    pub current_target: Color,
    pub current_target_outline: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            node: Color::WHITE,
            outline: Color::rgb(0x33, 0x33, 0x33),
            text: Color::BLACK,
            label: Color::rgb(0xa9, 0xd2, 0xf7),
            shadow_tree: Color::rgb(0xf2, 0xf2, 0xf2),
            composed_path: Color::rgb(0xff, 0xe0, 0x8a),
            composed_path_outline: Color::rgb(0xe0, 0xa8, 0x00),
            target: Color::rgb(0xff, 0xa8, 0xa8),
            target_outline: Color::rgb(0xd3, 0x2f, 0x2f),
            current_target: Color::rgb(0x9c, 0xd0, 0xff),
            current_target_outline: Color::rgb(0x1e, 0x6f, 0xd9),
        }
    }
}
