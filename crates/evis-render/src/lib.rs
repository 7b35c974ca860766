//! evis Render - Graph drawing
//!
//! Composes a laid-out graph into a retained [`Scene`] (shadow tree boxes,
//! nodes, edges and the `target` / `event` pointers), restyles it per dispatch
//! step, and writes it out as SVG or as a PNG raster.

mod raster;
mod renderer;
mod scene;
mod style;
mod svg;

pub use raster::{encode_png, rasterize};
pub use renderer::{GraphRenderer, RenderConfig};
pub use scene::{EdgeShape, NodeShape, PointerKind, PointerShape, Scene, ShadowTreeShape};
pub use style::{FillStyle, StrokeStyle, Theme};
pub use svg::{SvgWriter, to_svg};

use serde::{Deserialize, Serialize};

/// Color (RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, alpha is written separately
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    pub(crate) fn to_tiny_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Render error
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(String),
}
