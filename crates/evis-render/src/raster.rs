//! Raster output
//!
//! Paints the scene shapes into a [`tiny_skia::Pixmap`]. Text is not drawn.

use evis_graph::{Point, Rect};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::{Color, PointerKind, RenderError, Scene, StrokeStyle};

/// Paint `scene` at `scale` pixels per unit
pub fn rasterize(scene: &Scene, scale: f32) -> Result<Pixmap, RenderError> {
    let width = (scene.width * scale).ceil().max(1.0) as u32;
    let height = (scene.height * scale).ceil().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;

    let theme = &scene.theme;
    let transform = Transform::from_scale(scale, scale);
    pixmap.fill(theme.background.to_tiny_skia());

    for shadow_tree in &scene.shadow_trees {
        fill_rect(&mut pixmap, shadow_tree.rect, theme.shadow_tree, transform);
        stroke_rect(
            &mut pixmap,
            shadow_tree.rect,
            StrokeStyle::dashed(theme.outline, 1.0, 4.0, 3.0),
            transform,
        );
    }

    for node in &scene.nodes {
        let (fill, outline) = if node.in_composed_path {
            (theme.composed_path, theme.composed_path_outline)
        } else {
            (theme.node, theme.outline)
        };
        fill_rect(&mut pixmap, node.rect, fill, transform);
        stroke_rect(&mut pixmap, node.rect, StrokeStyle::solid(outline, 1.0), transform);

        if node.label.is_some() {
            let badge = node.label_rect(scene.label_size);
            fill_rect(&mut pixmap, badge, theme.label, transform);
            stroke_rect(&mut pixmap, badge, StrokeStyle::solid(theme.outline, 1.0), transform);
        }
    }

    for edge in &scene.edges {
        if let Some(path) = polyline(&edge.points, false) {
            stroke_path(&mut pixmap, &path, StrokeStyle::solid(theme.outline, 1.5), transform);
        }
    }

    for pointer in scene.pointers.iter().filter(|p| p.visible) {
        let (fill, outline) = match pointer.kind {
            PointerKind::Target => (theme.target, theme.target_outline),
            PointerKind::Event => (theme.current_target, theme.current_target_outline),
        };
        if let Some(path) = polyline(&pointer.polygon(scene.pointer_size), true) {
            pixmap.fill_path(&path, &paint(fill), FillRule::Winding, transform, None);
            stroke_path(&mut pixmap, &path, StrokeStyle::solid(outline, 1.0), transform);
        }
    }

    tracing::debug!("Rasterized scene into {}x{} pixels", width, height);
    Ok(pixmap)
}

/// Rasterize and encode as PNG
pub fn encode_png(scene: &Scene, scale: f32) -> Result<Vec<u8>, RenderError> {
    rasterize(scene, scale)?
        .encode_png()
        .map_err(|e| RenderError::Png(e.to_string()))
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_tiny_skia());
    paint.anti_alias = true;
    paint
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

fn fill_rect(pixmap: &mut Pixmap, rect: Rect, color: Color, transform: Transform) {
    if let Some(rect) = skia_rect(rect) {
        pixmap.fill_rect(rect, &paint(color), transform, None);
    }
}

fn stroke_rect(pixmap: &mut Pixmap, rect: Rect, style: StrokeStyle, transform: Transform) {
    if let Some(rect) = skia_rect(rect) {
        let path = PathBuilder::from_rect(rect);
        stroke_path(pixmap, &path, style, transform);
    }
}

fn stroke_path(pixmap: &mut Pixmap, path: &tiny_skia::Path, style: StrokeStyle, transform: Transform) {
    let mut stroke = Stroke {
        width: style.width,
        ..Stroke::default()
    };
    if let Some([dash, gap]) = style.dash {
        stroke.dash = StrokeDash::new(vec![dash, gap], 0.0);
    }
    pixmap.stroke_path(path, &paint(style.color), &stroke, transform, None);
}

fn polyline(points: &[Point], close: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in rest {
        builder.line_to(point.x, point.y);
    }
    if close {
        builder.close();
    }
    builder.finish()
}
