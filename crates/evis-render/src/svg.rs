//! SVG Serialization

use evis_graph::Point;

use crate::{Color, FillStyle, NodeShape, PointerKind, Scene, StrokeStyle};

/// Writes a [`Scene`] as a standalone SVG document
#[derive(Debug, Clone)]
pub struct SvgWriter {
    /// Put each element on its own line
    pub pretty_print: bool,
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self { pretty_print: true }
    }
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, scene: &Scene) -> String {
        let mut out = String::new();
        let theme = &scene.theme;

        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="sans-serif" font-size="12">"#,
            w = num(scene.width),
            h = num(scene.height)
        ));
        self.newline(&mut out);
        out.push_str(&format!(
            r#"<rect width="100%" height="100%"{}/>"#,
            fill_attrs(FillStyle::Color(theme.background))
        ));
        self.newline(&mut out);

        for shadow_tree in &scene.shadow_trees {
            let r = shadow_tree.rect;
            out.push_str(&format!(
                r#"<rect class="shadow-tree" data-shadow-root="{}" x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
                shadow_tree.shadow_root,
                num(r.x),
                num(r.y),
                num(r.width),
                num(r.height),
                fill_attrs(FillStyle::Color(theme.shadow_tree)),
                stroke_attrs(StrokeStyle::dashed(theme.outline, 1.0, 4.0, 3.0)),
            ));
            self.newline(&mut out);
        }

        for node in &scene.nodes {
            self.write_node(scene, node, &mut out);
        }

        for edge in &scene.edges {
            out.push_str(&format!(
                r#"<path class="{}" data-from-id="{}" data-to-id="{}" d="{}"{}{}/>"#,
                edge.class(),
                edge.from,
                edge.to,
                path_data(&edge.points),
                fill_attrs(FillStyle::None),
                stroke_attrs(StrokeStyle::solid(theme.outline, 1.5)),
            ));
            self.newline(&mut out);
        }

        for pointer in scene.pointers.iter().filter(|p| p.visible) {
            let (fill, outline) = match pointer.kind {
                PointerKind::Target => (theme.target, theme.target_outline),
                PointerKind::Event => (theme.current_target, theme.current_target_outline),
            };
            let points: Vec<String> = pointer
                .polygon(scene.pointer_size)
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect();

            out.push_str(&format!(r#"<g class="{}">"#, pointer.class()));
            out.push_str(&format!(
                r#"<polygon points="{}"{}{}/>"#,
                points.join(" "),
                fill_attrs(FillStyle::Color(fill)),
                stroke_attrs(StrokeStyle::solid(outline, 1.0)),
            ));
            out.push_str(&format!(
                r#"<text x="{}" y="{}" dominant-baseline="central"{}>{}</text>"#,
                num(pointer.anchor.x - scene.pointer_size.width + 2.0),
                num(pointer.anchor.y),
                fill_attrs(FillStyle::Color(theme.text)),
                pointer.kind.as_str()
            ));
            out.push_str("</g>");
            self.newline(&mut out);
        }

        out.push_str("</svg>");
        self.newline(&mut out);
        out
    }

    fn write_node(&self, scene: &Scene, node: &NodeShape, out: &mut String) {
        let theme = &scene.theme;
        let r = node.rect;
        let (fill, outline, width) = if node.in_composed_path {
            (theme.composed_path, theme.composed_path_outline, 1.5)
        } else {
            (theme.node, theme.outline, 1.0)
        };

        out.push_str(&format!(
            r#"<g class="{}" data-graph-id="{}">"#,
            node.classes(),
            node.id
        ));
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
            num(r.x),
            num(r.y),
            num(r.width),
            num(r.height),
            fill_attrs(FillStyle::Color(fill)),
            stroke_attrs(StrokeStyle::solid(outline, width)),
        ));

        let center = node.center();
        out.push_str(&format!(
            r#"<text x="{}" y="{}" dominant-baseline="central" text-anchor="middle"{}>"#,
            num(center.x),
            num(center.y),
            fill_attrs(FillStyle::Color(theme.text))
        ));
        match node.text.as_slice() {
            [line] => escape_text(line, out),
            lines => {
                // First line shifted up half a line so the block stays centered
                for (index, line) in lines.iter().enumerate() {
                    let dy = if index == 0 { "-0.5em" } else { "1.1em" };
                    out.push_str(&format!(r#"<tspan x="{}" dy="{}">"#, num(center.x), dy));
                    escape_text(line, out);
                    out.push_str("</tspan>");
                }
            }
        }
        out.push_str("</text>");

        if let Some(label) = &node.label {
            let badge = node.label_rect(scene.label_size);
            out.push_str(&format!(
                r#"<g class="node-label"><rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
                num(badge.x),
                num(badge.y),
                num(badge.width),
                num(badge.height),
                fill_attrs(FillStyle::Color(theme.label)),
                stroke_attrs(StrokeStyle::solid(theme.outline, 1.0)),
            ));
            let center = badge.center();
            out.push_str(&format!(
                r#"<text x="{}" y="{}" dominant-baseline="central" text-anchor="middle"{}>"#,
                num(center.x),
                num(center.y),
                fill_attrs(FillStyle::Color(theme.text))
            ));
            escape_text(label, out);
            out.push_str("</text></g>");
        }

        out.push_str("</g>");
        self.newline(out);
    }

    fn newline(&self, out: &mut String) {
        if self.pretty_print {
            out.push('\n');
        }
    }
}

/// Write a scene with the default writer
pub fn to_svg(scene: &Scene) -> String {
    SvgWriter::new().write(scene)
}

/// Coordinates with at most two decimals and no trailing zeros
fn num(value: f32) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn path_data(points: &[Point]) -> String {
    let mut data = String::new();
    for (index, point) in points.iter().enumerate() {
        if index > 0 {
            data.push(' ');
        }
        data.push(if index == 0 { 'M' } else { 'L' });
        data.push_str(&format!("{} {}", num(point.x), num(point.y)));
    }
    data
}

fn color_attr(name: &str, color: Color) -> String {
    let mut attr = format!(r#" {name}="{}""#, color.to_hex());
    if color.a != 255 {
        attr.push_str(&format!(r#" {name}-opacity="{}""#, num(color.opacity())));
    }
    attr
}

fn fill_attrs(fill: FillStyle) -> String {
    match fill.color() {
        Some(color) => color_attr("fill", color),
        None => r#" fill="none""#.to_string(),
    }
}

fn stroke_attrs(stroke: StrokeStyle) -> String {
    let mut attrs = color_attr("stroke", stroke.color);
    attrs.push_str(&format!(r#" stroke-width="{}""#, num(stroke.width)));
    if let Some([dash, gap]) = stroke.dash {
        attrs.push_str(&format!(r#" stroke-dasharray="{} {}""#, num(dash), num(gap)));
    }
    attrs
}

/// Escape text content
fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num() {
        assert_eq!(num(95.0), "95");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_path_data() {
        let points = [Point::new(0.0, 10.0), Point::new(5.5, 20.0)];
        assert_eq!(path_data(&points), "M0 10 L5.5 20");
    }

    #[test]
    fn test_escape_text() {
        let mut out = String::new();
        escape_text("<div>", &mut out);
        assert_eq!(out, "&lt;div&gt;");
    }

    #[test]
    fn test_empty_scene() {
        let svg = SvgWriter { pretty_print: false }.write(&Scene::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }
}
