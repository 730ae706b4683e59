//! Draw a [`Layout`] as an SVG scene.
//!
//! Connectors are emitted first so boxes paint over them. Every node yields
//! exactly one `<rect class="node">`, every edge one `<line class="edge">`.

use std::fmt::Write;

use tracing::{debug, instrument};

use crate::domain::layout::{Layout, LayoutNode};
use crate::domain::text::LINE_HEIGHT_RATIO;

/// Fill, stroke, text color and weight for a node at a given depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub text: &'static str,
    pub bold: bool,
}

/// Palette by depth: navy root, teal branches, blue sub-branches, slate below.
pub fn depth_style(depth: usize) -> DepthStyle {
    match depth {
        0 => DepthStyle {
            fill: "#0b3954",
            stroke: "#0b3954",
            text: "#ffffff",
            bold: true,
        },
        1 => DepthStyle {
            fill: "#087e8b",
            stroke: "#087e8b",
            text: "#ffffff",
            bold: true,
        },
        2 => DepthStyle {
            fill: "#e8f0fa",
            stroke: "#1f487e",
            text: "#1f487e",
            bold: true,
        },
        _ => DepthStyle {
            fill: "#ffffff",
            stroke: "#475569",
            text: "#475569",
            bold: false,
        },
    }
}

/// Scene-wide drawing options.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    pub font_family: String,
    pub connector_color: String,
    pub background: String,
    /// Blank border around the content, in pixels
    pub margin: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans, Helvetica, Arial, sans-serif".to_string(),
            connector_color: "#94a3b8".to_string(),
            background: "#ffffff".to_string(),
            margin: 40.0,
        }
    }
}

/// A drawn diagram, ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub svg: String,
    pub width: f32,
    pub height: f32,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Draw `layout` onto a canvas sized to its content plus margin.
#[instrument(level = "debug", skip_all, fields(nodes = layout.len()))]
pub fn render_scene(layout: &Layout, style: &SceneStyle) -> Scene {
    let bounds = layout.bounds();
    let margin = style.margin.max(0.0);
    let width = (bounds.width() + 2.0 * margin).ceil().max(1.0);
    let height = (bounds.height() + 2.0 * margin).ceil().max(1.0);
    // shift diagram space so the content starts at (margin, margin)
    let dx = margin - bounds.min_x;
    let dy = margin - bounds.min_y;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&style.background)
    );

    let edges = layout.edges();
    for edge in &edges {
        let (Some(parent), Some(child)) =
            (layout.get_node(edge.parent), layout.get_node(edge.child))
        else {
            continue;
        };
        let _ = write!(
            svg,
            "<line class=\"edge\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1.15\" stroke-linecap=\"round\"/>",
            parent.x + dx,
            parent.y + dy,
            child.x + dx,
            child.y + dy,
            escape_xml(&style.connector_color)
        );
    }

    let mut node_count = 0;
    for (_, node) in layout.iter() {
        svg.push_str(&node_svg(node, dx, dy, &style.font_family));
        node_count += 1;
    }

    svg.push_str("</svg>");
    debug!("scene: {width}x{height}px, {node_count} nodes, {} edges", edges.len());

    Scene {
        svg,
        width,
        height,
        node_count,
        edge_count: edges.len(),
    }
}

fn node_svg(node: &LayoutNode, dx: f32, dy: f32, font_family: &str) -> String {
    let palette = depth_style(node.depth);
    let x = node.left() + dx;
    let y = node.top() + dy;
    let radius = (node.height / 4.0).min(10.0);
    let mut out = String::new();

    let _ = write!(
        out,
        "<rect class=\"node\" data-depth=\"{}\" x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.2\"/>",
        node.depth, node.width, node.height, palette.fill, palette.stroke
    );

    let line_height = node.font_size * LINE_HEIGHT_RATIO;
    let total = node.lines.len() as f32 * line_height;
    // first baseline: vertically center the block, baseline ~0.8em below line top
    let first_baseline = node.y + dy - total / 2.0 + line_height / 2.0 + node.font_size * 0.35;
    let weight = if palette.bold { "bold" } else { "normal" };

    let _ = write!(
        out,
        "<text x=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.2}\" font-weight=\"{weight}\" fill=\"{}\">",
        node.x + dx,
        escape_xml(font_family),
        node.font_size,
        palette.text
    );
    for (i, line) in node.lines.iter().enumerate() {
        let _ = write!(
            out,
            "<tspan x=\"{:.2}\" y=\"{:.2}\">{}</tspan>",
            node.x + dx,
            first_baseline + i as f32 * line_height,
            escape_xml(line)
        );
    }
    out.push_str("</text>");
    out
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_markup_characters_when_escaping_then_replaces_entities() {
        assert_eq!(escape_xml("R&D <core> \"x\""), "R&amp;D &lt;core&gt; &quot;x&quot;");
    }

    #[test]
    fn given_depths_when_styling_then_deep_levels_share_palette() {
        assert_eq!(depth_style(3), depth_style(7));
        assert_ne!(depth_style(0), depth_style(1));
    }
}
