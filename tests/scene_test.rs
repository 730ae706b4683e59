//! Tests for drawing layouts into SVG scenes

use std::path::Path;

use rstest::rstest;

use wbs_mindmap::application::scene::{render_scene, SceneStyle};
use wbs_mindmap::domain::{Layout, LayoutKind, LayoutParams, OutlineNode};

fn parse(json: &str) -> OutlineNode {
    OutlineNode::parse(json, Path::new("inline.json")).unwrap()
}

fn sample() -> OutlineNode {
    let content = std::fs::read_to_string("tests/resources/outline.json").unwrap();
    OutlineNode::parse(&content, Path::new("tests/resources/outline.json")).unwrap()
}

#[rstest]
#[case(LayoutKind::Radial)]
#[case(LayoutKind::Tree)]
fn given_example_when_rendering_then_four_boxes_and_three_edges(#[case] kind: LayoutKind) {
    let outline = parse(
        r#"{"label": "Root", "children": [{"label": "A", "children": []}, {"label": "B", "children": [{"label": "B1", "children": []}]}]}"#,
    );
    let layout = Layout::compute(&outline, kind, &LayoutParams::default());
    let scene = render_scene(&layout, &SceneStyle::default());

    assert_eq!(scene.node_count, 4);
    assert_eq!(scene.edge_count, 3);
    assert_eq!(scene.svg.matches("<rect class=\"node\"").count(), 4);
    assert_eq!(scene.svg.matches("<line class=\"edge\"").count(), 3);
    for label in ["Root", "A", "B", "B1"] {
        assert!(scene.svg.contains(&format!(">{label}</tspan>")), "missing {label}");
    }
}

#[test]
fn given_single_node_when_rendering_then_box_without_edges() {
    let outline = OutlineNode::new("Alone");
    let layout = Layout::compute(&outline, LayoutKind::Radial, &LayoutParams::default());
    let scene = render_scene(&layout, &SceneStyle::default());

    assert_eq!(scene.node_count, 1);
    assert_eq!(scene.edge_count, 0);
    assert!(!scene.svg.contains("class=\"edge\""));
}

#[test]
fn given_edges_and_nodes_when_rendering_then_edges_drawn_first() {
    let layout = Layout::compute(&sample(), LayoutKind::Radial, &LayoutParams::default());
    let svg = render_scene(&layout, &SceneStyle::default()).svg;

    let last_edge = svg.rfind("class=\"edge\"").unwrap();
    let first_node = svg.find("class=\"node\"").unwrap();
    assert!(last_edge < first_node);
}

#[test]
fn given_markup_in_label_when_rendering_then_escaped() {
    let outline = OutlineNode::new("R&D <core>");
    let layout = Layout::compute(&outline, LayoutKind::Radial, &LayoutParams::default());
    let svg = render_scene(&layout, &SceneStyle::default()).svg;

    assert!(svg.contains("R&amp;D &lt;core&gt;"));
    assert!(!svg.contains("<core>"));
}

#[test]
fn given_larger_outline_when_rendering_then_canvas_grows_with_content() {
    let style = SceneStyle::default();
    let small = render_scene(
        &Layout::compute(&OutlineNode::new("Root"), LayoutKind::Radial, &LayoutParams::default()),
        &style,
    );
    let large = render_scene(
        &Layout::compute(&sample(), LayoutKind::Radial, &LayoutParams::default()),
        &style,
    );

    assert!(large.width > small.width);
    assert!(large.height > small.height);
}

#[test]
fn given_layout_when_rendering_then_every_box_inside_canvas() {
    let layout = Layout::compute(&sample(), LayoutKind::Radial, &LayoutParams::default());
    let style = SceneStyle::default();
    let scene = render_scene(&layout, &style);
    let bounds = layout.bounds();

    assert!(scene.width >= bounds.width() + 2.0 * style.margin);
    assert!(scene.height >= bounds.height() + 2.0 * style.margin);
}

#[test]
fn given_same_layout_when_rendering_twice_then_identical_svg() {
    let params = LayoutParams::default();
    let style = SceneStyle::default();
    let a = render_scene(&Layout::compute(&sample(), LayoutKind::Radial, &params), &style);
    let b = render_scene(&Layout::compute(&sample(), LayoutKind::Radial, &params), &style);
    assert_eq!(a, b);
}

#[test]
fn given_style_when_rendering_then_uses_connector_and_background_colors() {
    let style = SceneStyle {
        connector_color: "#ff0000".into(),
        background: "#fafafa".into(),
        ..SceneStyle::default()
    };
    let outline = OutlineNode::new("Root").with_children(vec![OutlineNode::new("A")]);
    let layout = Layout::compute(&outline, LayoutKind::Tree, &LayoutParams::default());
    let svg = render_scene(&layout, &style).svg;

    assert!(svg.contains("stroke=\"#ff0000\""));
    assert!(svg.contains("fill=\"#fafafa\""));
}

#[rstest]
#[case(LayoutKind::Radial)]
#[case(LayoutKind::Tree)]
fn given_deeply_nested_outline_when_rendering_then_every_level_drawn(#[case] kind: LayoutKind) {
    let depth = 200;
    let json = (0..depth).rev().fold(
        format!(r#"{{"label": "level {depth}"}}"#),
        |child, i| format!(r#"{{"label": "level {i}", "children": [{child}]}}"#),
    );
    let outline = parse(&json);
    assert_eq!(outline.depth(), depth + 1);

    let layout = Layout::compute(&outline, kind, &LayoutParams::default());
    let scene = render_scene(&layout, &SceneStyle::default());

    assert_eq!(scene.node_count, depth + 1);
    assert_eq!(scene.edge_count, depth);
    assert!(scene.svg.contains(">level 200</tspan>"));
}
