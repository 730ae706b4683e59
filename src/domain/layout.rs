//! Arena-backed diagram layout.
//!
//! The outline is flattened into a generational arena where every node keeps
//! its parent index. A node's parent index is its single incoming edge, so
//! edge count is always node count minus one.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;

use generational_arena::{Arena, Index};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::outline::OutlineNode;
use crate::domain::text::{box_size, wrap_label};

/// Layout policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Mind map: root in the center, branches fanned out by angle.
    #[default]
    Radial,
    /// Left-to-right tree: x by depth, y by leaf order.
    Tree,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Radial => write!(f, "radial"),
            LayoutKind::Tree => write!(f, "tree"),
        }
    }
}

/// Geometry knobs; distances other than `font_size` are in layout units.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Pixels per layout unit
    pub unit: f32,
    /// Radial: distance between depth rings
    pub radius_step: f32,
    /// Radial: angular spread (radians) available to children at depth 0.5,
    /// capped by the parent's wedge
    pub spread: f32,
    /// Tree: horizontal distance between depth columns
    pub level_gap: f32,
    /// Tree: vertical gap between neighbouring leaves
    pub sibling_gap: f32,
    /// Maximum characters per label line
    pub wrap_width: usize,
    /// Font size of depth-2 nodes; other depths scale from it
    pub font_size: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            unit: 160.0,
            radius_step: 1.6,
            spread: 1.6,
            level_gap: 1.8,
            sibling_gap: 0.1,
            wrap_width: 24,
            font_size: 11.0,
        }
    }
}

/// Font size for a node at `depth`, larger toward the root.
pub fn font_size_for_depth(base: f32, depth: usize) -> f32 {
    match depth {
        0 => base * 18.0 / 11.0,
        1 => base * 13.0 / 11.0,
        2 => base,
        _ => base * 10.0 / 11.0,
    }
}

/// A placed node. `(x, y)` is the box center in diagram space, y grows down.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub label: String,
    pub lines: Vec<String>,
    pub depth: usize,
    /// Radians, counter-clockwise from +x (radial layout only)
    pub angle: f32,
    /// Ring radius in layout units (radial layout only)
    pub radius: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in outline order
    pub children: Vec<Index>,
}

impl LayoutNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    /// Radius of the circle around the box center that encloses the box.
    pub fn half_diagonal(&self) -> f32 {
        self.width.hypot(self.height) / 2.0
    }
}

/// Parent-to-child connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub parent: Index,
    pub child: Index,
}

/// Axis-aligned extent of all node boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Laid-out diagram.
#[derive(Debug)]
pub struct Layout {
    arena: Arena<LayoutNode>,
    root: Option<Index>,
    kind: LayoutKind,
}

impl Layout {
    /// Lay out `outline` with the given policy.
    #[instrument(level = "debug", skip(outline, params), fields(root = %outline.label))]
    pub fn compute(outline: &OutlineNode, kind: LayoutKind, params: &LayoutParams) -> Self {
        let mut layout = Self::build(outline, kind, params);
        match kind {
            LayoutKind::Radial => layout.place_radial(params),
            LayoutKind::Tree => layout.place_tree(params),
        }
        debug!(
            "layout: kind={} nodes={} leaves={} depth={}",
            kind,
            layout.len(),
            layout.leaf_count(),
            layout.depth()
        );
        layout
    }

    /// Flatten the outline in pre-order, sizing every box.
    fn build(outline: &OutlineNode, kind: LayoutKind, params: &LayoutParams) -> Self {
        let mut layout = Self {
            arena: Arena::new(),
            root: None,
            kind,
        };
        let mut stack = vec![(outline, None, 0usize)];

        while let Some((node, parent_idx, depth)) = stack.pop() {
            let label = node.display_label();
            let lines = wrap_label(&label, params.wrap_width);
            let font_size = font_size_for_depth(params.font_size, depth);
            let (width, height) = box_size(&lines, font_size);

            let idx = layout.insert_node(
                LayoutNode {
                    label,
                    lines,
                    depth,
                    angle: 0.0,
                    radius: 0.0,
                    x: 0.0,
                    y: 0.0,
                    width,
                    height,
                    font_size,
                    parent: parent_idx,
                    children: Vec::new(),
                },
                parent_idx,
            );

            // Reverse so children are inserted in outline order
            for child in node.children.iter().rev() {
                stack.push((child, Some(idx), depth + 1));
            }
        }

        layout
    }

    fn insert_node(&mut self, node: LayoutNode, parent: Option<Index>) -> Index {
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Root at the origin, first-level branches evenly around the circle
    /// starting at 12 o'clock, deeper levels fanned around their parent's
    /// angle with a spread that narrows with depth.
    ///
    /// Every node owns an angular wedge centered on its angle; a fan is
    /// compressed when it would leave the parent's wedge, so nodes on the
    /// same ring never share an angle.
    fn place_radial(&mut self, params: &LayoutParams) {
        let Some(root) = self.root else { return };
        if let Some(node) = self.arena.get_mut(root) {
            node.angle = FRAC_PI_2;
        }

        let first_level = self.children_of(root);
        let branch_count = first_level.len() as f32;
        let mut stack: Vec<(Index, f32, f32)> = first_level
            .iter()
            .enumerate()
            .map(|(i, &idx)| {
                let angle = FRAC_PI_2 - TAU * i as f32 / branch_count;
                (idx, angle, TAU / branch_count)
            })
            .collect();

        while let Some((idx, angle, wedge)) = stack.pop() {
            let Some(node) = self.arena.get_mut(idx) else {
                continue;
            };
            node.angle = angle;

            let depth = node.depth as f32;
            let children = node.children.clone();
            let count = children.len();
            if count == 1 {
                stack.push((children[0], angle, wedge));
                continue;
            }
            let gaps = count.saturating_sub(1) as f32;
            let span = (params.spread / (depth + 0.5)).min(wedge * gaps / count as f32);
            let step = span / gaps;
            for (i, child) in children.into_iter().enumerate() {
                stack.push((child, angle - span / 2.0 + step * i as f32, step));
            }
        }

        self.place_rings(params);
    }

    /// Radius of every depth ring, at least `depth * radius_step`, pushed
    /// outward until each ring clears the one inside it and boxes on the
    /// same ring clear each other by `sibling_gap`.
    ///
    /// Clearance is measured on the circles circumscribing each box, so it
    /// holds for any angle.
    fn place_rings(&mut self, params: &LayoutParams) {
        let gap = params.sibling_gap * params.unit;
        let mut rings: Vec<Vec<(Index, f32, f32)>> = Vec::new();
        for (idx, node) in self.iter() {
            if rings.len() <= node.depth {
                rings.resize_with(node.depth + 1, Vec::new);
            }
            rings[node.depth].push((idx, node.angle, node.half_diagonal()));
        }

        let mut inner_edge = 0.0_f32;
        for (depth, ring) in rings.iter().enumerate() {
            let reach = ring.iter().map(|&(_, _, r)| r).fold(0.0_f32, f32::max);
            let mut radius = 0.0_f32;
            if depth > 0 {
                radius = (depth as f32 * params.radius_step * params.unit)
                    .max(inner_edge + reach + gap);
                for (i, &(_, a, a_reach)) in ring.iter().enumerate() {
                    for &(_, b, b_reach) in &ring[i + 1..] {
                        let chord = 2.0 * ((a - b) / 2.0).sin().abs();
                        if chord > f32::EPSILON {
                            radius = radius.max((a_reach + b_reach + gap) / chord);
                        }
                    }
                }
            }

            for &(idx, angle, _) in ring {
                if let Some(node) = self.arena.get_mut(idx) {
                    node.radius = radius / params.unit;
                    node.x = radius * angle.cos();
                    node.y = -radius * angle.sin();
                }
            }
            inner_edge = radius + reach;
        }
    }

    /// Leaves stacked top to bottom in outline order, each parent centered
    /// on the span of its children.
    fn place_tree(&mut self, params: &LayoutParams) {
        let order: Vec<Index> = self.iter().map(|(idx, _)| idx).collect();
        let gap = params.sibling_gap * params.unit;
        let mut cursor = 0.0_f32;

        for &idx in &order {
            if let Some(node) = self.arena.get_mut(idx) {
                node.x = node.depth as f32 * params.level_gap * params.unit;
                if node.children.is_empty() {
                    node.y = cursor + node.height / 2.0;
                    cursor += node.height + gap;
                }
            }
        }

        let postorder: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        for idx in postorder {
            let span = self.get_node(idx).and_then(|node| {
                let first = self.get_node(*node.children.first()?)?;
                let last = self.get_node(*node.children.last()?)?;
                Some((first.y + last.y) / 2.0)
            });
            if let (Some(y), Some(node)) = (span, self.arena.get_mut(idx)) {
                node.y = y;
            }
        }
    }

    fn children_of(&self, idx: Index) -> Vec<Index> {
        self.get_node(idx)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    pub fn get_node(&self, idx: Index) -> Option<&LayoutNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal, children left to right.
    pub fn iter(&self) -> LayoutIterator<'_> {
        LayoutIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// One edge per non-root node, in pre-order of the child.
    pub fn edges(&self) -> Vec<Edge> {
        self.iter()
            .filter_map(|(child, node)| node.parent.map(|parent| Edge { parent, child }))
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.iter().map(|(_, n)| n.depth + 1).max().unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|(_, n)| n.is_leaf()).count()
    }

    /// Extent of all boxes; a zero-sized box at the origin for an empty layout.
    pub fn bounds(&self) -> Bounds {
        let mut nodes = self.iter().map(|(_, n)| n);
        let Some(first) = nodes.next() else {
            return Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            };
        };
        let init = Bounds {
            min_x: first.left(),
            min_y: first.top(),
            max_x: first.left() + first.width,
            max_y: first.top() + first.height,
        };
        nodes.fold(init, |b, n| Bounds {
            min_x: b.min_x.min(n.left()),
            min_y: b.min_y.min(n.top()),
            max_x: b.max_x.max(n.left() + n.width),
            max_y: b.max_y.max(n.top() + n.height),
        })
    }
}

pub struct LayoutIterator<'a> {
    layout: &'a Layout,
    stack: Vec<Index>,
}

impl<'a> LayoutIterator<'a> {
    fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            stack: layout.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for LayoutIterator<'a> {
    type Item = (Index, &'a LayoutNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.layout.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    layout: &'a Layout,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            stack: layout.root().map(|r| (r, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a LayoutNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.layout.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
