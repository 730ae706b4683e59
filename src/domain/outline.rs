//! Outline tree: the parsed work-breakdown structure.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// One work item of the outline.
///
/// Parents own their children; order of `children` is the WBS numbering
/// order (1.1, 1.2, ...) and is preserved by every traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Human-readable title. Older outline files use `title`; a node
    /// carrying both keys is rejected as a duplicate field.
    #[serde(alias = "title")]
    pub label: String,
    /// Optional WBS number, e.g. "1.2"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl fmt::Display for OutlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) if !code.is_empty() => write!(f, "{} {}", code, self.label),
            _ => write!(f, "{}", self.label),
        }
    }
}

impl OutlineNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: None,
            children: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// Parse outline JSON.
    ///
    /// `path` is only used for error messages.
    /// Fails with [`DomainError::Parse`] on malformed JSON or when a node
    /// lacks `label` or has a non-array `children`. Nesting depth is not
    /// limited; the parser grows its stack on the heap as it descends.
    #[instrument(level = "debug", skip(content))]
    pub fn parse(content: &str, path: &Path) -> DomainResult<Self> {
        if content.trim().is_empty() {
            return Err(DomainError::EmptyOutline(path.to_path_buf()));
        }
        let parse_err = |e: serde_json::Error| DomainError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let mut json = serde_json::Deserializer::from_str(content);
        json.disable_recursion_limit();
        let outline = Self::deserialize(serde_stacker::Deserializer::new(&mut json))
            .map_err(parse_err)?;
        json.end().map_err(parse_err)?;
        Ok(outline)
    }

    /// Text shown inside the node box.
    pub fn display_label(&self) -> String {
        self.to_string()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of parent-child links in this subtree.
    pub fn edge_count(&self) -> usize {
        self.node_count() - 1
    }

    /// Number of levels, a lone root has depth 1.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(1)
    }

    /// Pre-order traversal yielding `(depth, node)`, children left to right.
    pub fn iter(&self) -> OutlineIter<'_> {
        OutlineIter { stack: vec![(0, self)] }
    }

    /// Convert into a printable box-drawing tree.
    pub fn to_tree(&self) -> Tree<String> {
        // (node, subtrees of the children finished so far)
        let mut stack: Vec<(&OutlineNode, Vec<Tree<String>>)> = vec![(self, Vec::new())];

        while let Some((node, leaves)) = stack.pop() {
            if let Some(child) = node.children.get(leaves.len()) {
                stack.push((node, leaves));
                stack.push((child, Vec::new()));
                continue;
            }
            let tree = Tree::new(node.display_label()).with_leaves(leaves);
            match stack.last_mut() {
                Some((_, siblings)) => siblings.push(tree),
                None => return tree,
            }
        }
        Tree::new(self.display_label())
    }
}

impl Drop for OutlineNode {
    // Flatten the subtree first so dropping a deep chain does not recurse.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

pub struct OutlineIter<'a> {
    stack: Vec<(usize, &'a OutlineNode)>,
}

impl<'a> Iterator for OutlineIter<'a> {
    type Item = (usize, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // reverse push keeps left-to-right order
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}
