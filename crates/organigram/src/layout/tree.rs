//! Explicit forest mirroring the children index.

use organigram_core::geometry::Point;

use crate::structure::{NodeKey, OrgIndex};

/// One item of the forest, with its layout state.
#[derive(Debug, Clone)]
pub(super) struct TreeNode<'a> {
    pub(super) key: NodeKey<'a>,
    pub(super) depth: usize,
    pub(super) children: Vec<usize>,
    /// Horizontal footprint of the subtree rooted here.
    pub(super) subtree_width: f32,
    /// Horizontal center and top edge of the node.
    pub(super) anchor: Point,
}

impl<'a> TreeNode<'a> {
    fn new(key: NodeKey<'a>, depth: usize) -> Self {
        Self {
            key,
            depth,
            children: Vec::new(),
            subtree_width: 0.0,
            anchor: Point::default(),
        }
    }
}

/// Arena of tree nodes stored in pre-order.
///
/// A parent always sits at a lower index than its children, so a reverse scan
/// visits children before parents and a forward scan visits parents first.
#[derive(Debug, Default)]
pub(super) struct Forest<'a> {
    pub(super) nodes: Vec<TreeNode<'a>>,
    pub(super) roots: Vec<usize>,
}

impl<'a> Forest<'a> {
    /// Builds the forest depth-first from every root of `index`.
    pub(super) fn build(index: &OrgIndex<'a>) -> Self {
        let mut nodes: Vec<TreeNode<'a>> = Vec::with_capacity(index.len());
        let mut roots = Vec::with_capacity(index.roots().len());

        let mut stack: Vec<(NodeKey<'a>, Option<usize>, usize)> = index
            .roots()
            .iter()
            .rev()
            .map(|&key| (key, None, 0))
            .collect();

        while let Some((key, parent, depth)) = stack.pop() {
            let idx = nodes.len();
            nodes.push(TreeNode::new(key, depth));

            match parent {
                Some(parent) => nodes[parent].children.push(idx),
                None => roots.push(idx),
            }

            stack.extend(
                index
                    .children(key)
                    .iter()
                    .rev()
                    .map(|&child| (child, Some(idx), depth + 1)),
            );
        }

        Self { nodes, roots }
    }
}
