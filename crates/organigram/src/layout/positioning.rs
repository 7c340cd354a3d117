//! Width and coordinate passes over the forest.
//!
//! Widths are resolved bottom-up, then coordinates top-down. Both passes
//! lean on the pre-order storage of [`Forest`]: no recursion, no fixpoint.

use log::trace;

use organigram_core::geometry::Point;

use super::tree::{Forest, TreeNode};
use crate::config::LayoutConfig;

/// Assigns every node its subtree width.
///
/// A leaf is as wide as a node. An inner node is as wide as its children laid
/// side by side with `horizontal_spacing` between them, and never narrower
/// than a node.
pub(super) fn calculate_subtree_widths(forest: &mut Forest<'_>, config: &LayoutConfig) {
    let node_width = config.node_width();
    let spacing = config.horizontal_spacing();

    for idx in (0..forest.nodes.len()).rev() {
        let children_span = row_span(
            forest.nodes[idx]
                .children
                .iter()
                .map(|&child| forest.nodes[child].subtree_width),
            spacing,
        );

        forest.nodes[idx].subtree_width =
            children_span.map_or(node_width, |span| span.max(node_width));
    }
}

/// Assigns every node its anchor (horizontal center, top edge).
///
/// Root trees are centered around `x = 0` with twice the horizontal spacing
/// between them; children are centered under their parent. The y coordinate
/// only depends on the depth.
pub(super) fn assign_positions(forest: &mut Forest<'_>, config: &LayoutConfig) {
    let spacing = config.horizontal_spacing();
    let level_height = config.level_height();

    place_row(
        &mut forest.nodes,
        &forest.roots,
        0.0,
        2.0 * spacing,
        level_height,
    );

    for idx in 0..forest.nodes.len() {
        let children = std::mem::take(&mut forest.nodes[idx].children);
        let center_x = forest.nodes[idx].anchor.x();
        place_row(&mut forest.nodes, &children, center_x, spacing, level_height);
        forest.nodes[idx].children = children;
    }
}

/// Lays `row` out left to right, centered on `center_x`.
fn place_row(
    nodes: &mut [TreeNode<'_>],
    row: &[usize],
    center_x: f32,
    spacing: f32,
    level_height: f32,
) {
    let Some(span) = row_span(row.iter().map(|&idx| nodes[idx].subtree_width), spacing) else {
        return;
    };

    let mut left = center_x - span / 2.0;
    for &idx in row {
        let node = &mut nodes[idx];
        node.anchor = Point::new(
            left + node.subtree_width / 2.0,
            node.depth as f32 * level_height,
        );
        trace!(
            node_id = node.key.id().to_string(),
            x = node.anchor.x(),
            y = node.anchor.y();
            "Node placed"
        );
        left += node.subtree_width + spacing;
    }
}

/// Total width of `widths` laid side by side with `spacing` between them, or
/// `None` for an empty row.
fn row_span(widths: impl Iterator<Item = f32>, spacing: f32) -> Option<f32> {
    let (count, total) = widths.fold((0usize, 0.0f32), |(count, total), width| {
        (count + 1, total + width)
    });

    (count > 0).then(|| total + (count - 1) as f32 * spacing)
}
