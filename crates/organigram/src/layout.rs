//! Org-chart layout engine.
//!
//! [`build_layout`] turns the flat entity and position collections into a
//! positioned [`OrgChart`]:
//!
//! 1. Index the collections and resolve every item's structural parent,
//!    rejecting duplicate ids and parent cycles.
//! 2. Mirror the parent/child structure into a pre-order forest.
//! 3. Resolve subtree widths bottom-up, then coordinates top-down.
//! 4. Walk the forest once more to emit nodes (with head-counts) and edges.
//!
//! Every node has the same size. The emitted position of a node is its anchor:
//! the horizontal center and the top edge.

mod positioning;
mod tree;

use std::fmt;

use log::{debug, info};
use serde::Serialize;

use organigram_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    model::{Entity, Person, Position},
};

use crate::{
    OrganigramError,
    config::LayoutConfig,
    structure::{HeadCounter, NodeKey, OrgIndex},
};
use tree::Forest;

/// Discriminates the two kinds of chart nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Entity,
    Position,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => write!(f, "entity"),
            Self::Position => write!(f, "position"),
        }
    }
}

/// The input record a chart node was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceItem<'a> {
    Entity(&'a Entity),
    Position(&'a Position),
}

/// A positioned node of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartNode<'a> {
    id: Id,
    kind: NodeKind,
    source_item: SourceItem<'a>,
    occupant_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    vacancies: Option<u32>,
    position: Point,
    size: Size,
}

impl<'a> ChartNode<'a> {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the entity or position this node represents.
    pub fn source_item(&self) -> SourceItem<'a> {
        self.source_item
    }

    /// Returns the head-count of the node.
    ///
    /// For a position this is its own occupant count. For an entity it
    /// aggregates the occupants of every position attached to the entity and
    /// the head-counts of all descendant entities.
    pub fn occupant_count(&self) -> usize {
        self.occupant_count
    }

    /// Returns the number of unfilled slots of a position node.
    ///
    /// `None` for entity nodes. Overstaffed positions report zero.
    pub fn vacancies(&self) -> Option<u32> {
        self.vacancies
    }

    /// Returns the anchor of the node: horizontal center, top edge.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the rectangle covered by the node.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_center(self.position, self.size)
    }
}

/// A parent to child link of the chart.
///
/// Only the ids are part of the serialized record. The kinds disambiguate
/// entities and positions sharing an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEdge {
    id: String,
    source: Id,
    target: Id,
    #[serde(skip)]
    source_kind: NodeKind,
    #[serde(skip)]
    target_kind: NodeKind,
}

impl ChartEdge {
    fn new(source: NodeKey<'_>, target: NodeKey<'_>) -> Self {
        let (source_id, target_id) = (source.id(), target.id());
        Self {
            id: format!("e-{source_id}-{target_id}"),
            source: source_id,
            target: target_id,
            source_kind: source.kind(),
            target_kind: target.kind(),
        }
    }

    /// Returns the edge id, `e-<source>-<target>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn source_kind(&self) -> NodeKind {
        self.source_kind
    }

    pub fn target_kind(&self) -> NodeKind {
        self.target_kind
    }
}

/// The result of a layout: nodes in pre-order and one edge per parent/child
/// link.
///
/// Nodes borrow their source records, so a chart cannot outlive the input
/// collections it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrgChart<'a> {
    nodes: Vec<ChartNode<'a>>,
    edges: Vec<ChartEdge>,
}

impl<'a> OrgChart<'a> {
    pub fn nodes(&self) -> &[ChartNode<'a>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ChartEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finds the first node with the given id, whatever its kind.
    pub fn node(&self, id: Id) -> Option<&ChartNode<'a>> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Finds a node by kind and id.
    pub fn find(&self, kind: NodeKind, id: Id) -> Option<&ChartNode<'a>> {
        self.nodes
            .iter()
            .find(|node| node.kind == kind && node.id == id)
    }

    /// Returns the smallest rectangle containing every node.
    ///
    /// An empty chart has default (zero) bounds.
    pub fn bounds(&self) -> Bounds {
        self.nodes
            .iter()
            .map(ChartNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    /// Consumes the chart into its node and edge lists.
    pub fn into_parts(self) -> (Vec<ChartNode<'a>>, Vec<ChartEdge>) {
        (self.nodes, self.edges)
    }
}

/// Lays out an organization as a top-down tree.
///
/// Entities hang under their `parent_id`. Positions hang under their
/// `parent_position_id` when set, else under their `entity_id`. Items whose
/// parent reference is unknown become roots. Root trees are placed side by
/// side around `x = 0`.
///
/// An empty `entities` collection yields an empty chart, even when
/// positions are supplied.
///
/// # Errors
///
/// - [`OrganigramError::Config`] if `config` describes degenerate geometry.
/// - [`OrganigramError::DuplicateId`] if two items of one kind share an id.
/// - [`OrganigramError::Cycle`] if parent references loop.
pub fn build_layout<'a>(
    entities: &'a [Entity],
    positions: &'a [Position],
    people: &[Person],
    config: &LayoutConfig,
) -> Result<OrgChart<'a>, OrganigramError> {
    config.validate()?;

    if entities.is_empty() {
        debug!(
            positions_count = positions.len();
            "No entities supplied, returning an empty chart"
        );
        return Ok(OrgChart::default());
    }

    let index = OrgIndex::build(entities, positions)?;
    let mut counter = HeadCounter::new(&index, people, config.occupant_counting());

    let mut forest = Forest::build(&index);
    positioning::calculate_subtree_widths(&mut forest, config);
    positioning::assign_positions(&mut forest, config);

    let chart = emit(&forest, &mut counter, config.node_size());

    info!(
        nodes_count = chart.nodes.len(),
        edges_count = chart.edges.len(),
        roots_count = forest.roots.len();
        "Org chart laid out"
    );

    Ok(chart)
}

/// Flattens the positioned forest into chart nodes and edges.
fn emit<'a>(forest: &Forest<'a>, counter: &mut HeadCounter<'_, 'a>, size: Size) -> OrgChart<'a> {
    let mut nodes = Vec::with_capacity(forest.nodes.len());
    let mut edges = Vec::with_capacity(forest.nodes.len() - forest.roots.len());

    for node in &forest.nodes {
        let occupant_count = counter.count(node.key);
        let vacancies = match node.key {
            NodeKey::Entity(_) => None,
            NodeKey::Position(position) => {
                let filled = u32::try_from(occupant_count).unwrap_or(u32::MAX);
                Some(position.target_headcount().saturating_sub(filled))
            }
        };

        nodes.push(ChartNode {
            id: node.key.id(),
            kind: node.key.kind(),
            source_item: node.key.source_item(),
            occupant_count,
            vacancies,
            position: node.anchor,
            size,
        });

        edges.extend(
            node.children
                .iter()
                .map(|&child| ChartEdge::new(node.key, forest.nodes[child].key)),
        );
    }

    OrgChart { nodes, edges }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::{HashMap, HashSet};

    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    /// Random acyclic organizations.
    ///
    /// Parents are always picked among earlier items, and a pick that lands on
    /// the item itself becomes a dangling `ghost` reference instead.
    fn organization_strategy() -> impl Strategy<Value = (Vec<Entity>, Vec<Position>)> {
        let entity_parents = prop::collection::vec(prop::option::of(any::<usize>()), 1..12);
        let position_specs = prop::collection::vec(
            (any::<usize>(), prop::option::of(any::<usize>()), 0usize..4),
            0..16,
        );

        (entity_parents, position_specs).prop_map(|(entity_parents, position_specs)| {
            let entities: Vec<Entity> = entity_parents
                .iter()
                .enumerate()
                .map(|(i, parent)| {
                    let entity = Entity::new(format!("E{i}").as_str(), "unit");
                    match parent.map(|p| p % (i + 1)) {
                        Some(p) if p < i => entity.with_parent(format!("E{p}").as_str()),
                        Some(_) => entity.with_parent("ghost"),
                        None => entity,
                    }
                })
                .collect();

            let entity_count = entities.len();
            let positions: Vec<Position> = position_specs
                .iter()
                .enumerate()
                .map(|(j, &(entity, parent, occupants))| {
                    let entity = entity % (entity_count + 1);
                    let entity_id = if entity < entity_count {
                        format!("E{entity}")
                    } else {
                        "ghost".to_string()
                    };
                    let occupant_ids: Vec<String> =
                        (0..occupants).map(|k| format!("p{j}-{k}")).collect();

                    let position = Position::new(format!("P{j}").as_str(), entity_id.as_str())
                        .with_occupants(occupant_ids.iter().map(String::as_str));
                    match parent.map(|p| p % (j + 1)) {
                        Some(p) if p < j => {
                            position.with_parent_position(format!("P{p}").as_str())
                        }
                        Some(_) => position.with_parent_position("ghost"),
                        None => position,
                    }
                })
                .collect();

            (entities, positions)
        })
    }

    fn layout<'a>(entities: &'a [Entity], positions: &'a [Position]) -> OrgChart<'a> {
        build_layout(entities, positions, &[], &LayoutConfig::default())
            .expect("generated organizations are acyclic")
    }

    fn check_deterministic(entities: &[Entity], positions: &[Position]) -> Result<(), TestCaseError> {
        prop_assert_eq!(layout(entities, positions), layout(entities, positions));
        Ok(())
    }

    /// Every entity and every position appears exactly once.
    fn check_complete(entities: &[Entity], positions: &[Position]) -> Result<(), TestCaseError> {
        let chart = layout(entities, positions);

        prop_assert_eq!(chart.nodes().len(), entities.len() + positions.len());

        let seen: HashSet<(NodeKind, Id)> = chart
            .nodes()
            .iter()
            .map(|node| (node.kind(), node.id()))
            .collect();
        prop_assert_eq!(seen.len(), chart.nodes().len());
        Ok(())
    }

    /// Edges match the resolved parent of each item, nothing more.
    fn check_edges(entities: &[Entity], positions: &[Position]) -> Result<(), TestCaseError> {
        let chart = layout(entities, positions);

        let entity_ids: HashSet<Id> = entities.iter().map(Entity::id).collect();
        let position_ids: HashSet<Id> = positions.iter().map(Position::id).collect();

        let mut expected: Vec<(Id, Id)> = entities
            .iter()
            .filter_map(|entity| {
                let parent = entity.parent_id().filter(|p| entity_ids.contains(p))?;
                Some((parent, entity.id()))
            })
            .chain(positions.iter().filter_map(|position| {
                let parent = match position.parent_position_id() {
                    Some(parent) => Some(parent).filter(|p| position_ids.contains(p)),
                    None => Some(position.entity_id()).filter(|e| entity_ids.contains(e)),
                }?;
                Some((parent, position.id()))
            }))
            .collect();

        let mut actual: Vec<(Id, Id)> = chart
            .edges()
            .iter()
            .map(|edge| (edge.source(), edge.target()))
            .collect();

        for edge in chart.edges() {
            let expected_id = format!("e-{}-{}", edge.source(), edge.target());
            prop_assert_eq!(edge.id(), expected_id.as_str());
        }

        let key = |(source, target): &(Id, Id)| (source.to_string(), target.to_string());
        expected.sort_by_key(key);
        actual.sort_by_key(key);
        prop_assert_eq!(actual, expected);
        Ok(())
    }

    /// Subtree widths cover the node and the children row, and children rows
    /// are centered under their parent without overlapping.
    fn check_widths_and_centering(
        entities: &[Entity],
        positions: &[Position],
    ) -> Result<(), TestCaseError> {
        let config = LayoutConfig::default();
        let index = OrgIndex::build(entities, positions).expect("acyclic");
        let mut forest = Forest::build(&index);
        positioning::calculate_subtree_widths(&mut forest, &config);
        positioning::assign_positions(&mut forest, &config);

        for node in &forest.nodes {
            prop_assert!(node.subtree_width >= config.node_width());
            prop_assert!(approx_eq!(
                f32,
                node.anchor.y(),
                node.depth as f32 * config.level_height(),
                epsilon = 0.01
            ));

            if node.children.is_empty() {
                continue;
            }

            let children: Vec<&tree::TreeNode<'_>> =
                node.children.iter().map(|&c| &forest.nodes[c]).collect();
            let span: f32 = children.iter().map(|c| c.subtree_width).sum::<f32>()
                + (children.len() - 1) as f32 * config.horizontal_spacing();
            prop_assert!(node.subtree_width >= span - 0.01);

            let left = children[0].anchor.x() - children[0].subtree_width / 2.0;
            let last = children[children.len() - 1];
            let right = last.anchor.x() + last.subtree_width / 2.0;
            prop_assert!(approx_eq!(
                f32,
                (left + right) / 2.0,
                node.anchor.x(),
                epsilon = 0.01
            ));

            for pair in children.windows(2) {
                let gap = (pair[1].anchor.x() - pair[1].subtree_width / 2.0)
                    - (pair[0].anchor.x() + pair[0].subtree_width / 2.0);
                prop_assert!(approx_eq!(
                    f32,
                    gap,
                    config.horizontal_spacing(),
                    epsilon = 0.01
                ));
            }
        }
        Ok(())
    }

    /// Entity head-counts equal own occupants plus child entity head-counts.
    fn check_head_counts(entities: &[Entity], positions: &[Position]) -> Result<(), TestCaseError> {
        let chart = layout(entities, positions);

        let counts: HashMap<Id, usize> = chart
            .nodes()
            .iter()
            .filter(|node| node.kind() == NodeKind::Entity)
            .map(|node| (node.id(), node.occupant_count()))
            .collect();

        for entity in entities {
            let own: usize = positions
                .iter()
                .filter(|position| position.entity_id() == entity.id())
                .map(|position| position.occupant_ids().len())
                .sum();
            let descendants: usize = entities
                .iter()
                .filter(|child| child.parent_id() == Some(entity.id()))
                .map(|child| counts[&child.id()])
                .sum();
            prop_assert_eq!(counts[&entity.id()], own + descendants);
        }

        for node in chart.nodes().iter().filter(|n| n.kind() == NodeKind::Position) {
            if let SourceItem::Position(position) = node.source_item() {
                prop_assert_eq!(node.occupant_count(), position.occupant_ids().len());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn layout_is_deterministic((entities, positions) in organization_strategy()) {
            check_deterministic(&entities, &positions)?;
        }

        #[test]
        fn layout_is_complete((entities, positions) in organization_strategy()) {
            check_complete(&entities, &positions)?;
        }

        #[test]
        fn edges_follow_parents((entities, positions) in organization_strategy()) {
            check_edges(&entities, &positions)?;
        }

        #[test]
        fn subtrees_are_wide_enough_and_centered((entities, positions) in organization_strategy()) {
            check_widths_and_centering(&entities, &positions)?;
        }

        #[test]
        fn head_counts_aggregate((entities, positions) in organization_strategy()) {
            check_head_counts(&entities, &positions)?;
        }
    }
}
