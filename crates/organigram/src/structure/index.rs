//! Children index over entities and positions.

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
};

use indexmap::{IndexMap, IndexSet, map::Entry};
use log::{debug, trace};
use petgraph::{algo::toposort, graph::DiGraph};

use organigram_core::{
    identifier::Id,
    model::{Entity, Position},
};

use crate::{
    OrganigramError,
    layout::{NodeKind, SourceItem},
};

/// One item of the organization, borrowed from the caller's collections.
///
/// Equality and hashing only look at the kind and the id. Entities and
/// positions live in separate id namespaces, so an entity and a position may
/// share the same id without being confused.
#[derive(Debug, Clone, Copy)]
pub(crate) enum NodeKey<'a> {
    Entity(&'a Entity),
    Position(&'a Position),
}

impl<'a> NodeKey<'a> {
    pub(crate) fn id(self) -> Id {
        match self {
            Self::Entity(entity) => entity.id(),
            Self::Position(position) => position.id(),
        }
    }

    pub(crate) fn kind(self) -> NodeKind {
        match self {
            Self::Entity(_) => NodeKind::Entity,
            Self::Position(_) => NodeKind::Position,
        }
    }

    pub(crate) fn source_item(self) -> SourceItem<'a> {
        match self {
            Self::Entity(entity) => SourceItem::Entity(entity),
            Self::Position(position) => SourceItem::Position(position),
        }
    }
}

impl PartialEq for NodeKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }
}

impl Eq for NodeKey<'_> {}

impl Hash for NodeKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.id().hash(state);
    }
}

/// Lookup tables and the parent/child structure of one organization.
///
/// Items are ordered entities first, then positions, each in input order.
/// That order is kept by [`OrgIndex::roots`] and every children list, which
/// makes the layout deterministic.
#[derive(Debug)]
pub(crate) struct OrgIndex<'a> {
    entities: IndexMap<Id, &'a Entity>,
    positions: IndexMap<Id, &'a Position>,
    parents: HashMap<NodeKey<'a>, NodeKey<'a>>,
    children: HashMap<NodeKey<'a>, Vec<NodeKey<'a>>>,
    roots: Vec<NodeKey<'a>>,
}

impl<'a> OrgIndex<'a> {
    /// Indexes the collections and resolves each item's structural parent.
    ///
    /// An entity hangs under its `parent_id`; a position hangs under its
    /// `parent_position_id` when set, else under its `entity_id`. A reference
    /// to an unknown item makes the item a root.
    ///
    /// # Errors
    ///
    /// Returns [`OrganigramError::DuplicateId`] when two entities (or two
    /// positions) share an id, and [`OrganigramError::Cycle`] when parent
    /// references loop back on themselves.
    pub(crate) fn build(
        entities: &'a [Entity],
        positions: &'a [Position],
    ) -> Result<Self, OrganigramError> {
        let entities = index_by_id(entities, NodeKind::Entity, Entity::id)?;
        let positions = index_by_id(positions, NodeKind::Position, Position::id)?;

        let resolved: Vec<(NodeKey<'a>, Option<NodeKey<'a>>)> = entities
            .values()
            .map(|&entity| {
                let parent = entity
                    .parent_id()
                    .and_then(|parent_id| entities.get(&parent_id))
                    .map(|&parent| NodeKey::Entity(parent));
                (NodeKey::Entity(entity), parent)
            })
            .chain(positions.values().map(|&position| {
                let parent = match position.parent_position_id() {
                    Some(parent_id) => positions
                        .get(&parent_id)
                        .map(|&parent| NodeKey::Position(parent)),
                    None => entities
                        .get(&position.entity_id())
                        .map(|&parent| NodeKey::Entity(parent)),
                };
                (NodeKey::Position(position), parent)
            }))
            .collect();

        let mut parents = HashMap::with_capacity(resolved.len());
        let mut children: HashMap<NodeKey<'a>, Vec<NodeKey<'a>>> = HashMap::new();
        let mut roots = Vec::new();

        for (key, parent) in resolved {
            match parent {
                Some(parent) => {
                    trace!(
                        child_id = key.id().to_string(),
                        parent_id = parent.id().to_string();
                        "Resolved structural parent"
                    );
                    parents.insert(key, parent);
                    children.entry(parent).or_default().push(key);
                }
                None => roots.push(key),
            }
        }

        let index = Self {
            entities,
            positions,
            parents,
            children,
            roots,
        };
        index.check_acyclic()?;

        debug!(
            entities_count = index.entities.len(),
            positions_count = index.positions.len(),
            roots_count = index.roots.len();
            "Organization indexed"
        );

        Ok(index)
    }

    /// Returns the total number of items (entities and positions).
    pub(crate) fn len(&self) -> usize {
        self.entities.len() + self.positions.len()
    }

    /// Returns the forest roots in layout order.
    pub(crate) fn roots(&self) -> &[NodeKey<'a>] {
        &self.roots
    }

    /// Returns the direct children of `key` in layout order.
    pub(crate) fn children(&self, key: NodeKey<'a>) -> &[NodeKey<'a>] {
        self.children
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the resolved structural parent of `key`, if any.
    pub(crate) fn parent(&self, key: NodeKey<'a>) -> Option<NodeKey<'a>> {
        self.parents.get(&key).copied()
    }

    pub(crate) fn entity(&self, id: Id) -> Option<&'a Entity> {
        self.entities.get(&id).copied()
    }

    /// Returns every position in input order.
    pub(crate) fn positions(&self) -> impl Iterator<Item = &'a Position> + '_ {
        self.positions.values().copied()
    }

    /// Rejects parent references that loop back on themselves.
    ///
    /// Every item has at most one parent, so any cycle is a simple loop of
    /// items of the same kind that no root can reach.
    fn check_acyclic(&self) -> Result<(), OrganigramError> {
        let mut graph = DiGraph::<NodeKey<'a>, ()>::with_capacity(self.len(), self.parents.len());
        let node_indices: HashMap<NodeKey<'a>, _> = self
            .entities
            .values()
            .map(|&entity| NodeKey::Entity(entity))
            .chain(self.positions.values().map(|&position| NodeKey::Position(position)))
            .map(|key| (key, graph.add_node(key)))
            .collect();

        for (child, parent) in &self.parents {
            graph.add_edge(node_indices[parent], node_indices[child], ());
        }

        match toposort(&graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => {
                let start = graph[cycle.node_id()];
                let ids = self.cycle_through(start);
                debug!(kind:? = start.kind(), cycle_len = ids.len(); "Parent cycle detected");
                Err(OrganigramError::Cycle {
                    kind: start.kind(),
                    ids,
                })
            }
        }
    }

    /// Follows parent links from `start` until an item repeats and returns
    /// the ids of the loop, in child-to-parent order.
    fn cycle_through(&self, start: NodeKey<'a>) -> Vec<Id> {
        let mut visited: IndexSet<NodeKey<'a>> = IndexSet::from([start]);
        let mut current = start;

        while let Some(parent) = self.parent(current) {
            if let Some(loop_start) = visited.get_index_of(&parent) {
                return visited.iter().skip(loop_start).map(|key| key.id()).collect();
            }
            visited.insert(parent);
            current = parent;
        }

        vec![start.id()]
    }
}

/// Indexes `items` by id, preserving input order.
fn index_by_id<'a, T>(
    items: &'a [T],
    kind: NodeKind,
    id_of: impl Fn(&T) -> Id,
) -> Result<IndexMap<Id, &'a T>, OrganigramError> {
    let mut index = IndexMap::with_capacity(items.len());
    for item in items {
        match index.entry(id_of(item)) {
            Entry::Occupied(entry) => {
                return Err(OrganigramError::DuplicateId {
                    kind,
                    id: *entry.key(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(item);
            }
        }
    }
    Ok(index)
}
