//! Occupant aggregation over the entity hierarchy.

use std::collections::{HashMap, HashSet};

use log::trace;

use organigram_core::{
    identifier::Id,
    model::{Person, Position},
};

use super::{NodeKey, OrgIndex};
use crate::config::OccupantCounting;

/// Computes head-counts for entities and positions.
///
/// An entity's head-count covers the positions attached to it (by
/// `entity_id`, whatever their structural parent) plus the head-counts of its
/// child entities. A position only counts its own occupants. Entity results
/// are memoized for the lifetime of the counter, which is one layout call.
pub(crate) struct HeadCounter<'i, 'a> {
    index: &'i OrgIndex<'a>,
    counting: OccupantCounting,
    known_people: HashSet<Id>,
    positions_by_entity: HashMap<Id, Vec<&'a Position>>,
    memo: HashMap<Id, usize>,
}

impl<'i, 'a> HeadCounter<'i, 'a> {
    pub(crate) fn new(
        index: &'i OrgIndex<'a>,
        people: &[Person],
        counting: OccupantCounting,
    ) -> Self {
        let mut positions_by_entity: HashMap<Id, Vec<&'a Position>> = HashMap::new();
        for position in index.positions() {
            positions_by_entity
                .entry(position.entity_id())
                .or_default()
                .push(position);
        }

        let known_people = match counting {
            OccupantCounting::Assigned => HashSet::new(),
            OccupantCounting::KnownPeople => people.iter().map(Person::id).collect(),
        };

        Self {
            index,
            counting,
            known_people,
            positions_by_entity,
            memo: HashMap::new(),
        }
    }

    /// Returns the number of occupants filling `position`.
    pub(crate) fn position_count(&self, position: &Position) -> usize {
        match self.counting {
            OccupantCounting::Assigned => position.occupant_ids().len(),
            OccupantCounting::KnownPeople => position
                .occupant_ids()
                .iter()
                .filter(|id| self.known_people.contains(*id))
                .count(),
        }
    }

    /// Returns the aggregated head-count of the entity `id`.
    ///
    /// Unknown ids yield 0. Descendants are resolved with an explicit
    /// post-order stack, so deep hierarchies do not grow the call stack.
    pub(crate) fn entity_count(&mut self, id: Id) -> usize {
        // (entity, children already pushed)
        let mut stack = vec![(id, false)];

        while let Some((current, expanded)) = stack.pop() {
            if self.memo.contains_key(&current) {
                continue;
            }

            if expanded {
                let own = self.own_count(current);
                let descendants: usize = self
                    .child_entities(current)
                    .map(|child| self.memo.get(&child).copied().unwrap_or_default())
                    .sum();

                let count = own + descendants;
                trace!(
                    entity_id = current.to_string(),
                    own = own,
                    descendants = descendants;
                    "Head-count aggregated"
                );
                self.memo.insert(current, count);
                continue;
            }

            stack.push((current, true));
            let pending: Vec<Id> = self
                .child_entities(current)
                .filter(|child| !self.memo.contains_key(child))
                .collect();
            stack.extend(pending.into_iter().map(|child| (child, false)));
        }

        self.memo.get(&id).copied().unwrap_or_default()
    }

    /// Occupants of the positions attached to entity `id`.
    fn own_count(&self, id: Id) -> usize {
        self.positions_by_entity
            .get(&id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|position| self.position_count(position))
                    .sum()
            })
            .unwrap_or_default()
    }

    /// Ids of the child entities of entity `id`, in index order.
    fn child_entities(&self, id: Id) -> impl Iterator<Item = Id> + use<'i, 'a> {
        let index = self.index;
        index
            .entity(id)
            .map(|entity| index.children(NodeKey::Entity(entity)))
            .unwrap_or_default()
            .iter()
            .filter_map(|child| match child {
                NodeKey::Entity(child) => Some(child.id()),
                NodeKey::Position(_) => None,
            })
    }

    /// Returns the head-count of any item, dispatching on its kind.
    pub(crate) fn count(&mut self, key: NodeKey<'_>) -> usize {
        match key {
            NodeKey::Entity(entity) => self.entity_count(entity.id()),
            NodeKey::Position(position) => self.position_count(position),
        }
    }
}
