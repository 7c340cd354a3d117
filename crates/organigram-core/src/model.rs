//! Organizational records consumed by the layout engine.
//!
//! The records mirror the JSON documents exchanged with the hosting
//! application, hence the camelCase field names on the wire:
//!
//! ```json
//! {
//!   "entities":  [{ "id": "E1", "type": "direction", "name": "Head office" }],
//!   "positions": [{ "id": "P1", "entityId": "E1", "occupantIds": ["p1"], "targetHeadcount": 2 }],
//!   "people":    [{ "id": "p1", "name": "A. Martin" }]
//! }
//! ```
//!
//! Nothing here validates references between records. Dangling parent or
//! entity references are legal input; the layout engine treats them as roots.

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// An organizational unit (direction, department, team, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<Id>,
    #[serde(rename = "type", default)]
    entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Entity {
    /// Creates a root entity with the given type tag.
    pub fn new(id: impl Into<Id>, entity_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            entity_type: entity_type.into(),
            name: None,
        }
    }

    /// Attaches this entity under `parent_id` (builder style).
    pub fn with_parent(mut self, parent_id: impl Into<Id>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets the display name (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn parent_id(&self) -> Option<Id> {
        self.parent_id
    }

    /// Returns the free-form type tag, e.g. `"direction"` or `"service"`.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A job slot attached to an entity, optionally nested under another position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    id: Id,
    entity_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_position_id: Option<Id>,
    #[serde(default)]
    occupant_ids: Vec<Id>,
    #[serde(default)]
    target_headcount: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl Position {
    /// Creates an unoccupied position belonging to `entity_id`.
    pub fn new(id: impl Into<Id>, entity_id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            entity_id: entity_id.into(),
            parent_position_id: None,
            occupant_ids: Vec::new(),
            target_headcount: 0,
            title: None,
        }
    }

    /// Nests this position under another position (builder style).
    pub fn with_parent_position(mut self, parent_position_id: impl Into<Id>) -> Self {
        self.parent_position_id = Some(parent_position_id.into());
        self
    }

    /// Sets the people currently filling the position (builder style).
    pub fn with_occupants<I, T>(mut self, occupant_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Id>,
    {
        self.occupant_ids = occupant_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the target headcount (builder style).
    pub fn with_target_headcount(mut self, target_headcount: u32) -> Self {
        self.target_headcount = target_headcount;
        self
    }

    /// Sets the display title (builder style).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn entity_id(&self) -> Id {
        self.entity_id
    }

    pub fn parent_position_id(&self) -> Option<Id> {
        self.parent_position_id
    }

    pub fn occupant_ids(&self) -> &[Id] {
        &self.occupant_ids
    }

    pub fn target_headcount(&self) -> u32 {
        self.target_headcount
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// A person who may occupy positions. Only the id takes part in the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Person {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Sets the display name (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// The three input collections bundled as one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    positions: Vec<Position>,
    #[serde(default)]
    people: Vec<Person>,
}

impl Organization {
    pub fn new(entities: Vec<Entity>, positions: Vec<Position>, people: Vec<Person>) -> Self {
        Self {
            entities,
            positions,
            people,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_document() {
        let json = r#"{
            "entities": [
                { "id": "E1", "type": "direction", "name": "Head office" },
                { "id": "E2", "parentId": "E1", "type": "service" }
            ],
            "positions": [
                { "id": "P1", "entityId": "E1", "occupantIds": ["p1", "p2"], "targetHeadcount": 3, "title": "Director" },
                { "id": "P2", "entityId": "E2", "parentPositionId": "P1" }
            ],
            "people": [{ "id": "p1", "name": "A. Martin" }]
        }"#;

        let org: Organization = serde_json::from_str(json).unwrap();

        assert_eq!(org.entities().len(), 2);
        let e2 = &org.entities()[1];
        assert_eq!(e2.parent_id(), Some(Id::new("E1")));
        assert_eq!(e2.entity_type(), "service");
        assert_eq!(e2.name(), None);

        let p1 = &org.positions()[0];
        assert_eq!(p1.occupant_ids(), &[Id::new("p1"), Id::new("p2")]);
        assert_eq!(p1.target_headcount(), 3);
        assert_eq!(p1.title(), Some("Director"));

        let p2 = &org.positions()[1];
        assert_eq!(p2.parent_position_id(), Some(Id::new("P1")));
        assert!(p2.occupant_ids().is_empty());
        assert_eq!(p2.target_headcount(), 0);

        assert_eq!(org.people()[0].name(), Some("A. Martin"));
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let org: Organization = serde_json::from_str("{}").unwrap();
        assert_eq!(org, Organization::default());
    }

    #[test]
    fn test_serialize_skips_absent_optionals() {
        let entity = Entity::new("E1", "direction");
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"id":"E1","type":"direction"}"#);

        let position = Position::new("P1", "E1")
            .with_parent_position("P0")
            .with_occupants(["p1"]);
        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(
            json,
            r#"{"id":"P1","entityId":"E1","parentPositionId":"P0","occupantIds":["p1"],"targetHeadcount":0}"#
        );
    }

    #[test]
    fn test_builders() {
        let entity = Entity::new("E2", "team").with_parent("E1").with_name("Audit");
        assert_eq!(entity.id(), "E2");
        assert_eq!(entity.parent_id(), Some(Id::new("E1")));
        assert_eq!(entity.name(), Some("Audit"));

        let person = Person::new("p9").with_name("B. Durand");
        assert_eq!(person.id(), "p9");
        assert_eq!(person.name(), Some("B. Durand"));
    }
}
