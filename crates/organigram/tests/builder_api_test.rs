//! Integration tests for the OrganigramBuilder API
//!
//! These tests drive the public API end to end, from a JSON document to the
//! rendered outputs.

use organigram::{
    NodeKind, OrganigramBuilder, OrganigramError,
    config::{AppConfig, LayoutConfig, StyleConfig},
    identifier::Id,
};

const SAMPLE: &str = r#"{
    "entities": [
        { "id": "E1", "type": "direction", "name": "Head office" },
        { "id": "E2", "type": "service", "parentId": "E1", "name": "Finance" }
    ],
    "positions": [
        { "id": "P1", "entityId": "E1", "title": "Director", "occupantIds": ["p1", "p2"], "targetHeadcount": 2 },
        { "id": "P2", "entityId": "E2", "title": "Accountant", "occupantIds": ["p3"], "targetHeadcount": 3 }
    ],
    "people": [
        { "id": "p1", "name": "A. Martin" },
        { "id": "p2" },
        { "id": "p3" }
    ]
}"#;

#[test]
fn test_builder_api_exists() {
    let _builder = OrganigramBuilder::default();
}

#[test]
fn test_parse_and_layout() {
    let builder = OrganigramBuilder::default();
    let organization = builder.parse(SAMPLE).expect("Failed to parse organization");

    let chart = builder
        .layout(&organization)
        .expect("Failed to lay out organization");

    assert_eq!(chart.nodes().len(), 4);
    assert_eq!(chart.edges().len(), 3);

    let head_office = chart.find(NodeKind::Entity, Id::new("E1")).unwrap();
    assert_eq!(head_office.occupant_count(), 3);
    assert_eq!(head_office.position().y(), 0.0);

    let accountant = chart.find(NodeKind::Position, Id::new("P2")).unwrap();
    assert_eq!(accountant.vacancies(), Some(2));
    assert_eq!(accountant.position().y(), 340.0);
}

#[test]
fn test_render_svg() {
    let builder = OrganigramBuilder::default();
    let organization = builder.parse(SAMPLE).expect("Failed to parse organization");

    let svg = builder
        .render_svg(&organization)
        .expect("Failed to render organization");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Finance"));
    assert!(svg.contains("1/3"));
}

#[test]
fn test_render_json() {
    let builder = OrganigramBuilder::default();
    let organization = builder.parse(SAMPLE).expect("Failed to parse organization");

    let json = builder
        .render_json(&organization)
        .expect("Failed to render organization");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["nodes"][0]["id"], "E1");
    assert_eq!(value["nodes"][0]["kind"], "entity");
    assert_eq!(value["nodes"][0]["occupantCount"], 3);
    assert_eq!(value["edges"].as_array().unwrap().len(), 3);
}

#[test]
fn test_builder_with_config() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        node_height = 60.0
        vertical_spacing = 40.0
        "#,
    )
    .unwrap();
    let builder = OrganigramBuilder::new(config);
    let organization = builder.parse(SAMPLE).unwrap();

    let chart = builder.layout(&organization).unwrap();

    let finance = chart.find(NodeKind::Entity, Id::new("E2")).unwrap();
    assert_eq!(finance.position().y(), 100.0);
}

#[test]
fn test_parse_invalid_json_returns_input_error() {
    let builder = OrganigramBuilder::default();

    let result = builder.parse(r#"{ "entities": [ { "type": "team" } ] }"#);

    assert!(
        matches!(result, Err(OrganigramError::Input { .. })),
        "Missing ids should be rejected"
    );
}

#[test]
fn test_cycle_returns_error() {
    let source = r#"{
        "entities": [
            { "id": "A", "type": "service", "parentId": "B" },
            { "id": "B", "type": "service", "parentId": "A" }
        ]
    }"#;
    let builder = OrganigramBuilder::default();
    let organization = builder.parse(source).unwrap();

    let err = builder.render_svg(&organization).unwrap_err();

    assert!(matches!(err, OrganigramError::Cycle { .. }));
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn test_invalid_style_returns_export_error() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::default().with_entity_fill("definitely-not-a-color"),
    );
    let builder = OrganigramBuilder::new(config);
    let organization = builder.parse(SAMPLE).unwrap();

    let err = builder.render_svg(&organization).unwrap_err();

    assert!(matches!(err, OrganigramError::Export(_)));
    // JSON output does not depend on the style.
    assert!(builder.render_json(&organization).is_ok());
}

#[test]
fn test_empty_document_renders() {
    let builder = OrganigramBuilder::default();
    let organization = builder.parse("{}").unwrap();

    let chart = builder.layout(&organization).unwrap();
    assert!(chart.is_empty());

    let svg = builder.render_svg(&organization).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_builder_reusability() {
    let builder = OrganigramBuilder::default();

    let first = builder.parse(SAMPLE).unwrap();
    let second = builder
        .parse(r#"{ "entities": [ { "id": "solo", "type": "team" } ] }"#)
        .unwrap();

    let first_chart = builder.layout(&first).unwrap();
    let second_chart = builder.layout(&second).unwrap();

    assert_eq!(first_chart.nodes().len(), 4);
    assert_eq!(second_chart.nodes().len(), 1);
}
