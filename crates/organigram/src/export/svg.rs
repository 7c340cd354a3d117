//! SVG rendering of org charts.
//!
//! Nodes are drawn as rounded rectangles with a label (name, title or id) and
//! a head-count line; parent/child links are drawn as orthogonal connectors
//! from the bottom center of the parent to the top center of the child.

use std::collections::HashMap;

use log::{debug, info};
use svg::node::element::{self as svg_element, path::Data};

use organigram_core::{
    color::Color,
    geometry::{Point, Size},
    identifier::Id,
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{ChartNode, NodeKind, OrgChart, SourceItem},
};

const MARGIN: f32 = 40.0;
const CORNER_RADIUS: f32 = 6.0;
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const LABEL_FONT_SIZE: f32 = 15.0;
const COUNT_FONT_SIZE: f32 = 12.0;

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder<'s> {
    style: Option<&'s StyleConfig>,
}

impl<'s> SvgBuilder<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the colors of `style`; unset colors keep their defaults.
    pub fn with_style(mut self, style: &'s StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Resolves the configured colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let mut svg = Svg::default();

        let Some(style) = self.style else {
            return Ok(svg);
        };

        svg.background_color = style.background_color().map_err(Error::Render)?;
        if let Some(color) = style.entity_fill().map_err(Error::Render)? {
            svg.entity_fill = color;
        }
        if let Some(color) = style.position_fill().map_err(Error::Render)? {
            svg.position_fill = color;
        }
        if let Some(color) = style.stroke_color().map_err(Error::Render)? {
            svg.stroke_color = color;
        }
        if let Some(color) = style.text_color().map_err(Error::Render)? {
            svg.text_color = color;
        }

        Ok(svg)
    }
}

/// SVG exporter with resolved colors.
#[derive(Debug, Clone)]
pub struct Svg {
    margin: f32,
    background_color: Option<Color>,
    entity_fill: Color,
    position_fill: Color,
    stroke_color: Color,
    text_color: Color,
}

impl Default for Svg {
    fn default() -> Self {
        Self {
            margin: MARGIN,
            background_color: None,
            entity_fill: color_or_black("#dbe9f6"),
            position_fill: color_or_black("#fdf6e3"),
            stroke_color: color_or_black("#34495e"),
            text_color: Color::default(),
        }
    }
}

fn color_or_black(value: &str) -> Color {
    Color::new(value).unwrap_or_default()
}

impl Svg {
    /// Renders the chart into an SVG document.
    pub fn render_chart(&self, chart: &OrgChart<'_>) -> svg::Document {
        let content_bounds = chart.bounds();
        let svg_size = self.calculate_svg_dimensions(content_bounds.to_size());

        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());
        let doc = self.add_background(doc, svg_size);

        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                self.margin - content_bounds.min_x(),
                self.margin - content_bounds.min_y()
            ),
        );

        let nodes: HashMap<(NodeKind, Id), &ChartNode<'_>> = chart
            .nodes()
            .iter()
            .map(|node| ((node.kind(), node.id()), node))
            .collect();

        // Connectors go first so node boxes paint over their ends.
        for edge in chart.edges() {
            let source = nodes.get(&(edge.source_kind(), edge.source()));
            let target = nodes.get(&(edge.target_kind(), edge.target()));
            if let (Some(source), Some(target)) = (source, target) {
                main_group = main_group.add(self.render_connector(source, target));
            }
        }

        for node in chart.nodes() {
            main_group = main_group.add(self.render_node(node));
        }

        debug!(
            width = svg_size.width(),
            height = svg_size.height(),
            nodes_count = chart.nodes().len();
            "SVG document rendered"
        );

        doc.add(main_group)
    }

    fn calculate_svg_dimensions(&self, content_size: Size) -> Size {
        Size::new(
            self.margin.mul_add(2.0, content_size.width()),
            self.margin.mul_add(2.0, content_size.height()),
        )
    }

    fn add_background(&self, doc: svg::Document, size: Size) -> svg::Document {
        let Some(color) = &self.background_color else {
            return doc;
        };

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", color)
            .set("fill-opacity", color.alpha());

        doc.add(background)
    }

    fn render_node(&self, node: &ChartNode<'_>) -> svg_element::Group {
        let bounds = node.bounds();
        let fill = match node.kind() {
            NodeKind::Entity => &self.entity_fill,
            NodeKind::Position => &self.position_fill,
        };

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CORNER_RADIUS)
            .set("fill", fill)
            .set("fill-opacity", fill.alpha())
            .set("stroke", &self.stroke_color)
            .set("stroke-width", 1.5);

        let center_x = bounds.center().x();
        let label = self.render_text(
            node_label(node),
            Point::new(center_x, bounds.min_y() + bounds.height() * 0.4),
            LABEL_FONT_SIZE,
        );
        let count = self.render_text(
            count_label(node),
            Point::new(center_x, bounds.min_y() + bounds.height() * 0.72),
            COUNT_FONT_SIZE,
        );

        svg_element::Group::new()
            .set("id", format!("{}-{}", node.kind(), node.id()))
            .add(rect)
            .add(label)
            .add(count)
    }

    fn render_text(&self, content: String, position: Point, font_size: f32) -> svg_element::Text {
        svg_element::Text::new(content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", font_size)
            .set("fill", &self.text_color)
    }

    fn render_connector(&self, source: &ChartNode<'_>, target: &ChartNode<'_>) -> svg_element::Path {
        let start = source.position().with_y(source.bounds().max_y());
        let end = target.position();

        svg_element::Path::new()
            .set("d", orthogonal_path(start, end))
            .set("fill", "none")
            .set("stroke", &self.stroke_color)
            .set("stroke-width", 1.5)
    }
}

impl Exporter for Svg {
    fn export_chart(&self, chart: &OrgChart<'_>) -> Result<String, Error> {
        let doc = self.render_chart(chart);
        info!("SVG rendered successfully");
        Ok(doc.to_string())
    }
}

/// Vertical, horizontal, vertical: the elbow sits halfway between the levels.
fn orthogonal_path(start: Point, end: Point) -> Data {
    let mid_y = start.y() + (end.y() - start.y()) / 2.0;

    Data::new()
        .move_to((start.x(), start.y()))
        .line_to((start.x(), mid_y))
        .line_to((end.x(), mid_y))
        .line_to((end.x(), end.y()))
}

/// Name or title of the source record, falling back to the id.
fn node_label(node: &ChartNode<'_>) -> String {
    let label = match node.source_item() {
        SourceItem::Entity(entity) => entity.name(),
        SourceItem::Position(position) => position.title(),
    };

    label.map_or_else(|| node.id().to_string(), str::to_string)
}

fn count_label(node: &ChartNode<'_>) -> String {
    match node.source_item() {
        SourceItem::Entity(_) => match node.occupant_count() {
            1 => "1 person".to_string(),
            count => format!("{count} people"),
        },
        SourceItem::Position(position) => {
            format!("{}/{}", node.occupant_count(), position.target_headcount())
        }
    }
}

#[cfg(test)]
mod tests {
    use organigram_core::model::{Entity, Position};

    use super::*;
    use crate::{config::LayoutConfig, layout::build_layout};

    fn sample() -> (Vec<Entity>, Vec<Position>) {
        let entities = vec![
            Entity::new("E1", "direction").with_name("Head office"),
            Entity::new("E2", "service").with_parent("E1"),
        ];
        let positions = vec![
            Position::new("P1", "E1")
                .with_title("Director")
                .with_occupants(["p1"])
                .with_target_headcount(2),
        ];
        (entities, positions)
    }

    #[test]
    fn test_render_contains_nodes_and_connectors() {
        let (entities, positions) = sample();
        let chart = build_layout(&entities, &positions, &[], &LayoutConfig::default()).unwrap();

        let svg = SvgBuilder::new().build().unwrap().export_chart(&chart).unwrap();

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("Head office"));
        assert!(svg.contains("Director"));
        assert!(svg.contains("id=\"entity-E2\""));
        assert!(svg.contains("1/2"));
        assert!(svg.contains("1 person"));
        assert!(svg.contains("0 people"));
        assert!(!svg.contains("1 people"));
    }

    #[test]
    fn test_count_label_pluralizes_people() {
        let entities = vec![
            Entity::new("E1", "direction"),
            Entity::new("E2", "service").with_parent("E1"),
        ];
        let positions = vec![
            Position::new("P1", "E1").with_occupants(["p1"]),
            Position::new("P2", "E2").with_occupants(["p2"]),
        ];
        let chart = build_layout(&entities, &positions, &[], &LayoutConfig::default()).unwrap();

        let label = |id: &str| count_label(chart.find(NodeKind::Entity, Id::new(id)).unwrap());

        assert_eq!(label("E1"), "2 people");
        assert_eq!(label("E2"), "1 person");
    }

    #[test]
    fn test_document_is_sized_to_chart_plus_margin() {
        let (entities, positions) = sample();
        let chart = build_layout(&entities, &positions, &[], &LayoutConfig::default()).unwrap();

        let svg = SvgBuilder::new().build().unwrap();
        let doc = svg.render_chart(&chart).to_string();

        // Two siblings of 220 with a 40 gap, two levels of 90 with an 80 gap,
        // plus a 40 margin on each side.
        assert!(doc.contains("viewBox=\"0 0 560 340\""));
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let (entities, positions) = sample();
        let chart = build_layout(&entities, &positions, &[], &LayoutConfig::default()).unwrap();

        let labels: Vec<String> = chart.nodes().iter().map(node_label).collect();

        assert_eq!(labels, vec!["Head office", "E2", "Director"]);
    }

    #[test]
    fn test_orthogonal_path() {
        let data = orthogonal_path(Point::new(0.0, 90.0), Point::new(-130.0, 170.0));
        let path = svg_element::Path::new().set("d", data).to_string();

        assert!(path.contains("M0,90"));
        assert!(path.contains("L0,130"));
        assert!(path.contains("L-130,130"));
        assert!(path.contains("L-130,170"));
    }

    #[test]
    fn test_style_colors_are_applied() {
        let (entities, positions) = sample();
        let chart = build_layout(&entities, &positions, &[], &LayoutConfig::default()).unwrap();
        let style = StyleConfig::default()
            .with_background_color("white")
            .with_entity_fill("#ff0000");

        let svg = SvgBuilder::new().with_style(&style).build().unwrap();
        let doc = svg.export_chart(&chart).unwrap();

        // Background plus three nodes.
        assert_eq!(doc.matches("<rect").count(), 4);
        assert!(svg.background_color.is_some());
        assert_eq!(svg.entity_fill, Color::new("#ff0000").unwrap());
    }

    #[test]
    fn test_invalid_style_color_fails_build() {
        let style = StyleConfig::default().with_position_fill("not-a-color");

        let err = SvgBuilder::new().with_style(&style).build().unwrap_err();

        assert!(matches!(err, Error::Render(msg) if msg.contains("position_fill")));
    }

    #[test]
    fn test_empty_chart_renders_margin_only() {
        let svg = SvgBuilder::new().build().unwrap();

        let doc = svg.export_chart(&OrgChart::default()).unwrap();

        assert!(doc.contains("viewBox=\"0 0 80 80\""));
        assert!(!doc.contains("<rect"));
    }
}
