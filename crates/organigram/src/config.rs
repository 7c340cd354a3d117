//! Configuration types for Organigram layout and rendering.
//!
//! This module provides configuration structures that control how charts
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Node size, spacing and occupant counting policy.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use organigram::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     horizontal_spacing = 60.0
//!     occupant_counting = "known-people"
//!
//!     [style]
//!     entity_fill = "lightsteelblue"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().horizontal_spacing(), 60.0);
//! assert_eq!(config.layout().node_width(), 220.0);
//! assert!(config.style().entity_fill().unwrap().is_some());
//! ```

use serde::Deserialize;

use organigram_core::{color::Color, geometry::Size};

use crate::OrganigramError;

const DEFAULT_NODE_WIDTH: f32 = 220.0;
const DEFAULT_NODE_HEIGHT: f32 = 90.0;
const DEFAULT_HORIZONTAL_SPACING: f32 = 40.0;
const DEFAULT_VERTICAL_SPACING: f32 = 80.0;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// How occupants of a position are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccupantCounting {
    /// Every entry of a position's occupant list counts.
    #[default]
    Assigned,

    /// Only occupant ids matching a supplied person record count.
    KnownPeople,
}

/// Geometry of the org-chart layout.
///
/// Every node gets the same fixed size; subtrees grow horizontally by
/// `horizontal_spacing` between siblings and each tree level sits
/// `node_height + vertical_spacing` below the previous one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    occupant_counting: OccupantCounting,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            occupant_counting: OccupantCounting::default(),
        }
    }
}

impl LayoutConfig {
    /// Set the fixed size of every node (builder style).
    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_width = size.width();
        self.node_height = size.height();
        self
    }

    /// Set the gap between sibling subtrees (builder style).
    ///
    /// Adjacent root trees are separated by twice this value.
    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the gap between tree levels (builder style).
    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Set the occupant counting policy (builder style).
    pub fn with_occupant_counting(mut self, counting: OccupantCounting) -> Self {
        self.occupant_counting = counting;
        self
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Returns the vertical distance between two consecutive tree levels.
    pub fn level_height(&self) -> f32 {
        self.node_height + self.vertical_spacing
    }

    pub fn occupant_counting(&self) -> OccupantCounting {
        self.occupant_counting
    }

    /// Checks that the geometry yields non-degenerate, finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`OrganigramError::Config`] if a node dimension is not a
    /// positive finite number or a spacing is negative or not finite.
    pub fn validate(&self) -> Result<(), OrganigramError> {
        for (name, value) in [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OrganigramError::Config(format!(
                    "`{name}` must be a positive number, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(OrganigramError::Config(format!(
                    "`{name}` must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Visual styling configuration for rendered charts.
///
/// Colors are kept as CSS strings until the exporter asks for them. Fields
/// that are not set fall back to exporter defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    entity_fill: Option<String>,

    #[serde(default)]
    position_fill: Option<String>,

    #[serde(default)]
    stroke_color: Option<String>,

    #[serde(default)]
    text_color: Option<String>,
}

impl StyleConfig {
    /// Sets the chart background color (builder style).
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Sets the entity node fill color (builder style).
    pub fn with_entity_fill(mut self, color: impl Into<String>) -> Self {
        self.entity_fill = Some(color.into());
        self
    }

    /// Sets the position node fill color (builder style).
    pub fn with_position_fill(mut self, color: impl Into<String>) -> Self {
        self.position_fill = Some(color.into());
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background_color", self.background_color.as_deref())
    }

    /// Returns the parsed fill [`Color`] of entity nodes.
    pub fn entity_fill(&self) -> Result<Option<Color>, String> {
        parse_color("entity_fill", self.entity_fill.as_deref())
    }

    /// Returns the parsed fill [`Color`] of position nodes.
    pub fn position_fill(&self) -> Result<Option<Color>, String> {
        parse_color("position_fill", self.position_fill.as_deref())
    }

    /// Returns the parsed [`Color`] of node borders and connectors.
    pub fn stroke_color(&self) -> Result<Option<Color>, String> {
        parse_color("stroke_color", self.stroke_color.as_deref())
    }

    /// Returns the parsed [`Color`] of node labels.
    pub fn text_color(&self) -> Result<Option<Color>, String> {
        parse_color("text_color", self.text_color.as_deref())
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {field} in config: {err}"))
}
