//! Organigram - org-chart layout for organizational hierarchies.
//!
//! Lays out entities (organizational units) and positions (job slots) as a
//! top-down tree, aggregates head-counts up the entity hierarchy and renders
//! the result as SVG or JSON.

pub mod config;

mod error;
mod export;
mod layout;
mod structure;

pub use organigram_core::{color, geometry, identifier, model};

pub use error::OrganigramError;
pub use layout::{ChartEdge, ChartNode, NodeKind, OrgChart, SourceItem, build_layout};

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use model::Organization;

/// Builder for decoding, laying out and rendering org charts.
///
/// # Examples
///
/// ```rust
/// use organigram::{OrganigramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "entities": [
///         { "id": "E1", "type": "direction", "name": "Head office" },
///         { "id": "E2", "type": "service", "parentId": "E1" }
///     ],
///     "positions": [
///         { "id": "P1", "entityId": "E1", "occupantIds": ["p1", "p2"] }
///     ]
/// }"#;
///
/// let builder = OrganigramBuilder::new(AppConfig::default());
/// let organization = builder.parse(source).expect("Failed to parse");
///
/// let chart = builder.layout(&organization).expect("Failed to lay out");
/// assert_eq!(chart.nodes().len(), 3);
///
/// let svg = builder.render_svg(&organization).expect("Failed to render");
/// assert!(svg.contains("Head office"));
/// ```
#[derive(Default)]
pub struct OrganigramBuilder {
    config: AppConfig,
}

impl OrganigramBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Decode an organization document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OrganigramError::Input`] if `source` is not a valid
    /// organization document. The error keeps `source` for diagnostics.
    pub fn parse(&self, source: &str) -> Result<Organization, OrganigramError> {
        info!("Parsing organization");

        let organization: Organization = serde_json::from_str(source)
            .map_err(|err| OrganigramError::new_input_error(err, source))?;

        debug!(
            entities_count = organization.entities().len(),
            positions_count = organization.positions().len(),
            people_count = organization.people().len();
            "Organization parsed successfully"
        );
        trace!(organization:?; "Parsed organization");

        Ok(organization)
    }

    /// Lay out `organization` with the configured geometry.
    ///
    /// # Errors
    ///
    /// See [`build_layout`].
    pub fn layout<'a>(
        &self,
        organization: &'a Organization,
    ) -> Result<OrgChart<'a>, OrganigramError> {
        build_layout(
            organization.entities(),
            organization.positions(),
            organization.people(),
            self.config.layout(),
        )
    }

    /// Lay out and render `organization` as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns the layout errors of [`build_layout`], or
    /// [`OrganigramError::Export`] if a configured style color is invalid.
    pub fn render_svg(&self, organization: &Organization) -> Result<String, OrganigramError> {
        let chart = self.layout(organization)?;

        let svg_exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;

        Ok(svg_exporter.export_chart(&chart)?)
    }

    /// Lay out `organization` and encode the chart as JSON node and edge
    /// records.
    ///
    /// # Errors
    ///
    /// Returns the layout errors of [`build_layout`], or
    /// [`OrganigramError::Export`] if encoding fails.
    pub fn render_json(&self, organization: &Organization) -> Result<String, OrganigramError> {
        let chart = self.layout(organization)?;
        Ok(export::json::Json.export_chart(&chart)?)
    }
}
