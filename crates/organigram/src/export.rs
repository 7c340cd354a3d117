//! Export functionality for org charts.
//!
//! This module provides the [`Exporter`] trait implemented by every output
//! backend. It is the last stage of the Organigram pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Organization (entities, positions, people)
//!     ↓ structure
//! Children index
//!     ↓ layout
//! OrgChart (positioned nodes and edges)
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`json`] - the chart's node and edge records as JSON
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`OrganigramError::Export`] at the crate boundary.
//!
//! [`OrganigramError::Export`]: crate::OrganigramError::Export

/// JSON export backend.
pub mod json;
/// SVG export backend.
pub mod svg;

use crate::layout::OrgChart;

/// Abstraction for chart export backends.
pub trait Exporter {
    /// Exports a laid-out chart to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the chart cannot be drawn, or
    /// [`Error::Serialize`] if the records cannot be encoded.
    fn export_chart(&self, chart: &OrgChart<'_>) -> Result<String, Error>;
}

/// Errors that can occur during chart export.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// The chart records could not be encoded.
    Serialize(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}
