//! Error types for Organigram operations.
//!
//! This module provides the main error type [`OrganigramError`] which wraps
//! the error conditions that can occur while decoding an organization,
//! laying it out and exporting the resulting chart.

use std::io;

use thiserror::Error;

use organigram_core::identifier::Id;

use crate::layout::NodeKind;

/// The main error type for Organigram operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the source text next to the JSON decoding error
/// so front-ends can point at the offending line and column.
#[derive(Debug, Error)]
pub enum OrganigramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid organization document: {err}")]
    Input { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("The {kind} hierarchy contains a cycle: {}", format_cycle(.ids))]
    Cycle { kind: NodeKind, ids: Vec<Id> },

    #[error("Duplicate {kind} id `{id}`")]
    DuplicateId { kind: NodeKind, id: Id },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for OrganigramError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl OrganigramError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}

/// Renders a cycle as `a -> b -> c -> a`.
fn format_cycle(ids: &[Id]) -> String {
    let mut path: Vec<String> = ids.iter().map(Id::to_string).collect();
    if let Some(first) = path.first().cloned() {
        path.push(first);
    }
    path.join(" -> ")
}
