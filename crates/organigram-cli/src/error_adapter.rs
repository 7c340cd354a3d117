//! Error adapter for converting OrganigramError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Decoding errors of
//! the input document are labelled at the line and column reported by
//! `serde_json`.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use organigram::OrganigramError;

/// Adapter for a JSON decoding error of the input document.
pub struct InputAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> InputAdapter<'a> {
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid organization document")
    }
}

impl std::error::Error for InputAdapter<'_> {}

impl MietteDiagnostic for InputAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("organigram::input"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err.classify() {
            serde_json::error::Category::Syntax => "the document is not well-formed JSON",
            serde_json::error::Category::Eof => "the document ends unexpectedly",
            serde_json::error::Category::Data => {
                "entities need `id` and `type`, positions need `id` and `entityId`"
            }
            serde_json::error::Category::Io => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = error_span(self.src, self.err.line(), self.err.column());
        let message = Some(message_without_position(self.err));
        let label = LabeledSpan::new_primary_with_span(message, span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-diagnostic [`OrganigramError`] variants.
///
/// This adapter handles errors that don't carry source text, such as I/O,
/// configuration, structure, and export errors.
pub struct ErrorAdapter<'a>(pub &'a OrganigramError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            OrganigramError::Io(_) => "organigram::io",
            OrganigramError::Input { .. } => "organigram::input",
            OrganigramError::Config(_) => "organigram::config",
            OrganigramError::Cycle { .. } => "organigram::cycle",
            OrganigramError::DuplicateId { .. } => "organigram::duplicate_id",
            OrganigramError::Export(_) => "organigram::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            OrganigramError::Cycle { .. } => Some(Box::new(
                "every parent chain must end at an item without a known parent",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An input decoding error labelled in the source document.
    Input(InputAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Input(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Input(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Input(i) => i.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Input(i) => i.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Converts a one-based line and column into a one-character [`SourceSpan`].
///
/// Positions past the end of a line or of the source are clamped; a position
/// at the very end of the source yields an empty span there.
fn error_span(src: &str, line: usize, column: usize) -> SourceSpan {
    let mut offset = 0;
    for (idx, text) in src.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let line_len = text.trim_end_matches(['\r', '\n']).len();
            offset += column.saturating_sub(1).min(line_len);
            break;
        }
        offset += text.len();
    }

    let offset = offset.min(src.len());
    let len = src
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    SourceSpan::new(offset.into(), len)
}

/// `serde_json` appends " at line L column C" to its messages; the label
/// already points there.
fn message_without_position(err: &serde_json::Error) -> String {
    let message = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    message
        .strip_suffix(&suffix)
        .map_or_else(|| message.clone(), str::to_string)
}

/// Convert an [`OrganigramError`] into a list of reportable errors.
pub fn to_reportables(err: &OrganigramError) -> Vec<Reportable<'_>> {
    match err {
        OrganigramError::Input { err: json_err, src } => {
            vec![Reportable::Input(InputAdapter::new(json_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
