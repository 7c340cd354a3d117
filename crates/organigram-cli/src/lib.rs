//! Organigram CLI library
//!
//! This module contains the core CLI logic for the Organigram org-chart tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::info;

use organigram::{OrganigramBuilder, OrganigramError};

/// Run the Organigram CLI application
///
/// Reads the organization document, lays it out and writes the chart to the
/// output file in the requested format.
///
/// # Errors
///
/// Returns `OrganigramError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input decoding errors
/// - Structural errors (duplicate ids, parent cycles)
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), OrganigramError> {
    let format = args.output_format();
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = format;
        "Processing organization"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = OrganigramBuilder::new(app_config);
    let organization = builder.parse(&source)?;
    let document = match format {
        OutputFormat::Svg => builder.render_svg(&organization)?,
        OutputFormat::Json => builder.render_json(&organization)?,
    };

    fs::write(&args.output, document)?;

    info!(output_file = args.output; "Chart exported successfully");

    Ok(())
}
