//! Command-line argument definitions for the Organigram CLI.
//!
//! Arguments control input/output paths, the output format, configuration
//! file selection, and logging verbosity.

use std::path::Path;

use clap::{Parser, ValueEnum};

/// Output document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Json,
}

/// Command-line arguments for the Organigram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input organization document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns the requested format, falling back to the output extension.
    ///
    /// Anything but a `.json` output defaults to SVG.
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_else(|| {
            let is_json = Path::new(&self.output)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

            if is_json {
                OutputFormat::Json
            } else {
                OutputFormat::Svg
            }
        })
    }
}
