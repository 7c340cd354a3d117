use log::debug;

use super::{Error, Exporter};
use crate::layout::OrgChart;

/// Writes the chart as pretty-printed `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Default)]
pub struct Json;

impl Exporter for Json {
    fn export_chart(&self, chart: &OrgChart<'_>) -> Result<String, Error> {
        let json = serde_json::to_string_pretty(chart).map_err(Error::Serialize)?;
        debug!(bytes = json.len(); "JSON document rendered");
        Ok(json)
    }
}
