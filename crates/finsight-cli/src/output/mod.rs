pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use serde_json::{Map, Value};

use crate::OutputFormat;

/// What a command placed under `result`.
pub enum Payload<'a> {
    /// Catalog run rows, basic, applied or advanced.
    Metrics(&'a [Value]),
    /// Scored report with per-tier sections.
    Report(&'a Map<String, Value>),
    /// Listings, counts, classifications and agent verdicts.
    Other(&'a Value),
}

impl<'a> Payload<'a> {
    pub fn of(value: &'a Value) -> Self {
        let result = value.get("result").unwrap_or(value);
        match result {
            Value::Array(items) if items.first().is_some_and(is_metric_row) => Self::Metrics(items),
            Value::Object(map) if map.contains_key("tiers") && map.contains_key("summary") => {
                Self::Report(map)
            }
            other => Self::Other(other),
        }
    }
}

/// A runner result carries both an id and a classification status.
pub fn is_metric_row(item: &Value) -> bool {
    item.get("id").is_some() && item.get("status").is_some()
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => {
            log_warnings(value);
            csv_out::print_csv(value)
        }
        OutputFormat::Minimal => {
            log_warnings(value);
            minimal::print_minimal(value)
        }
    }
}

/// CSV and minimal output have no slot for envelope warnings, so they go to stderr.
fn log_warnings(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        for warning in warnings.iter().filter_map(Value::as_str) {
            tracing::warn!(warning, "analysis warning");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shapes() {
        let metrics = json!({ "result": [{ "id": "current_ratio", "status": "good" }] });
        assert!(matches!(Payload::of(&metrics), Payload::Metrics(rows) if rows.len() == 1));

        let report = json!({ "result": { "tiers": [], "summary": {} } });
        assert!(matches!(Payload::of(&report), Payload::Report(_)));

        let listing = json!({ "result": [{ "id": "current_ratio", "tier": "basic" }] });
        assert!(matches!(Payload::of(&listing), Payload::Other(Value::Array(_))));

        let empty = json!({ "result": [] });
        assert!(matches!(Payload::of(&empty), Payload::Other(_)));
    }
}
