use serde_json::Value;

use super::Payload;

/// Print just the key answer from the output.
///
/// Metric arrays print one `id value status` line per metric; reports print
/// the overall score and risk level; other objects fall back to a priority
/// field or the first field.
pub fn print_minimal(value: &Value) {
    match Payload::of(value) {
        Payload::Metrics(items) => {
            for item in items {
                let field = |k: &str| item.get(k).map(format_minimal).unwrap_or_default();
                println!("{}\t{}\t{}", field("id"), field("value"), field("status"));
            }
        }
        Payload::Report(report) => {
            let summary = report.get("summary");
            let field = |k: &str| summary.and_then(|s| s.get(k)).map(format_minimal).unwrap_or_default();
            println!("{} {}", field("score"), field("riskLevel"));
        }
        Payload::Other(Value::Array(items)) => {
            for item in items {
                println!("{}", format_minimal(item));
            }
        }
        Payload::Other(Value::Object(map)) => {
            // Priority list of key output fields
            for key in ["status", "score", "confidence"] {
                if let Some(val) = map.get(key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }

            // Fall back to first field
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
        Payload::Other(other) => println!("{}", format_minimal(other)),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
