use serde_json::{Map, Value};
use std::io::{self, Write};

use super::Payload;

/// Leading columns of every metric row, in this order.
const METRIC_COLUMNS: [&str; 7] = ["id", "name", "category", "value", "unit", "benchmark", "status"];

/// Appended when the rows come from the advanced catalog.
const ADVANCED_COLUMNS: [&str; 5] = [
    "confidence",
    "modelAccuracy",
    "statisticalSignificance",
    "monteCarloProbability",
    "sensitivity",
];

const STATUS_COLUMNS: [&str; 6] = ["excellent", "good", "average", "poor", "critical", "unavailable"];

/// Write output as CSV to stdout.
///
/// Metric runs print one row per metric with a fixed column order; reports
/// print one row per category section.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        match e.kind() {
            csv::ErrorKind::Io(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
            _ => eprintln!("CSV output error: {}", e),
        }
    }
}

pub(crate) fn write_csv<W: Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    match Payload::of(value) {
        Payload::Metrics(rows) => write_metrics(&mut wtr, rows)?,
        Payload::Report(report) => write_report(&mut wtr, report)?,
        Payload::Other(other) => write_other(&mut wtr, other)?,
    }
    wtr.flush()?;
    Ok(())
}

fn write_metrics<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let mut headers: Vec<&str> = METRIC_COLUMNS.to_vec();
    if rows.iter().any(|r| r.get("confidence").is_some()) {
        headers.extend(ADVANCED_COLUMNS);
    }
    headers.push("error");
    wtr.write_record(&headers)?;

    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| match (*h, row.get(*h)) {
                ("sensitivity", Some(Value::Array(factors))) => flatten_sensitivity(factors),
                (_, Some(v)) => cell(v),
                (_, None) => String::new(),
            })
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

/// `factor:impact;factor:impact`, in the engine's ranking order.
fn flatten_sensitivity(factors: &[Value]) -> String {
    factors
        .iter()
        .filter_map(|f| Some(format!("{}:{}", cell(f.get("factor")?), cell(f.get("impact")?))))
        .collect::<Vec<_>>()
        .join(";")
}

fn write_report<W: Write>(wtr: &mut csv::Writer<W>, report: &Map<String, Value>) -> csv::Result<()> {
    let mut headers = vec!["tier", "category", "name"];
    headers.extend(STATUS_COLUMNS);
    headers.extend(["composite_score", "average_confidence"]);
    wtr.write_record(&headers)?;

    let tiers = report.get("tiers").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
    for tier in tiers {
        let tier_name = tier.get("tier").map(cell).unwrap_or_default();
        let sections = tier.get("sections").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
        for section in sections {
            let field = |key: &str| section.get(key).map(cell).unwrap_or_default();
            let counts = section.get("counts");

            let mut record = vec![tier_name.clone(), field("category"), field("name")];
            record.extend(
                STATUS_COLUMNS
                    .iter()
                    .map(|s| counts.and_then(|c| c.get(*s)).map(cell).unwrap_or_default()),
            );
            record.push(field("composite_score"));
            record.push(field("average_confidence"));
            wtr.write_record(&record)?;
        }
    }
    Ok(())
}

/// Listings and single objects: header from the first object's keys, or field/value pairs.
fn write_other<W: Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.as_str(), &cell(val)])?;
            }
        }
        Value::Array(items) => match items.first() {
            Some(Value::Object(first)) => {
                let headers: Vec<&str> = first.keys().map(String::as_str).collect();
                wtr.write_record(&headers)?;
                for item in items {
                    let row: Vec<String> =
                        headers.iter().map(|h| item.get(*h).map(cell).unwrap_or_default()).collect();
                    wtr.write_record(&row)?;
                }
            }
            _ => {
                for item in items {
                    wtr.write_record([cell(item)])?;
                }
            }
        },
        _ => wtr.write_record([cell(value)])?,
    }
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(value: &Value) -> Vec<String> {
        let mut out = Vec::new();
        write_csv(&mut out, value).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_basic_rows_use_fixed_columns() {
        let value = json!({
            "result": [
                {
                    "status": "excellent", "unit": "times", "id": "current_ratio",
                    "formula": "current assets / current liabilities", "benchmark": "1.5",
                    "value": "2", "category": "liquidity", "name": "Current Ratio"
                },
                {
                    "id": "net_margin", "name": "Net Margin", "category": "profitability",
                    "value": null, "unit": "percent", "benchmark": "10", "status": "unavailable",
                    "error": "zero denominator in net income / revenue"
                }
            ],
            "warnings": []
        });
        assert_eq!(
            render(&value),
            vec![
                "id,name,category,value,unit,benchmark,status,error",
                "current_ratio,Current Ratio,liquidity,2,times,1.5,excellent,",
                "net_margin,Net Margin,profitability,,percent,10,unavailable,zero denominator in net income / revenue",
            ]
        );
    }

    #[test]
    fn test_advanced_rows_flatten_sensitivity() {
        let value = json!({
            "result": [{
                "id": "altman_z", "name": "Altman Z", "category": "credit_risk", "value": "3.1",
                "unit": "score", "benchmark": "3", "status": "good", "confidence": "85",
                "modelAccuracy": "90", "statisticalSignificance": "0.4",
                "monteCarloProbability": null,
                "sensitivity": [
                    { "factor": "revenue", "impact": "12.5" },
                    { "factor": "total_assets", "impact": "-3" }
                ]
            }]
        });
        let lines = render(&value);
        assert_eq!(
            lines[0],
            "id,name,category,value,unit,benchmark,status,confidence,modelAccuracy,\
             statisticalSignificance,monteCarloProbability,sensitivity,error"
        );
        assert_eq!(
            lines[1],
            "altman_z,Altman Z,credit_risk,3.1,score,3,good,85,90,0.4,,revenue:12.5;total_assets:-3,"
        );
    }

    #[test]
    fn test_report_prints_one_row_per_section() {
        let counts = json!({
            "excellent": 2, "good": 1, "average": 0, "poor": 0, "critical": 0, "unavailable": 1
        });
        let value = json!({
            "result": {
                "tiers": [{
                    "tier": "basic",
                    "counts": counts,
                    "composite_score": "75",
                    "sections": [
                        { "category": "liquidity", "name": "Liquidity", "counts": counts,
                          "composite_score": "75", "strengths": [], "concerns": [] },
                        { "category": "leverage", "name": "Leverage, Solvency", "counts": counts,
                          "composite_score": null, "average_confidence": "80",
                          "strengths": [], "concerns": [] }
                    ]
                }],
                "summary": { "score": "75", "riskLevel": "moderate" }
            }
        });
        assert_eq!(
            render(&value),
            vec![
                "tier,category,name,excellent,good,average,poor,critical,unavailable,composite_score,average_confidence",
                "basic,liquidity,Liquidity,2,1,0,0,0,1,75,",
                "basic,leverage,\"Leverage, Solvency\",2,1,0,0,0,1,,80",
            ]
        );
    }

    #[test]
    fn test_counts_object_prints_field_value_pairs() {
        let value = json!({ "result": { "basic": { "liquidity": 12 } } });
        assert_eq!(render(&value), vec!["field,value", "basic,\"{\"\"liquidity\"\":12}\""]);
    }
}
