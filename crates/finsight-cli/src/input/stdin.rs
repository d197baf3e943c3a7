use serde_json::Value;
use std::io::{self, Read};

/// Read a piped financial record, JSON or YAML.
/// Returns None if stdin is a TTY (interactive) or carries nothing.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_document(&buffer)
}

/// JSON when the text opens with an object or array, YAML otherwise.
fn parse_document(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = if trimmed.starts_with(['{', '[']) {
        serde_json::from_str(trimmed).map_err(|e| format!("Failed to parse stdin as JSON: {}", e))?
    } else {
        serde_yaml::from_str(trimmed).map_err(|e| format!("Failed to parse stdin as YAML: {}", e))?
    };
    tracing::debug!(bytes = trimmed.len(), "read financial record from stdin");
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_and_yaml_records() {
        let from_json = parse_document(r#"{ "revenue": 1000, "current_assets": 200 }"#).unwrap();
        let from_yaml = parse_document("revenue: 1000\ncurrent_assets: 200\n").unwrap();
        let expected = json!({ "revenue": 1000, "current_assets": 200 });
        assert_eq!(from_json, Some(expected.clone()));
        assert_eq!(from_yaml, Some(expected));
    }

    #[test]
    fn test_blank_input_is_absent() {
        assert_eq!(parse_document("  \n\t").unwrap(), None);
    }

    #[test]
    fn test_malformed_json_names_the_format() {
        let err = parse_document("{ \"revenue\": ").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse stdin as JSON"));
    }
}
