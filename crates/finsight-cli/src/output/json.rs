use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print JSON to stdout. A reader closing the pipe early
/// (`finsight report | head`) ends output without an error.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("JSON output error: {}", e);
        }
    }
}

pub(crate) fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decimal_strings_survive_output() {
        let value = json!({ "result": [{ "id": "net_margin", "value": "12.3456" }], "warnings": [] });
        let mut out = Vec::new();
        write_json(&mut out, &value).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"result\""));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, value);
    }
}
