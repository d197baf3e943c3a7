pub mod file;
pub mod stdin;

use finsight_core::FinancialData;

/// Load the financial record from `--input` or piped stdin.
pub fn financial_data(path: Option<&str>) -> Result<FinancialData, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        file::read_document(path)
    } else if let Some(data) = stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err("--input <file.json|file.yaml> or stdin required".into())
    }
}
