pub mod financial_data;
pub mod inputs;

pub use financial_data::{CompanyInfo, FinancialData};
pub use inputs::{InputValue, Inputs, Shocks};
