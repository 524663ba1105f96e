// UK take-home pay: income tax, national insurance, student loan and pension
// deductions computed from an injected, versioned TaxConfig.
// Every monetary path uses rust_decimal. No I/O outside config loading.

pub mod budget;
pub mod calculator;
pub mod config;
pub mod handlers;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxError {
    #[error("Unknown student loan plan: {0}")]
    UnknownStudentLoanPlan(String),

    #[error("Pension contribution must be a fraction between 0 and 1, got {0}")]
    InvalidPensionFraction(rust_decimal::Decimal),

    #[error("Failed to load tax config from {path}: {reason}")]
    ConfigLoad { path: String, reason: String },
}
