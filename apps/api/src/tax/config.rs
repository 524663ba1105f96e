//! Versioned UK tax constants. Treated as immutable input data.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::tax::TaxError;

/// Repayment threshold and rate for one student loan plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLoanTerms {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// A named tax year. Thresholds for income tax are expressed on taxable
/// income, i.e. after the personal allowance has been removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub tax_year: String,

    pub personal_allowance: Decimal,

    pub basic_rate: Decimal,
    pub higher_rate: Decimal,
    pub additional_rate: Decimal,
    pub higher_rate_threshold: Decimal,
    pub additional_rate_threshold: Decimal,

    /// Applied to the band BELOW `ni_threshold`.
    pub ni_rate_high: Decimal,
    /// Applied to the band ABOVE `ni_threshold`.
    pub ni_rate_low: Decimal,
    pub ni_threshold: Decimal,

    pub plan1: StudentLoanTerms,
    pub plan2: StudentLoanTerms,
}

impl Default for TaxConfig {
    /// UK 2025/26.
    fn default() -> Self {
        Self {
            tax_year: "2025/26".to_string(),
            personal_allowance: dec!(12750.00),
            basic_rate: dec!(0.20),
            higher_rate: dec!(0.40),
            additional_rate: dec!(0.45),
            higher_rate_threshold: dec!(37700.00),
            additional_rate_threshold: dec!(125140.00),
            ni_rate_high: dec!(0.08),
            ni_rate_low: dec!(0.02),
            ni_threshold: dec!(50270.00),
            plan1: StudentLoanTerms {
                threshold: dec!(26065.00),
                rate: dec!(0.09),
            },
            plan2: StudentLoanTerms {
                threshold: dec!(27295.00),
                rate: dec!(0.09),
            },
        }
    }
}

impl TaxConfig {
    /// Reads a JSON-encoded config. Decimal fields may be strings or numbers.
    pub fn load(path: &Path) -> Result<Self, TaxError> {
        let raw = std::fs::read_to_string(path).map_err(|e| TaxError::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| TaxError::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn student_loan_terms(&self, plan: StudentLoanPlan) -> &StudentLoanTerms {
        match plan {
            StudentLoanPlan::Plan1 => &self.plan1,
            StudentLoanPlan::Plan2 => &self.plan2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentLoanPlan {
    Plan1,
    Plan2,
}

impl FromStr for StudentLoanPlan {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plan1" => Ok(StudentLoanPlan::Plan1),
            "plan2" => Ok(StudentLoanPlan::Plan2),
            _ => Err(TaxError::UnknownStudentLoanPlan(s.to_string())),
        }
    }
}
