//! Axum route handlers for the salary and budget endpoints.

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tax::budget::{format_budget, recommend_budget, BudgetRecommendation};
use crate::tax::calculator::{calculate_net_salary, SalaryBreakdown};

fn default_pension_pct() -> Decimal {
    dec!(0.05)
}

fn default_include_student_loan() -> bool {
    true
}

fn default_plan() -> String {
    "plan1".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SalaryCalculationRequest {
    pub gross_yearly: Decimal,
    #[serde(default = "default_pension_pct")]
    pub pension_pct: Decimal,
    #[serde(default = "default_include_student_loan")]
    pub include_student_loan: bool,
    #[serde(default = "default_plan")]
    pub student_loan_plan: String,
}

#[derive(Debug, Serialize)]
pub struct SalaryCalculationResponse {
    pub tax_year: String,
    #[serde(flatten)]
    pub breakdown: SalaryBreakdown,
    pub budget_recommendation: BudgetRecommendation,
}

#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub monthly_income: Decimal,
}

/// POST /calculate-salary
///
/// Net pay breakdown plus a budget split of the resulting monthly net income.
pub async fn handle_calculate_salary(
    State(state): State<AppState>,
    Json(request): Json<SalaryCalculationRequest>,
) -> Result<Json<SalaryCalculationResponse>, AppError> {
    let breakdown = calculate_net_salary(
        request.gross_yearly,
        request.pension_pct,
        request.include_student_loan,
        &request.student_loan_plan,
        &state.tax_config,
    )?;

    debug!("Salary breakdown:\n{breakdown}");
    let budget_recommendation = recommend_budget(breakdown.net_monthly);

    Ok(Json(SalaryCalculationResponse {
        tax_year: state.tax_config.tax_year.clone(),
        breakdown,
        budget_recommendation,
    }))
}

/// POST /budget
pub async fn handle_budget(
    Json(request): Json<BudgetRequest>,
) -> Result<Json<BudgetRecommendation>, AppError> {
    if request.monthly_income.is_sign_negative() && !request.monthly_income.is_zero() {
        return Err(AppError::Validation(
            "monthly_income cannot be negative".to_string(),
        ));
    }
    let budget = recommend_budget(request.monthly_income);
    debug!("Budget recommendation:\n{}", format_budget(&budget));
    Ok(Json(budget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_request_defaults() {
        let request: SalaryCalculationRequest =
            serde_json::from_str(r#"{"gross_yearly": 50000}"#).unwrap();
        assert_eq!(request.gross_yearly, dec!(50000));
        assert_eq!(request.pension_pct, dec!(0.05));
        assert!(request.include_student_loan);
        assert_eq!(request.student_loan_plan, "plan1");
    }

    #[test]
    fn test_salary_request_accepts_string_decimals() {
        let request: SalaryCalculationRequest = serde_json::from_str(
            r#"{"gross_yearly": "65000.50", "pension_pct": "0.08", "student_loan_plan": "plan2"}"#,
        )
        .unwrap();
        assert_eq!(request.gross_yearly, dec!(65000.50));
        assert_eq!(request.pension_pct, dec!(0.08));
        assert_eq!(request.student_loan_plan, "plan2");
    }

    #[tokio::test]
    async fn test_negative_budget_income_rejected() {
        let result = handle_budget(Json(BudgetRequest {
            monthly_income: dec!(-10),
        }))
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
