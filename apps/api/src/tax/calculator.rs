//! Tax calculator: the deterministic UK deduction cascade.
//!
//! Flow: pension → student loan → taxable income → income tax (top band first)
//!       → national insurance → net pay.
//!
//! Bands are computed from the top down: each band taxes only the span above
//! its threshold, then the running income is clamped to that threshold before
//! the next band is evaluated. A span is never taxed twice.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tax::config::{StudentLoanPlan, TaxConfig};
use crate::tax::TaxError;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Income tax split by band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeTax {
    pub basic: Decimal,
    pub higher: Decimal,
    pub additional: Decimal,
    pub total: Decimal,
}

/// Full salary breakdown. Computed once per call; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub gross_yearly: Decimal,
    pub gross_monthly: Decimal,
    pub net_yearly: Decimal,
    pub net_monthly: Decimal,
    pub income_tax: Decimal,
    pub national_insurance: Decimal,
    pub student_loan: Decimal,
    pub pension: Decimal,
    /// Percentage of gross lost to all deductions, 0 when gross is 0.
    pub effective_tax_rate: Decimal,
    pub tax_breakdown: IncomeTax,
}

impl SalaryBreakdown {
    pub fn total_deductions(&self) -> Decimal {
        self.income_tax + self.national_insurance + self.student_loan + self.pension
    }

    fn untaxed(gross: Decimal) -> Self {
        Self {
            gross_yearly: gross,
            gross_monthly: gross / MONTHS_PER_YEAR,
            net_yearly: gross,
            net_monthly: gross / MONTHS_PER_YEAR,
            income_tax: Decimal::ZERO,
            national_insurance: Decimal::ZERO,
            student_loan: Decimal::ZERO,
            pension: Decimal::ZERO,
            effective_tax_rate: Decimal::ZERO,
            tax_breakdown: IncomeTax::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Calculation
// ────────────────────────────────────────────────────────────────────────────

/// Computes take-home pay for a gross annual salary.
///
/// `pension_pct` is a fraction (0.05 = 5%). `student_loan_plan` is only
/// validated when `include_student_loan` is set.
pub fn calculate_net_salary(
    gross: Decimal,
    pension_pct: Decimal,
    include_student_loan: bool,
    student_loan_plan: &str,
    config: &TaxConfig,
) -> Result<SalaryBreakdown, TaxError> {
    if pension_pct < Decimal::ZERO || pension_pct > Decimal::ONE {
        return Err(TaxError::InvalidPensionFraction(pension_pct));
    }

    let plan = if include_student_loan {
        Some(student_loan_plan.parse::<StudentLoanPlan>()?)
    } else {
        None
    };

    if gross <= Decimal::ZERO {
        return Ok(SalaryBreakdown::untaxed(gross));
    }

    let pension = gross * pension_pct;

    let student_loan = match plan {
        Some(plan) => calculate_student_loan(gross, plan, config),
        None => Decimal::ZERO,
    };

    // May be negative when the allowance exceeds gross; the band functions clamp.
    let taxable_income = gross - config.personal_allowance - pension;

    let tax_breakdown = calculate_income_tax(taxable_income, config);
    let income_tax = tax_breakdown.total;
    let national_insurance = calculate_national_insurance(taxable_income, config);

    let total_deductions = income_tax + national_insurance + student_loan + pension;
    let net_yearly = gross - total_deductions;

    Ok(SalaryBreakdown {
        gross_yearly: gross,
        gross_monthly: gross / MONTHS_PER_YEAR,
        net_yearly,
        net_monthly: net_yearly / MONTHS_PER_YEAR,
        income_tax,
        national_insurance,
        student_loan,
        pension,
        effective_tax_rate: effective_rate(total_deductions, gross),
        tax_breakdown,
    })
}

/// Tiered marginal income tax on income that has already had the personal
/// allowance and pension removed.
pub fn calculate_income_tax(taxable_income: Decimal, config: &TaxConfig) -> IncomeTax {
    if taxable_income <= Decimal::ZERO {
        return IncomeTax::default();
    }

    let mut remaining = taxable_income;
    let mut additional = Decimal::ZERO;
    let mut higher = Decimal::ZERO;

    if remaining > config.additional_rate_threshold {
        additional = (remaining - config.additional_rate_threshold) * config.additional_rate;
        remaining = config.additional_rate_threshold;
    }

    if remaining > config.higher_rate_threshold {
        higher = (remaining - config.higher_rate_threshold) * config.higher_rate;
        remaining = config.higher_rate_threshold;
    }

    let basic = remaining * config.basic_rate;

    IncomeTax {
        basic,
        higher,
        additional,
        total: basic + higher + additional,
    }
}

/// Two-band national insurance on taxable income.
///
/// The *high* rate applies to the band below `ni_threshold`, the *low* rate to
/// everything above it.
pub fn calculate_national_insurance(income: Decimal, config: &TaxConfig) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut remaining = income;
    let mut contribution = Decimal::ZERO;

    if remaining > config.ni_threshold {
        contribution += (remaining - config.ni_threshold) * config.ni_rate_low;
        remaining = config.ni_threshold;
    }

    contribution + remaining * config.ni_rate_high
}

/// Annual repayment: `max(0, gross - threshold) * rate`.
pub fn calculate_student_loan(gross: Decimal, plan: StudentLoanPlan, config: &TaxConfig) -> Decimal {
    let terms = config.student_loan_terms(plan);
    if gross <= terms.threshold {
        return Decimal::ZERO;
    }
    (gross - terms.threshold) * terms.rate
}

fn effective_rate(total_deductions: Decimal, gross: Decimal) -> Decimal {
    if gross.is_zero() {
        return Decimal::ZERO;
    }
    total_deductions / gross * Decimal::ONE_HUNDRED
}

// ────────────────────────────────────────────────────────────────────────────
// Display
// ────────────────────────────────────────────────────────────────────────────

/// Formats a monetary value as `£12,345.67`.
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}£{grouped}.{frac}")
}

impl fmt::Display for SalaryBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Salary Breakdown:")?;
        writeln!(f, "  Gross (yearly):  {}", format_gbp(self.gross_yearly))?;
        writeln!(f, "  Gross (monthly): {}", format_gbp(self.gross_monthly))?;
        writeln!(f, "  Net (yearly):    {}", format_gbp(self.net_yearly))?;
        writeln!(f, "  Net (monthly):   {}", format_gbp(self.net_monthly))?;
        writeln!(f)?;
        writeln!(f, "Deductions:")?;
        writeln!(f, "  Income Tax:      {}", format_gbp(self.income_tax))?;
        writeln!(f, "    - Basic rate:      {}", format_gbp(self.tax_breakdown.basic))?;
        writeln!(f, "    - Higher rate:     {}", format_gbp(self.tax_breakdown.higher))?;
        writeln!(
            f,
            "    - Additional rate: {}",
            format_gbp(self.tax_breakdown.additional)
        )?;
        writeln!(f, "  National Insurance: {}", format_gbp(self.national_insurance))?;
        writeln!(f, "  Student Loan:       {}", format_gbp(self.student_loan))?;
        writeln!(f, "  Pension:            {}", format_gbp(self.pension))?;
        writeln!(f)?;
        write!(
            f,
            "Effective Tax Rate: {:.2}%",
            self.effective_tax_rate.round_dp(2)
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
