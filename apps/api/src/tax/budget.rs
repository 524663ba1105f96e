//! 50/30/20 monthly budget allocation. Pure function over a fixed table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tax::calculator::format_gbp;

/// (category, category percent, [(item, item percent)]). Percentages are of
/// monthly net income; item percentages sum to their category percentage.
const BUDGET_TABLE: &[(&str, u32, &[(&str, u32)])] = &[
    (
        "Essentials",
        50,
        &[
            ("Rent", 35),
            ("Bills", 5),
            ("Groceries", 7),
            ("Phone", 1),
            ("Medical", 1),
            ("Gym", 1),
        ],
    ),
    ("Savings", 20, &[("Savings", 10), ("Investments", 10)]),
    (
        "Spending",
        30,
        &[
            ("Eating Out", 5),
            ("Pub", 5),
            ("Flowers", 5),
            ("Clothes", 5),
            ("Skincare", 5),
            ("Vitamins", 5),
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub name: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub total: Decimal,
    pub percentage: Decimal,
    pub items: Vec<BudgetItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    pub income: Decimal,
    pub categories: Vec<BudgetCategory>,
    pub leftover: Decimal,
}

impl BudgetRecommendation {
    pub fn category(&self, name: &str) -> Option<&BudgetCategory> {
        self.categories.iter().find(|c| c.name == name)
    }
}

fn fraction(percent: u32) -> Decimal {
    Decimal::new(percent as i64, 2)
}

/// Splits net monthly income across the fixed category/item table.
///
/// Percentages are recomputed from the allocated amounts; a zero income
/// yields zero amounts and zero percentages rather than dividing by zero.
pub fn recommend_budget(monthly_income: Decimal) -> BudgetRecommendation {
    let percentage_of = |amount: Decimal| {
        if monthly_income.is_zero() {
            Decimal::ZERO
        } else {
            amount / monthly_income * Decimal::ONE_HUNDRED
        }
    };

    let categories: Vec<BudgetCategory> = BUDGET_TABLE
        .iter()
        .map(|(name, percent, items)| {
            let total = monthly_income * fraction(*percent);
            BudgetCategory {
                name: name.to_string(),
                total,
                percentage: percentage_of(total),
                items: items
                    .iter()
                    .map(|(item, item_percent)| {
                        let amount = monthly_income * fraction(*item_percent);
                        BudgetItem {
                            name: item.to_string(),
                            amount,
                            percentage: percentage_of(amount),
                        }
                    })
                    .collect(),
            }
        })
        .collect();

    let budgeted: Decimal = categories.iter().map(|c| c.total).sum();

    BudgetRecommendation {
        income: monthly_income,
        leftover: monthly_income - budgeted,
        categories,
    }
}

/// Renders the budget tree as plain text.
pub fn format_budget(budget: &BudgetRecommendation) -> String {
    let mut lines = vec![format!("Monthly Income: {}\n", format_gbp(budget.income))];

    for category in &budget.categories {
        lines.push(format!(
            "|___ {}: {} ({:.2}%)",
            category.name,
            format_gbp(category.total),
            category.percentage.round_dp(2)
        ));
        for item in &category.items {
            lines.push(format!(
                "    |___ {}: {} ({:.2}%)",
                item.name,
                format_gbp(item.amount),
                item.percentage.round_dp(2)
            ));
        }
    }

    lines.push(format!("\nLeftover: {}", format_gbp(budget.leftover)));
    lines.join("\n")
}
