//! Personal budget planner.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly income and expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetInputs {
    /// Total monthly income.
    pub income: Decimal,
    /// Housing costs.
    pub housing: Decimal,
    /// Transportation costs.
    pub transportation: Decimal,
    /// Food and groceries.
    pub food: Decimal,
    /// Entertainment and leisure.
    pub entertainment: Decimal,
    /// Savings and investments.
    pub savings: Decimal,
    /// Everything else.
    pub other: Decimal,
}

/// Derived budget summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Sum of all expense categories.
    pub total_expenses: Decimal,
    /// Income minus total expenses; negative means overspending.
    pub remaining: Decimal,
}

/// Sums the expense categories and computes the remaining funds.
#[must_use]
pub fn summarize_budget(inputs: &BudgetInputs) -> BudgetSummary {
    let total_expenses = inputs.housing
        + inputs.transportation
        + inputs.food
        + inputs.entertainment
        + inputs.savings
        + inputs.other;
    BudgetSummary { total_expenses, remaining: inputs.income - total_expenses }
}

/// Annualizes a monthly income figure.
#[must_use]
pub fn annualize_monthly_income(monthly_income: Decimal) -> Decimal {
    monthly_income * Decimal::from(12)
}
