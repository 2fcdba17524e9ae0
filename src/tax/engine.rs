//! Progressive and flat tax computation.
//!
//! Both engines take an already-clamped taxable income, walk the bracket
//! table (or apply the single flat rate), and return an ephemeral
//! [`TaxComputation`] that callers render and discard. Nothing here is
//! persisted; results are recomputed on every input change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::brackets::BracketTable;

/// One line of the per-bracket breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketLine {
    /// Income taxed within this bracket.
    pub taxable_amount: Decimal,
    /// Marginal rate applied (fraction).
    pub rate: Decimal,
    /// Tax owed within this bracket.
    pub tax: Decimal,
}

/// Result of a tax computation.
///
/// Derived, not persisted: recomputed per calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    /// Income subject to tax after deductions (never negative).
    pub taxable_income: Decimal,
    /// Total tax owed.
    pub total_tax: Decimal,
    /// Effective rate as a percentage; zero when there is no taxable income.
    pub effective_rate: Decimal,
    /// Per-bracket breakdown, in ascending bracket order. Only brackets
    /// that actually taxed income appear.
    pub breakdown: Vec<BracketLine>,
}

/// Clamps income minus deductions to zero.
///
/// Deductions exceeding income produce zero taxable income, not a
/// negative amount.
#[must_use]
pub fn taxable_income(income: Decimal, deductions: Decimal) -> Decimal {
    (income - deductions).max(Decimal::ZERO)
}

/// Computes progressive tax by walking the bracket table.
///
/// Each bracket taxes at most the slice of income between the previous
/// threshold and its own; the walk stops as soon as no income remains.
/// A negative input is clamped to zero before walking.
///
/// # Examples
///
/// ```
/// use clyro_core::tax::{compute_progressive_tax, Jurisdiction};
/// use rust_decimal::Decimal;
///
/// let table = Jurisdiction::UnitedStates.bracket_table();
/// let result = compute_progressive_tax(Decimal::from(45_400), &table);
///
/// assert_eq!(result.total_tax, Decimal::new(52_955, 1)); // 5295.50
/// assert_eq!(result.breakdown.len(), 3);
/// ```
#[must_use]
pub fn compute_progressive_tax(taxable_income: Decimal, table: &BracketTable) -> TaxComputation {
    let taxable_income = taxable_income.max(Decimal::ZERO);

    let mut total_tax = Decimal::ZERO;
    let mut remaining = taxable_income;
    let mut last_threshold = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for bracket in table.brackets() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxable_in_bracket = match bracket.up_to {
            Some(threshold) => remaining.min(threshold - last_threshold),
            None => remaining,
        };

        if taxable_in_bracket > Decimal::ZERO {
            let tax_in_bracket = taxable_in_bracket * bracket.rate;
            total_tax += tax_in_bracket;
            breakdown.push(BracketLine {
                taxable_amount: taxable_in_bracket,
                rate: bracket.rate,
                tax: tax_in_bracket,
            });
            remaining -= taxable_in_bracket;
        }

        if let Some(threshold) = bracket.up_to {
            last_threshold = threshold;
        }
    }

    TaxComputation {
        taxable_income,
        total_tax,
        effective_rate: effective_rate(total_tax, taxable_income),
        breakdown,
    }
}

/// Computes flat tax at a single percentage rate.
///
/// Produces a one-line breakdown covering the entire taxable income.
/// A negative input is clamped to zero.
#[must_use]
pub fn compute_flat_tax(taxable_income: Decimal, rate_percent: Decimal) -> TaxComputation {
    let taxable_income = taxable_income.max(Decimal::ZERO);
    let rate = rate_percent / Decimal::ONE_HUNDRED;
    let total_tax = taxable_income * rate;

    TaxComputation {
        taxable_income,
        total_tax,
        effective_rate: effective_rate(total_tax, taxable_income),
        breakdown: vec![BracketLine { taxable_amount: taxable_income, rate, tax: total_tax }],
    }
}

fn effective_rate(total_tax: Decimal, taxable_income: Decimal) -> Decimal {
    if taxable_income > Decimal::ZERO {
        total_tax / taxable_income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
