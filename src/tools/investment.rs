//! Investment return projection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::round_to_cents;

/// Longest supported projection horizon.
const MAX_PROJECTION_YEARS: u32 = 100;

/// Investment plan to project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentInputs {
    /// Initial lump-sum investment.
    pub initial: Decimal,
    /// Contribution added at the end of each month.
    pub monthly_contribution: Decimal,
    /// Annual interest rate as a percentage (7 = 7%).
    pub annual_rate_percent: Decimal,
    /// Projection horizon in years (capped at 100).
    pub years: u32,
}

/// Projected outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentProjection {
    /// Projected value at the end of the horizon, rounded to cents.
    pub future_value: Decimal,
    /// Principal paid in over the horizon.
    pub total_contributions: Decimal,
    /// Future value minus contributions.
    pub total_interest: Decimal,
}

/// Projects compound growth with monthly contributions.
///
/// Interest compounds monthly at `annual_rate_percent / 12`; each
/// contribution lands after that month's compounding, matching the
/// end-of-month annuity formula.
#[must_use]
pub fn project_investment(inputs: &InvestmentInputs) -> InvestmentProjection {
    let months = inputs.years.min(MAX_PROJECTION_YEARS) * 12;
    let monthly_rate =
        inputs.annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(12);
    let growth = Decimal::ONE + monthly_rate;

    let mut future_value = inputs.initial;
    for _ in 0..months {
        future_value = future_value * growth + inputs.monthly_contribution;
    }

    let total_contributions =
        inputs.initial + inputs.monthly_contribution * Decimal::from(months);
    let future_value = round_to_cents(future_value);

    InvestmentProjection {
        future_value,
        total_contributions,
        total_interest: future_value - total_contributions,
    }
}
