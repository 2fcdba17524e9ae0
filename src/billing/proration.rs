//! Proration and refund calculation.
//!
//! Provides pure helpers for calculating prorated charges on upgrade and
//! proportional refunds on downgrade, based on days remaining in the
//! billing cycle. Results are unrounded; callers round to cents with
//! [`round_to_cents`] at the point of display or storage so repeated
//! calls never compound rounding error.

use rust_decimal::{Decimal, RoundingStrategy};

/// Installments allowed on a card before the brand surcharge applies.
pub const MAX_INSTALLMENTS_WITHOUT_FEE: u32 = 3;

/// Card-brand surcharge rate for long installment plans (2.99%).
const CARD_FEE_RATE: Decimal = Decimal::from_parts(299, 0, 0, false, 4);

/// Rounds a monetary amount to 2 decimal places using half-up rounding.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates the prorated charge for an upgrade mid-cycle.
///
/// Charges only the price delta, scaled by the unused fraction of the
/// current cycle: `(new_price - old_price) / total_days * days_remaining`.
/// Never negative; zero when the cycle has zero total days or the new
/// plan is not more expensive.
///
/// # Examples
///
/// ```
/// use clyro_core::billing::calculate_upgrade_proration;
/// use rust_decimal::Decimal;
///
/// // Basic ($10/mo) to premium ($20/mo) with 15 of 30 days remaining.
/// let due = calculate_upgrade_proration(
///     Decimal::new(2000, 2),
///     Decimal::new(1000, 2),
///     15,
///     30,
/// );
/// assert_eq!(due, Decimal::new(500, 2)); // $5.00
/// ```
#[must_use]
pub fn calculate_upgrade_proration(
    new_price: Decimal,
    old_price: Decimal,
    days_remaining: u32,
    total_days_in_cycle: u32,
) -> Decimal {
    prorate_delta(new_price - old_price, days_remaining, total_days_in_cycle)
}

/// Calculates the proportional refund for a downgrade mid-cycle.
///
/// Refunds the price delta scaled by the unused fraction of the current
/// cycle: `(old_price - new_price) / total_days * days_remaining`. Never
/// negative; zero when the cycle has zero total days or the new plan is
/// not cheaper.
#[must_use]
pub fn calculate_downgrade_refund(
    old_price: Decimal,
    new_price: Decimal,
    days_remaining: u32,
    total_days_in_cycle: u32,
) -> Decimal {
    prorate_delta(old_price - new_price, days_remaining, total_days_in_cycle)
}

/// Scales a price delta by the unused fraction of the cycle, saturating
/// at zero for non-positive deltas.
fn prorate_delta(delta: Decimal, days_remaining: u32, total_days_in_cycle: u32) -> Decimal {
    if total_days_in_cycle == 0 || delta <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let proration_factor =
        Decimal::from(days_remaining) / Decimal::from(total_days_in_cycle);
    delta.checked_mul(proration_factor).unwrap_or(Decimal::MAX).max(Decimal::ZERO)
}

/// Calculates the card-brand surcharge for an installment plan.
///
/// Up to [`MAX_INSTALLMENTS_WITHOUT_FEE`] installments are free; beyond
/// that the surcharge is 2.99% of the amount, rounded to cents.
#[must_use]
pub fn installment_surcharge(amount: Decimal, installments: u32) -> Decimal {
    if installments <= MAX_INSTALLMENTS_WITHOUT_FEE {
        return Decimal::ZERO;
    }
    round_to_cents(amount * CARD_FEE_RATE)
}

/// Returns the total to charge on a card for the given installment count.
#[must_use]
pub fn amount_with_card_fee(amount: Decimal, installments: u32) -> Decimal {
    round_to_cents(amount + installment_surcharge(amount, installments))
}
