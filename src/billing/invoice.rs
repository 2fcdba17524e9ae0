//! Plan-change quotes.
//!
//! Assembles the user-facing numbers for a proposed plan change: the
//! prorated charge for an upgrade or the proportional refund for a
//! downgrade, with a line-item breakdown. Amounts are rounded to cents
//! here, at the display boundary, never inside the proration math.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    plan::SubscriptionPlan,
    pricing::PriceTable,
    proration::{calculate_downgrade_refund, calculate_upgrade_proration, round_to_cents},
    state::BillingAccount,
};
use crate::{
    currency::Currency,
    error::{CoreError, Result},
};

/// Single line item in a plan-change quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLineItem {
    /// Item description.
    pub description: String,
    /// Item amount, rounded to cents.
    pub amount: Decimal,
    /// Period start.
    pub period_start: DateTime<Utc>,
    /// Period end.
    pub period_end: DateTime<Utc>,
}

/// Quote for a proposed plan change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanChangeQuote {
    /// Charge for the new plan, prorated over the remaining cycle.
    pub charge_amount: Decimal,
    /// Credit for unused time on the current plan.
    pub credit_amount: Decimal,
    /// Net amount (charge - credit); negative means money owed back.
    pub net_amount: Decimal,
    /// When the change takes effect: now for upgrades, cycle end for
    /// downgrades.
    pub effective_date: DateTime<Utc>,
    /// Currency the amounts are denominated in (the base currency).
    pub currency: Currency,
    /// Line items breakdown.
    pub line_items: Vec<QuoteLineItem>,
}

/// Quotes a plan change for an account against a price table.
///
/// Prices are read at the account's current cycle cadence; a cadence
/// switch takes effect with the new cycle the subsequent upgrade starts.
/// Upgrades charge the prorated price delta immediately; downgrades
/// refund the unused delta at cycle end.
///
/// # Errors
///
/// Returns [`CoreError::PlanChangeError`] if the target equals the
/// account's active plan.
pub fn quote_plan_change(
    account: &BillingAccount,
    prices: &PriceTable,
    target: SubscriptionPlan,
    now: DateTime<Utc>,
) -> Result<PlanChangeQuote> {
    let current = account.plan();
    if target == current {
        return Err(CoreError::PlanChangeError(format!(
            "account is already on the {} plan",
            current.as_str()
        )));
    }

    let cadence = account.cycle().cadence;
    let current_price = prices.price(current, cadence);
    let target_price = prices.price(target, cadence);
    let days_remaining = account.days_remaining_in_cycle(now);
    let total_days = account.cycle().total_days();
    let cycle_end = account.cycle_end_date();

    if target > current {
        let charge = round_to_cents(calculate_upgrade_proration(
            target_price,
            current_price,
            days_remaining,
            total_days,
        ));
        Ok(PlanChangeQuote {
            charge_amount: charge,
            credit_amount: Decimal::ZERO,
            net_amount: charge,
            effective_date: now,
            currency: Currency::Brl,
            line_items: vec![QuoteLineItem {
                description: format!(
                    "Prorated upgrade to {} ({days_remaining} of {total_days} days)",
                    target.display_name()
                ),
                amount: charge,
                period_start: now,
                period_end: cycle_end,
            }],
        })
    } else {
        let credit = round_to_cents(calculate_downgrade_refund(
            current_price,
            target_price,
            days_remaining,
            total_days,
        ));
        Ok(PlanChangeQuote {
            charge_amount: Decimal::ZERO,
            credit_amount: credit,
            net_amount: -credit,
            effective_date: cycle_end,
            currency: Currency::Brl,
            line_items: vec![QuoteLineItem {
                description: format!(
                    "Refund for unused time on {} ({days_remaining} of {total_days} days)",
                    current.display_name()
                ),
                amount: credit,
                period_start: now,
                period_end: cycle_end,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::billing::{BillingCadence, BillingCycle, CustomerId};

    fn account_mid_cycle(plan: SubscriptionPlan, days_elapsed: i64) -> BillingAccount {
        BillingAccount::from_parts(
            CustomerId::new("cust-quote").unwrap(),
            plan,
            BillingCycle::starting_at(
                BillingCadence::Monthly,
                Utc::now() - Duration::days(days_elapsed),
            ),
            None,
        )
    }

    #[test]
    fn test_upgrade_quote_reference_scenario() {
        // Basic -> premium with 15 of 30 days remaining: $5.00 due.
        let account = account_mid_cycle(SubscriptionPlan::Basic, 15);
        let quote = quote_plan_change(
            &account,
            &PriceTable::default(),
            SubscriptionPlan::Premium,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(quote.charge_amount, Decimal::new(500, 2));
        assert_eq!(quote.credit_amount, Decimal::ZERO);
        assert_eq!(quote.net_amount, Decimal::new(500, 2));
        assert_eq!(quote.currency, Currency::Brl);
        assert_eq!(quote.line_items.len(), 1);
        assert!(quote.line_items[0].description.contains("Premium"));
    }

    #[test]
    fn test_downgrade_quote_reference_scenario() {
        // Premium -> basic with 10 of 30 days remaining: $3.33 back.
        let account = account_mid_cycle(SubscriptionPlan::Premium, 20);
        let now = Utc::now();
        let quote =
            quote_plan_change(&account, &PriceTable::default(), SubscriptionPlan::Basic, now)
                .unwrap();

        assert_eq!(quote.credit_amount, Decimal::new(333, 2));
        assert_eq!(quote.charge_amount, Decimal::ZERO);
        assert_eq!(quote.net_amount, Decimal::new(-333, 2));
        assert_eq!(quote.effective_date, account.cycle_end_date());
    }

    #[test]
    fn test_upgrade_from_free_charges_scaled_full_price() {
        let account = account_mid_cycle(SubscriptionPlan::Free, 0);
        let quote = quote_plan_change(
            &account,
            &PriceTable::default(),
            SubscriptionPlan::Premium,
            Utc::now(),
        )
        .unwrap();
        // Full cycle remaining: full premium monthly price.
        assert_eq!(quote.charge_amount, Decimal::new(2_000, 2));
    }

    #[test]
    fn test_quote_same_plan_rejected() {
        let account = account_mid_cycle(SubscriptionPlan::Basic, 5);
        let result = quote_plan_change(
            &account,
            &PriceTable::default(),
            SubscriptionPlan::Basic,
            Utc::now(),
        );
        assert!(matches!(result.unwrap_err(), CoreError::PlanChangeError(_)));
    }

    #[test]
    fn test_quote_after_cycle_end_is_zero() {
        let account = account_mid_cycle(SubscriptionPlan::Premium, 45);
        let quote = quote_plan_change(
            &account,
            &PriceTable::default(),
            SubscriptionPlan::Basic,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(quote.credit_amount, Decimal::ZERO);
        assert_eq!(quote.net_amount, Decimal::ZERO);
    }

    #[test]
    fn test_quote_serialization_round_trip() {
        let account = account_mid_cycle(SubscriptionPlan::Basic, 10);
        let quote = quote_plan_change(
            &account,
            &PriceTable::default(),
            SubscriptionPlan::Premium,
            Utc::now(),
        )
        .unwrap();
        let json = serde_json::to_string(&quote).unwrap();
        let parsed: PlanChangeQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, quote);
    }
}
