//! Admin financial report.
//!
//! Aggregates a census of accounts into the numbers the admin dashboard
//! shows: user counts per plan, blocked users, and estimated monthly
//! recurring revenue from the current price table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    cycle::BillingCadence,
    plan::{AccountStatus, SubscriptionPlan},
    pricing::PriceTable,
    proration::round_to_cents,
};

/// Aggregated financial snapshot for administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReport {
    /// Paying subscriptions (basic + premium).
    pub total_active_subscriptions: u32,
    /// Estimated monthly revenue at current prices, rounded to cents.
    pub monthly_revenue: Decimal,
    /// Users on the free plan.
    pub free_users: u32,
    /// Users on the basic plan.
    pub basic_users: u32,
    /// Users on the premium plan.
    pub premium_users: u32,
    /// Blocked users (any plan).
    pub blocked_users: u32,
}

/// Builds the financial report from a census of `(plan, status)` pairs.
#[must_use]
pub fn build_financial_report<I>(accounts: I, prices: &PriceTable) -> FinancialReport
where
    I: IntoIterator<Item = (SubscriptionPlan, AccountStatus)>,
{
    let mut free_users = 0u32;
    let mut basic_users = 0u32;
    let mut premium_users = 0u32;
    let mut blocked_users = 0u32;

    for (plan, status) in accounts {
        match plan {
            SubscriptionPlan::Free => free_users += 1,
            SubscriptionPlan::Basic => basic_users += 1,
            SubscriptionPlan::Premium => premium_users += 1,
        }
        if status == AccountStatus::Blocked {
            blocked_users += 1;
        }
    }

    let monthly_revenue = Decimal::from(basic_users)
        * prices.price(SubscriptionPlan::Basic, BillingCadence::Monthly)
        + Decimal::from(premium_users)
            * prices.price(SubscriptionPlan::Premium, BillingCadence::Monthly);

    FinancialReport {
        total_active_subscriptions: basic_users + premium_users,
        monthly_revenue: round_to_cents(monthly_revenue),
        free_users,
        basic_users,
        premium_users,
        blocked_users,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_and_revenue() {
        let accounts = vec![
            (SubscriptionPlan::Free, AccountStatus::Active),
            (SubscriptionPlan::Free, AccountStatus::Blocked),
            (SubscriptionPlan::Basic, AccountStatus::Active),
            (SubscriptionPlan::Basic, AccountStatus::Active),
            (SubscriptionPlan::Premium, AccountStatus::Active),
        ];
        let report = build_financial_report(accounts, &PriceTable::default());

        assert_eq!(report.free_users, 2);
        assert_eq!(report.basic_users, 2);
        assert_eq!(report.premium_users, 1);
        assert_eq!(report.blocked_users, 1);
        assert_eq!(report.total_active_subscriptions, 3);
        // 2 * 10.00 + 1 * 20.00
        assert_eq!(report.monthly_revenue, Decimal::new(4_000, 2));
    }

    #[test]
    fn test_report_empty_census() {
        let report = build_financial_report(std::iter::empty(), &PriceTable::default());
        assert_eq!(report.total_active_subscriptions, 0);
        assert_eq!(report.monthly_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_blocked_paying_user_still_counts_revenue() {
        // The census mirrors the admin dashboard: blocked is orthogonal
        // to plan counts.
        let accounts = vec![(SubscriptionPlan::Premium, AccountStatus::Blocked)];
        let report = build_financial_report(accounts, &PriceTable::default());
        assert_eq!(report.premium_users, 1);
        assert_eq!(report.blocked_users, 1);
        assert_eq!(report.monthly_revenue, Decimal::new(2_000, 2));
    }
}
