//! Subscription billing for the Clyro platform.
//!
//! This module provides plan and cycle state, the price table, pure
//! proration math, plan-change quotes, and the admin revenue report.
//!
//! Plan state mutates only through [`BillingAccount`]'s operations:
//! upgrades apply immediately and restart the billing cycle, downgrades
//! either apply immediately with a refund payable at cycle end or are
//! scheduled for the cycle boundary. At most one pending change exists
//! per account at a time.

pub mod cycle;
pub mod invoice;
pub mod plan;
pub mod pricing;
pub mod proration;
pub mod report;
pub mod state;

pub use cycle::{BillingCadence, BillingCycle};
pub use invoice::{quote_plan_change, PlanChangeQuote, QuoteLineItem};
pub use plan::{AccountStatus, CustomerId, SubscriptionPlan};
pub use pricing::{PlanPrice, PriceTable};
pub use proration::{
    amount_with_card_fee, calculate_downgrade_refund, calculate_upgrade_proration,
    installment_surcharge, round_to_cents, MAX_INSTALLMENTS_WITHOUT_FEE,
};
pub use report::{build_financial_report, FinancialReport};
pub use state::{BillingAccount, PendingPlanChange};
