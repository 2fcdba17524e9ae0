//! Clyro Core: Billing, Tax, and Currency Engines
//!
//! A Rust library providing the computation engines behind the Clyro
//! financial-management platform: subscription billing with mid-cycle
//! proration, progressive and flat tax calculation, currency conversion
//! over consistent rate snapshots, financial calculators, and
//! recurring-task scheduling.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  Frontend / Server  │  renders results, owns persistence & timers
//! └──────────┬──────────┘
//!            │ plain function calls
//! ┌──────────▼──────────────────────────────────────┐
//! │            clyro-core (this crate)              │
//! │  ┌────────────┐   ┌───────────┐   ┌──────────┐  │
//! │  │  billing   │───│ proration │   │   tax    │  │
//! │  │ (accounts, │   │  (pure    │   │ (bracket │  │
//! │  │  pricing)  │   │   math)   │   │  engine) │  │
//! │  └─────┬──────┘   └───────────┘   └──────────┘  │
//! │        │        ┌──────────┐   ┌───────┐        │
//! │        └────────│ currency │   │ tasks │        │
//! │                 │(snapshots)│  │       │        │
//! │                 └──────────┘   └───────┘        │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Execution is single-threaded and event-driven: every operation reads
//! in-memory state, computes, and writes back within one synchronous
//! turn. There are no locks; a server port introducing concurrency must
//! serialize access to each account.
//!
//! # Quick Start
//!
//! ## 1. Upgrade a Plan with Proration
//!
//! ```
//! use chrono::Utc;
//! use clyro_core::billing::{
//!     quote_plan_change, BillingAccount, BillingCadence, CustomerId, PriceTable,
//!     SubscriptionPlan,
//! };
//!
//! # fn example() -> clyro_core::error::Result<()> {
//! let prices = PriceTable::default();
//! let mut account = BillingAccount::new(CustomerId::new("user-123")?);
//!
//! // Preview what the upgrade costs for the rest of the cycle.
//! let quote = quote_plan_change(&account, &prices, SubscriptionPlan::Premium, Utc::now())?;
//! println!("due now: {}", quote.charge_amount);
//!
//! // Apply it: the plan changes and a fresh cycle starts.
//! account.upgrade(SubscriptionPlan::Premium, BillingCadence::Monthly)?;
//! assert_eq!(account.plan(), SubscriptionPlan::Premium);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## 2. Compute Progressive Tax
//!
//! ```
//! use clyro_core::tax::{compute_progressive_tax, taxable_income, Jurisdiction};
//! use rust_decimal::Decimal;
//!
//! let taxable = taxable_income(Decimal::from(60_000), Decimal::from(14_600));
//! let table = Jurisdiction::UnitedStates.bracket_table();
//! let result = compute_progressive_tax(taxable, &table);
//!
//! assert_eq!(result.total_tax, Decimal::new(52_955, 1)); // 5295.50
//! for line in &result.breakdown {
//!     println!("{} taxed at {}: {}", line.taxable_amount, line.rate, line.tax);
//! }
//! ```
//!
//! ## 3. Convert Through a Rate Snapshot
//!
//! ```
//! use clyro_core::currency::{Currency, RateTable};
//! use rust_decimal::Decimal;
//!
//! let table = RateTable::new();
//! // One snapshot per computation: no call can straddle a rate refresh.
//! let rates = table.snapshot();
//! let in_usd = rates.convert(Decimal::from(100), Currency::Brl, Currency::Usd);
//! let back = rates.convert(in_usd, Currency::Usd, Currency::Brl);
//! assert!((Decimal::from(100) - back).abs() < Decimal::new(1, 6));
//! ```
//!
//! # Module Organization
//!
//! - [`billing`]: plans, cycles, price table, proration, quotes, reports
//! - [`currency`]: rate tables, snapshots, fiat and crypto conversion
//! - [`tax`]: jurisdiction bracket tables, progressive and flat engines
//! - [`tools`]: profitability, budget, and investment calculators
//! - [`tasks`]: recurring tasks and due-date advancement
//! - [`error`]: error types
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, CoreError>`](error::Result).
//! Validation failures are rejected at construction; invalid plan
//! transitions are logged and leave the account untouched. The pure
//! numeric functions never error for valid input — they saturate at zero
//! rather than produce negative or undefined amounts.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod billing;
pub mod currency;
pub mod error;
pub mod tasks;
pub mod tax;
pub mod tools;

pub use billing::{BillingAccount, PriceTable, SubscriptionPlan};
pub use error::{CoreError, Result};
