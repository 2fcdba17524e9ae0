//! Plan price table.
//!
//! Prices are stored in the base currency (BRL) per paid plan and
//! cadence. The free plan has no price by definition. Tables load from
//! TOML for deployment configuration and can be updated at runtime by an
//! administrator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{cycle::BillingCadence, plan::SubscriptionPlan};
use crate::error::{CoreError, Result};

/// Months per year, for the annual-discount comparison.
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Prices for one plan across both cadences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPrice {
    /// Price per 30-day cycle.
    pub monthly: Decimal,
    /// Price per 365-day cycle.
    pub yearly: Decimal,
}

/// Price table mapping paid plan and cadence to a base-currency price.
///
/// # Examples
///
/// ```
/// use clyro_core::billing::{BillingCadence, PriceTable, SubscriptionPlan};
/// use rust_decimal::Decimal;
///
/// let prices = PriceTable::default();
/// let premium = prices.price(SubscriptionPlan::Premium, BillingCadence::Monthly);
/// assert_eq!(premium, Decimal::new(2000, 2));
/// assert_eq!(
///     prices.price(SubscriptionPlan::Free, BillingCadence::Monthly),
///     Decimal::ZERO,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Basic plan prices.
    pub basic: PlanPrice,
    /// Premium plan prices.
    pub premium: PlanPrice,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            basic: PlanPrice { monthly: Decimal::new(1_000, 2), yearly: Decimal::new(9_840, 2) },
            premium: PlanPrice {
                monthly: Decimal::new(2_000, 2),
                yearly: Decimal::new(19_680, 2),
            },
        }
    }
}

impl PriceTable {
    /// Parses a price table from TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPriceTable`] if the TOML is malformed
    /// or the parsed table fails [`validate`](Self::validate).
    ///
    /// # Examples
    ///
    /// ```
    /// use clyro_core::billing::PriceTable;
    ///
    /// let toml = r#"
    ///     [basic]
    ///     monthly = "10.00"
    ///     yearly = "98.40"
    ///
    ///     [premium]
    ///     monthly = "20.00"
    ///     yearly = "196.80"
    /// "#;
    ///
    /// let prices = PriceTable::from_toml(toml).unwrap();
    /// assert_eq!(prices, PriceTable::default());
    /// ```
    pub fn from_toml(input: &str) -> Result<Self> {
        let table: Self = toml::from_str(input)
            .map_err(|e| CoreError::InvalidPriceTable(format!("failed to parse TOML: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Validates the price table.
    ///
    /// All prices must be positive. A yearly price at or above twelve
    /// monthly prices is unusual (the annual discount is expected) but
    /// not an error; it is logged and accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPriceTable`] if any price is zero or
    /// negative.
    pub fn validate(&self) -> Result<()> {
        let entries =
            [(SubscriptionPlan::Basic, &self.basic), (SubscriptionPlan::Premium, &self.premium)];
        for (plan, price) in entries {
            if price.monthly <= Decimal::ZERO || price.yearly <= Decimal::ZERO {
                return Err(CoreError::InvalidPriceTable(format!(
                    "{} prices must be positive",
                    plan.as_str()
                )));
            }
            if price.yearly >= price.monthly * MONTHS_PER_YEAR {
                warn!(
                    plan = plan.as_str(),
                    monthly = %price.monthly,
                    yearly = %price.yearly,
                    "yearly price carries no annual discount"
                );
            }
        }
        Ok(())
    }

    /// Returns the price for a plan at a cadence.
    ///
    /// The free plan is always zero.
    #[must_use]
    pub fn price(&self, plan: SubscriptionPlan, cadence: BillingCadence) -> Decimal {
        let plan_price = match plan {
            SubscriptionPlan::Free => return Decimal::ZERO,
            SubscriptionPlan::Basic => &self.basic,
            SubscriptionPlan::Premium => &self.premium,
        };
        match cadence {
            BillingCadence::Monthly => plan_price.monthly,
            BillingCadence::Yearly => plan_price.yearly,
        }
    }

    /// Updates one price.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPriceTable`] if the price is not
    /// positive or the target is the free plan.
    pub fn update(
        &mut self,
        plan: SubscriptionPlan,
        cadence: BillingCadence,
        price: Decimal,
    ) -> Result<()> {
        if price <= Decimal::ZERO {
            return Err(CoreError::InvalidPriceTable(format!(
                "price must be positive, got {price}"
            )));
        }
        let plan_price = match plan {
            SubscriptionPlan::Free => {
                return Err(CoreError::InvalidPriceTable("the free plan has no price".into()));
            }
            SubscriptionPlan::Basic => &mut self.basic,
            SubscriptionPlan::Premium => &mut self.premium,
        };
        match cadence {
            BillingCadence::Monthly => plan_price.monthly = price,
            BillingCadence::Yearly => plan_price.yearly = price,
        }
        Ok(())
    }

    /// Returns the effective monthly cost at a cadence (yearly prices are
    /// spread over twelve months). Unrounded.
    #[must_use]
    pub fn monthly_equivalent(&self, plan: SubscriptionPlan, cadence: BillingCadence) -> Decimal {
        match cadence {
            BillingCadence::Monthly => self.price(plan, cadence),
            BillingCadence::Yearly => self.price(plan, cadence) / MONTHS_PER_YEAR,
        }
    }

    /// Returns the yearly saving versus paying monthly, as a percentage.
    ///
    /// Zero for the free plan.
    #[must_use]
    pub fn annual_discount_percent(&self, plan: SubscriptionPlan) -> Decimal {
        let monthly_for_year = self.price(plan, BillingCadence::Monthly) * MONTHS_PER_YEAR;
        if monthly_for_year.is_zero() {
            return Decimal::ZERO;
        }
        let yearly = self.price(plan, BillingCadence::Yearly);
        (Decimal::ONE - yearly / monthly_for_year) * Decimal::ONE_HUNDRED
    }
}
