//! Subscription plans and customer identity.
//!
//! Plans form a total order by entitlement level: Free < Basic < Premium.
//! Every user holds exactly one active plan at a time.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Subscription plan, ordered by entitlement level.
///
/// The derived ordering follows declaration order, so plan comparisons
/// decide whether a change is an upgrade or a downgrade.
///
/// # Examples
///
/// ```
/// use clyro_core::billing::SubscriptionPlan;
///
/// assert!(SubscriptionPlan::Premium > SubscriptionPlan::Basic);
/// assert!(SubscriptionPlan::Basic > SubscriptionPlan::Free);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Free tier. Has no price and nominally no billing obligations.
    #[default]
    Free,
    /// Basic paid tier.
    Basic,
    /// Premium paid tier.
    Premium,
}

impl SubscriptionPlan {
    /// Parses a plan from its string form (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(Self::Free),
            "basic" => Some(Self::Basic),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    /// Returns the snake_case string form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }

    /// Returns a human-readable display name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Basic => "Basic",
            Self::Premium => "Premium",
        }
    }

    /// Returns whether this is a paid plan.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        !matches!(self, Self::Free)
    }
}

/// Unique identifier for a customer.
///
/// Wraps an externally provided ID with type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a new customer ID after validation.
    ///
    /// # Errors
    ///
    /// Returns error if ID is empty, exceeds 64 characters, or contains
    /// invalid characters. Only alphanumeric characters, hyphens, and
    /// underscores are allowed.
    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::InvalidCustomerId("customer_id cannot be empty".into()));
        }
        if id.len() > 64 {
            return Err(CoreError::InvalidCustomerId(
                "customer_id must be 64 characters or less".into(),
            ));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(CoreError::InvalidCustomerId(
                "customer_id can only contain alphanumeric characters, hyphens, and underscores"
                    .into(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Account standing, used by the admin census.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account in good standing.
    Active,
    /// Account blocked by an administrator.
    Blocked,
}
