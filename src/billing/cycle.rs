//! Billing cycles.
//!
//! A cycle is the recurring window a subscription price covers. Length is
//! cadence-derived: 30 days for monthly, 365 for yearly, and the end date
//! is always `start + length`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds per day, for the ceiling computation in `days_remaining`.
const SECS_PER_DAY: i64 = 86_400;

/// Billing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCadence {
    /// 30-day cycle.
    Monthly,
    /// 365-day cycle.
    Yearly,
}

impl BillingCadence {
    /// Returns the cycle length in days.
    #[must_use]
    pub fn cycle_days(&self) -> u32 {
        match self {
            Self::Monthly => 30,
            Self::Yearly => 365,
        }
    }

    /// Returns human-readable interval description.
    #[must_use]
    pub fn interval_display(&self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }
}

/// One billing cycle: a cadence and the instant it started.
///
/// All queries are pure derivations from these two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycle {
    /// Billing cadence.
    pub cadence: BillingCadence,
    /// Instant the cycle started.
    pub start: DateTime<Utc>,
}

impl BillingCycle {
    /// Starts a new cycle now.
    #[must_use]
    pub fn starting_now(cadence: BillingCadence) -> Self {
        Self { cadence, start: Utc::now() }
    }

    /// Creates a cycle with an explicit start instant.
    #[must_use]
    pub fn starting_at(cadence: BillingCadence, start: DateTime<Utc>) -> Self {
        Self { cadence, start }
    }

    /// Returns the total number of days in this cycle.
    #[must_use]
    pub fn total_days(&self) -> u32 {
        self.cadence.cycle_days()
    }

    /// Returns the cycle end: `start + length`.
    #[must_use]
    pub fn end_date(&self) -> DateTime<Utc> {
        self.start + Duration::days(i64::from(self.total_days()))
    }

    /// Returns the number of days remaining at `now`, rounded up.
    ///
    /// Clamped to `[0, total_days]`: past the end the cycle has zero days
    /// left, and an instant before the start counts as a full cycle.
    #[must_use]
    pub fn days_remaining(&self, now: DateTime<Utc>) -> u32 {
        let secs = self.end_date().signed_duration_since(now).num_seconds();
        if secs <= 0 {
            return 0;
        }
        let days = (secs + SECS_PER_DAY - 1) / SECS_PER_DAY;
        u32::try_from(days).unwrap_or(u32::MAX).min(self.total_days())
    }

    /// Returns whether the cycle has ended at `now`.
    #[must_use]
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_date()
    }
}
