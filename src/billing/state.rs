//! Subscription account state.
//!
//! [`BillingAccount`] owns a customer's plan, billing cycle, and at most
//! one pending plan change. The plan mutates only through the operations
//! here; invalid transitions are logged and rejected with the account
//! left untouched.
//!
//! Execution is single-threaded and event-driven: each operation reads
//! the in-memory state, computes, and writes back within one synchronous
//! turn. A port that introduces real concurrency must serialize access to
//! an account to preserve the one-pending-change invariant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{
    cycle::{BillingCadence, BillingCycle},
    plan::{CustomerId, SubscriptionPlan},
};
use crate::error::{CoreError, Result};

/// A plan change recorded now but settled later.
///
/// At most one pending change exists per account; recording a new one
/// overwrites the previous. A pending change is cleared when it is
/// applied or superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingPlanChange {
    /// Downgrade already applied, with a refund payable at cycle end.
    ImmediateDowngrade {
        /// Plan the account was downgraded to.
        target: SubscriptionPlan,
        /// Refund owed for the unused portion of the old plan.
        refund_amount: Decimal,
        /// When the refund becomes payable (current cycle end).
        payable_at: DateTime<Utc>,
    },
    /// Downgrade recorded now, applied by the scheduler at cycle end.
    ScheduledDowngrade {
        /// Plan to downgrade to.
        target: SubscriptionPlan,
        /// When the downgrade takes effect (current cycle end).
        effective_at: DateTime<Utc>,
    },
}

/// One customer's billing state.
///
/// # State Machine
///
/// ```text
///            upgrade (resets cycle, clears pending)
///      Free ──────────► Basic ──────────► Premium
///        ▲                ▲                  │
///        │                │   downgrade_immediately (refund at cycle end)
///        └────────────────┴──────────────────┤
///                                            │   schedule_downgrade
///                                            └──► pending until cycle end
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingAccount {
    customer_id: CustomerId,
    plan: SubscriptionPlan,
    cycle: BillingCycle,
    pending: Option<PendingPlanChange>,
}

impl BillingAccount {
    /// Creates a new free-tier account with a monthly cycle starting now.
    ///
    /// The free tier nominally has no billing obligations, but every
    /// account carries a cycle so upgrade proration always has a window
    /// to work against.
    #[must_use]
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            plan: SubscriptionPlan::Free,
            cycle: BillingCycle::starting_now(BillingCadence::Monthly),
            pending: None,
        }
    }

    /// Rehydrates an account from stored state.
    #[must_use]
    pub fn from_parts(
        customer_id: CustomerId,
        plan: SubscriptionPlan,
        cycle: BillingCycle,
        pending: Option<PendingPlanChange>,
    ) -> Self {
        Self { customer_id, plan, cycle, pending }
    }

    /// Returns the customer ID.
    #[must_use]
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the active plan.
    #[must_use]
    pub fn plan(&self) -> SubscriptionPlan {
        self.plan
    }

    /// Returns the current billing cycle.
    #[must_use]
    pub fn cycle(&self) -> &BillingCycle {
        &self.cycle
    }

    /// Returns the pending plan change, if any.
    #[must_use]
    pub fn pending_change(&self) -> Option<&PendingPlanChange> {
        self.pending.as_ref()
    }

    /// Returns the refund currently owed to the customer, if any.
    #[must_use]
    pub fn pending_refund(&self) -> Option<Decimal> {
        match self.pending {
            Some(PendingPlanChange::ImmediateDowngrade { refund_amount, .. }) => {
                Some(refund_amount)
            }
            _ => None,
        }
    }

    /// Returns the end date of the current billing cycle.
    #[must_use]
    pub fn cycle_end_date(&self) -> DateTime<Utc> {
        self.cycle.end_date()
    }

    /// Returns the days remaining in the current cycle at `now`.
    #[must_use]
    pub fn days_remaining_in_cycle(&self, now: DateTime<Utc>) -> u32 {
        self.cycle.days_remaining(now)
    }

    /// Upgrades to a higher plan immediately.
    ///
    /// Sets the active plan, restarts the billing cycle now at the given
    /// cadence, and clears any pending change.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PlanChangeError`] (and leaves the account
    /// untouched) if the target is not strictly higher than the active
    /// plan.
    #[instrument(skip(self), fields(customer_id = %self.customer_id.as_str()))]
    pub fn upgrade(&mut self, target: SubscriptionPlan, cadence: BillingCadence) -> Result<()> {
        if target <= self.plan {
            warn!(
                current = self.plan.as_str(),
                requested = target.as_str(),
                "rejected upgrade to a non-higher plan"
            );
            return Err(CoreError::PlanChangeError(format!(
                "cannot upgrade from {} to {}",
                self.plan.as_str(),
                target.as_str()
            )));
        }

        self.plan = target;
        self.cycle = BillingCycle::starting_now(cadence);
        self.pending = None;
        info!(plan = target.as_str(), "upgraded plan, new billing cycle started");
        Ok(())
    }

    /// Downgrades to a lower plan immediately, recording the refund.
    ///
    /// Sets the active plan now and records the refund as payable at the
    /// current cycle end. The cycle start is not reset. Overwrites any
    /// previously pending change.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PlanChangeError`] (and leaves the account
    /// untouched) if the target is not strictly lower than the active
    /// plan or the refund amount is negative.
    #[instrument(skip(self), fields(customer_id = %self.customer_id.as_str()))]
    pub fn downgrade_immediately(
        &mut self,
        target: SubscriptionPlan,
        refund_amount: Decimal,
    ) -> Result<()> {
        if target >= self.plan {
            warn!(
                current = self.plan.as_str(),
                requested = target.as_str(),
                "rejected downgrade to a non-lower plan"
            );
            return Err(CoreError::PlanChangeError(format!(
                "cannot downgrade from {} to {}",
                self.plan.as_str(),
                target.as_str()
            )));
        }
        if refund_amount.is_sign_negative() {
            return Err(CoreError::PlanChangeError(
                "refund amount cannot be negative".into(),
            ));
        }

        self.plan = target;
        self.pending = Some(PendingPlanChange::ImmediateDowngrade {
            target,
            refund_amount,
            payable_at: self.cycle.end_date(),
        });
        info!(
            plan = target.as_str(),
            refund = %refund_amount,
            "downgraded plan, refund payable at cycle end"
        );
        Ok(())
    }

    /// Schedules a downgrade effective at the current cycle end.
    ///
    /// The active plan is unchanged until the external scheduler calls
    /// [`apply_scheduled_downgrade`](Self::apply_scheduled_downgrade) at
    /// or after the effective date. Overwrites any previously pending
    /// change.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PlanChangeError`] (and leaves the account
    /// untouched) if the target is not strictly lower than the active
    /// plan.
    #[instrument(skip(self), fields(customer_id = %self.customer_id.as_str()))]
    pub fn schedule_downgrade(&mut self, target: SubscriptionPlan) -> Result<()> {
        if target >= self.plan {
            warn!(
                current = self.plan.as_str(),
                requested = target.as_str(),
                "rejected scheduled downgrade to a non-lower plan"
            );
            return Err(CoreError::PlanChangeError(format!(
                "cannot schedule a downgrade from {} to {}",
                self.plan.as_str(),
                target.as_str()
            )));
        }

        let effective_at = self.cycle.end_date();
        self.pending = Some(PendingPlanChange::ScheduledDowngrade { target, effective_at });
        info!(
            requested = target.as_str(),
            effective_at = %effective_at,
            "scheduled downgrade at cycle end"
        );
        Ok(())
    }

    /// Applies a due scheduled downgrade.
    ///
    /// The external scheduler calls this at or after the effective date.
    /// The plan changes and a new cycle starts at the effective date with
    /// the same cadence, since the old cycle ended there. Returns whether
    /// a downgrade was applied.
    pub fn apply_scheduled_downgrade(&mut self, now: DateTime<Utc>) -> bool {
        match self.pending {
            Some(PendingPlanChange::ScheduledDowngrade { target, effective_at })
                if now >= effective_at =>
            {
                self.plan = target;
                self.cycle = BillingCycle::starting_at(self.cycle.cadence, effective_at);
                self.pending = None;
                info!(
                    customer_id = self.customer_id.as_str(),
                    plan = target.as_str(),
                    "applied scheduled downgrade"
                );
                true
            }
            _ => false,
        }
    }

    /// Settles a due refund from an immediate downgrade.
    ///
    /// Returns the amount to pay out and clears the pending change when
    /// the refund has become payable; `None` otherwise.
    pub fn settle_refund(&mut self, now: DateTime<Utc>) -> Option<Decimal> {
        match self.pending {
            Some(PendingPlanChange::ImmediateDowngrade { refund_amount, payable_at, .. })
                if now >= payable_at =>
            {
                self.pending = None;
                info!(
                    customer_id = self.customer_id.as_str(),
                    refund = %refund_amount,
                    "settled downgrade refund"
                );
                Some(refund_amount)
            }
            _ => None,
        }
    }

    /// Assigns a plan directly, bypassing transition checks.
    ///
    /// Reserved for administrators with elevated privilege. Clears any
    /// pending change; the billing cycle is not reset.
    #[instrument(skip(self), fields(customer_id = %self.customer_id.as_str()))]
    pub fn assign_plan(&mut self, plan: SubscriptionPlan) {
        self.plan = plan;
        self.pending = None;
        info!(plan = plan.as_str(), "plan assigned by administrator");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn test_account(plan: SubscriptionPlan) -> BillingAccount {
        BillingAccount::from_parts(
            CustomerId::new("cust-test-1").unwrap(),
            plan,
            BillingCycle::starting_now(BillingCadence::Monthly),
            None,
        )
    }

    // ========================================================================
    // Upgrade Tests
    // ========================================================================

    #[test]
    fn test_upgrade_sets_plan_and_resets_cycle() {
        let mut account = test_account(SubscriptionPlan::Free);
        let old_start = account.cycle().start;

        account.upgrade(SubscriptionPlan::Premium, BillingCadence::Yearly).unwrap();

        assert_eq!(account.plan(), SubscriptionPlan::Premium);
        assert_eq!(account.cycle().cadence, BillingCadence::Yearly);
        assert!(account.cycle().start >= old_start);
        assert!(account.pending_change().is_none());
    }

    #[test]
    fn test_upgrade_clears_pending_change() {
        let mut account = test_account(SubscriptionPlan::Premium);
        account.schedule_downgrade(SubscriptionPlan::Free).unwrap();
        assert!(account.pending_change().is_some());

        // Downgrade to basic applied by the scheduler would be overridden
        // by a fresh upgrade; the pending change must not survive.
        let mut account = test_account(SubscriptionPlan::Basic);
        account.schedule_downgrade(SubscriptionPlan::Free).unwrap();
        account.upgrade(SubscriptionPlan::Premium, BillingCadence::Monthly).unwrap();
        assert!(account.pending_change().is_none());
    }

    #[test]
    fn test_upgrade_to_same_plan_rejected() {
        let mut account = test_account(SubscriptionPlan::Basic);
        let result = account.upgrade(SubscriptionPlan::Basic, BillingCadence::Monthly);
        assert!(matches!(result.unwrap_err(), CoreError::PlanChangeError(_)));
        assert_eq!(account.plan(), SubscriptionPlan::Basic);
    }

    #[test]
    fn test_upgrade_to_lower_plan_rejected_without_mutation() {
        let mut account = test_account(SubscriptionPlan::Premium);
        let cycle_before = *account.cycle();
        let result = account.upgrade(SubscriptionPlan::Basic, BillingCadence::Yearly);
        assert!(result.is_err());
        assert_eq!(account.plan(), SubscriptionPlan::Premium);
        assert_eq!(*account.cycle(), cycle_before);
    }

    // ========================================================================
    // Immediate Downgrade Tests
    // ========================================================================

    #[test]
    fn test_downgrade_immediately_sets_plan_keeps_cycle() {
        let mut account = test_account(SubscriptionPlan::Premium);
        let cycle_before = *account.cycle();

        account
            .downgrade_immediately(SubscriptionPlan::Basic, Decimal::new(333, 2))
            .unwrap();

        assert_eq!(account.plan(), SubscriptionPlan::Basic);
        assert_eq!(*account.cycle(), cycle_before);
        assert_eq!(account.pending_refund(), Some(Decimal::new(333, 2)));
    }

    #[test]
    fn test_downgrade_refund_payable_at_cycle_end() {
        let mut account = test_account(SubscriptionPlan::Premium);
        let end = account.cycle_end_date();
        account.downgrade_immediately(SubscriptionPlan::Free, Decimal::new(500, 2)).unwrap();

        match account.pending_change() {
            Some(PendingPlanChange::ImmediateDowngrade { payable_at, .. }) => {
                assert_eq!(*payable_at, end);
            }
            other => panic!("expected immediate downgrade, got {other:?}"),
        }
    }

    #[test]
    fn test_downgrade_negative_refund_rejected() {
        let mut account = test_account(SubscriptionPlan::Premium);
        let result =
            account.downgrade_immediately(SubscriptionPlan::Basic, Decimal::new(-1, 2));
        assert!(matches!(result.unwrap_err(), CoreError::PlanChangeError(_)));
        assert_eq!(account.plan(), SubscriptionPlan::Premium);
    }

    #[test]
    fn test_downgrade_to_higher_plan_rejected() {
        let mut account = test_account(SubscriptionPlan::Basic);
        let result = account.downgrade_immediately(SubscriptionPlan::Premium, Decimal::ZERO);
        assert!(result.is_err());
        assert_eq!(account.plan(), SubscriptionPlan::Basic);
        assert!(account.pending_change().is_none());
    }

    #[test]
    fn test_settle_refund_due() {
        let mut account = BillingAccount::from_parts(
            CustomerId::new("cust-test-2").unwrap(),
            SubscriptionPlan::Premium,
            BillingCycle::starting_at(
                BillingCadence::Monthly,
                Utc::now() - Duration::days(29),
            ),
            None,
        );
        account.downgrade_immediately(SubscriptionPlan::Basic, Decimal::new(100, 2)).unwrap();

        // Not due yet.
        assert_eq!(account.settle_refund(Utc::now()), None);
        assert!(account.pending_change().is_some());

        // Due after cycle end.
        let after_end = Utc::now() + Duration::days(2);
        assert_eq!(account.settle_refund(after_end), Some(Decimal::new(100, 2)));
        assert!(account.pending_change().is_none());
    }

    // ========================================================================
    // Scheduled Downgrade Tests
    // ========================================================================

    #[test]
    fn test_schedule_downgrade_keeps_active_plan() {
        let mut account = test_account(SubscriptionPlan::Premium);
        account.schedule_downgrade(SubscriptionPlan::Basic).unwrap();

        assert_eq!(account.plan(), SubscriptionPlan::Premium);
        match account.pending_change() {
            Some(PendingPlanChange::ScheduledDowngrade { target, effective_at }) => {
                assert_eq!(*target, SubscriptionPlan::Basic);
                assert_eq!(*effective_at, account.cycle_end_date());
            }
            other => panic!("expected scheduled downgrade, got {other:?}"),
        }
    }

    #[test]
    fn test_schedule_downgrade_overwrites_previous_pending() {
        let mut account = test_account(SubscriptionPlan::Premium);
        account.schedule_downgrade(SubscriptionPlan::Basic).unwrap();
        account.schedule_downgrade(SubscriptionPlan::Free).unwrap();

        match account.pending_change() {
            Some(PendingPlanChange::ScheduledDowngrade { target, .. }) => {
                assert_eq!(*target, SubscriptionPlan::Free);
            }
            other => panic!("expected scheduled downgrade, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_scheduled_downgrade_before_effective_date() {
        let mut account = test_account(SubscriptionPlan::Premium);
        account.schedule_downgrade(SubscriptionPlan::Basic).unwrap();

        assert!(!account.apply_scheduled_downgrade(Utc::now()));
        assert_eq!(account.plan(), SubscriptionPlan::Premium);
        assert!(account.pending_change().is_some());
    }

    #[test]
    fn test_apply_scheduled_downgrade_at_effective_date() {
        let mut account = BillingAccount::from_parts(
            CustomerId::new("cust-test-3").unwrap(),
            SubscriptionPlan::Premium,
            BillingCycle::starting_at(
                BillingCadence::Monthly,
                Utc::now() - Duration::days(31),
            ),
            None,
        );
        account.schedule_downgrade(SubscriptionPlan::Basic).unwrap();

        assert!(account.apply_scheduled_downgrade(Utc::now()));
        assert_eq!(account.plan(), SubscriptionPlan::Basic);
        assert!(account.pending_change().is_none());

        // Applying again is a no-op.
        assert!(!account.apply_scheduled_downgrade(Utc::now()));
    }

    #[test]
    fn test_scheduled_downgrade_starts_new_cycle_at_effective_date() {
        let start = Utc::now() - Duration::days(31);
        let mut account = BillingAccount::from_parts(
            CustomerId::new("cust-test-4").unwrap(),
            SubscriptionPlan::Premium,
            BillingCycle::starting_at(BillingCadence::Monthly, start),
            None,
        );
        let old_end = account.cycle_end_date();
        account.schedule_downgrade(SubscriptionPlan::Free).unwrap();
        account.apply_scheduled_downgrade(Utc::now());
        // The downgraded plan's cycle begins where the old one ended.
        assert_eq!(account.cycle().start, old_end);
        assert_eq!(account.cycle().cadence, BillingCadence::Monthly);
    }

    // ========================================================================
    // Invariant Tests
    // ========================================================================

    #[test]
    fn test_at_most_one_pending_change() {
        let mut account = test_account(SubscriptionPlan::Premium);
        account.schedule_downgrade(SubscriptionPlan::Basic).unwrap();
        account.downgrade_immediately(SubscriptionPlan::Basic, Decimal::ONE).unwrap();

        // The immediate downgrade superseded the scheduled one.
        assert!(matches!(
            account.pending_change(),
            Some(PendingPlanChange::ImmediateDowngrade { .. })
        ));
    }

    #[test]
    fn test_assign_plan_bypasses_checks() {
        let mut account = test_account(SubscriptionPlan::Free);
        account.schedule_downgrade(SubscriptionPlan::Free).unwrap_err();
        account.assign_plan(SubscriptionPlan::Premium);
        assert_eq!(account.plan(), SubscriptionPlan::Premium);
        assert!(account.pending_change().is_none());
    }

    #[test]
    fn test_new_account_defaults() {
        let account = BillingAccount::new(CustomerId::new("cust-new").unwrap());
        assert_eq!(account.plan(), SubscriptionPlan::Free);
        assert_eq!(account.cycle().cadence, BillingCadence::Monthly);
        assert!(account.pending_change().is_none());
        assert_eq!(account.pending_refund(), None);
    }

    // ========================================================================
    // Serialization Tests
    // ========================================================================

    #[test]
    fn test_pending_change_serialization() {
        let change = PendingPlanChange::ScheduledDowngrade {
            target: SubscriptionPlan::Basic,
            effective_at: Utc::now(),
        };
        let json = serde_json::to_string(&change).unwrap();
        assert!(json.contains("\"kind\":\"scheduled_downgrade\""));
    }

    #[test]
    fn test_account_serialization_round_trip() {
        let mut account = test_account(SubscriptionPlan::Premium);
        account.downgrade_immediately(SubscriptionPlan::Basic, Decimal::new(500, 2)).unwrap();

        let json = serde_json::to_string(&account).unwrap();
        let parsed: BillingAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, account);
    }
}
