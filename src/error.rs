//! Error types for the Clyro core engines.
//!
//! This module defines all error types that can occur during billing, tax,
//! and currency operations. All errors implement the standard
//! [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Validation Errors** ([`CoreError::InvalidCustomerId`],
//!   [`CoreError::InvalidPriceTable`], [`CoreError::InvalidBracketTable`]):
//!   malformed input rejected at construction time, before any computation
//!   runs
//! - **State-Consistency Errors** ([`CoreError::PlanChangeError`]): plan
//!   transitions that violate the account state machine; the account is
//!   left untouched
//!
//! The pure numeric functions in this crate (proration, tax brackets,
//! currency conversion) never return errors for valid numeric input: they
//! saturate at zero instead of producing negative or undefined amounts.
//!
//! # Examples
//!
//! ```
//! use clyro_core::error::{CoreError, Result};
//!
//! fn validate_rate_percent(rate: i64) -> Result<i64> {
//!     if !(0..=100).contains(&rate) {
//!         return Err(CoreError::InvalidBracketTable(
//!             "rate must be between 0 and 100".to_owned(),
//!         ));
//!     }
//!     Ok(rate)
//! }
//! ```

use thiserror::Error;

/// Result type alias for Clyro core operations.
///
/// This is a convenience type that uses [`CoreError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in the Clyro core engines.
///
/// All variants include contextual information about what went wrong.
/// The error messages are designed to be user-facing and actionable.
///
/// # Error Recovery
///
/// - **Validation errors** ([`InvalidCustomerId`](Self::InvalidCustomerId),
///   [`InvalidPriceTable`](Self::InvalidPriceTable),
///   [`InvalidBracketTable`](Self::InvalidBracketTable)): fix the input or
///   configuration and retry
/// - **State errors** ([`PlanChangeError`](Self::PlanChangeError)): the
///   requested transition is invalid for the account's current plan; refresh
///   the account state before retrying
///
/// Nothing in this crate is fatal to the process: every failure degrades a
/// single operation, never the whole application.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid customer ID.
    ///
    /// This error occurs when input validation rejects a customer ID.
    /// Customer IDs must meet these requirements:
    /// - Not empty
    /// - Maximum 64 characters
    /// - Only alphanumeric characters, hyphens, and underscores
    #[error("Invalid customer ID: {0}")]
    InvalidCustomerId(String),

    /// Invalid price table configuration.
    ///
    /// This error occurs when a price table fails to parse or fails
    /// validation. Common causes include:
    /// - Malformed TOML syntax
    /// - Zero or negative plan prices
    /// - A price update targeting the free plan (which has no price)
    #[error("Invalid price table: {0}")]
    InvalidPriceTable(String),

    /// Invalid tax bracket table.
    ///
    /// This error occurs when a bracket table fails construction-time
    /// validation. Common causes include:
    /// - Empty bracket list
    /// - Thresholds that are not strictly ascending
    /// - A bounded final bracket (the last bracket must be unbounded)
    /// - Rates outside the `[0, 1]` range
    ///
    /// # Recovery
    ///
    /// Bracket tables are configuration; fix the jurisdiction definition.
    /// The tax engine assumes tables are well-formed and does not
    /// re-validate them at computation time.
    #[error("Invalid bracket table: {0}")]
    InvalidBracketTable(String),

    /// Invalid plan change.
    ///
    /// This error occurs when a plan transition violates the account state
    /// machine. Common causes include:
    /// - Upgrading to an equal or lower plan
    /// - Downgrading to an equal or higher plan
    /// - A negative refund amount
    ///
    /// The operation is a no-op: the account state is left untouched and a
    /// warning is logged.
    #[error("Invalid plan change: {0}")]
    PlanChangeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CoreError::InvalidCustomerId("user@example".into());
        assert_eq!(error.to_string(), "Invalid customer ID: user@example");
    }

    #[test]
    fn test_plan_change_error() {
        let error = CoreError::PlanChangeError("already on premium".into());
        assert!(error.to_string().contains("Invalid plan change"));
    }

    #[test]
    fn test_invalid_bracket_table_error() {
        let error = CoreError::InvalidBracketTable("thresholds must ascend".to_owned());
        assert_eq!(error.to_string(), "Invalid bracket table: thresholds must ascend");
    }
}
