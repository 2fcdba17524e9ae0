//! Tax calculation for the Clyro platform.
//!
//! This module provides validated progressive bracket tables per
//! jurisdiction and the engines that compute progressive or flat tax
//! liabilities with a per-bracket breakdown.

pub mod brackets;
pub mod engine;

pub use brackets::{BracketTable, Jurisdiction, TaxBracket};
pub use engine::{
    compute_flat_tax, compute_progressive_tax, taxable_income, BracketLine, TaxComputation,
};
