//! Progressive tax bracket tables.
//!
//! A bracket table partitions income space from zero upward with no gaps:
//! each bracket taxes the slice of income between the previous threshold
//! and its own, and the final bracket is unbounded. Tables are validated
//! at construction so the engine can walk them without re-checking.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// One marginal tax bracket.
///
/// `rate` is a fraction in `[0, 1]`; `up_to` is the cumulative income
/// threshold where the bracket ends, or `None` for the unbounded final
/// bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Marginal rate as a fraction (0.22 = 22%).
    pub rate: Decimal,
    /// Cumulative income where this bracket ends (None = unbounded).
    pub up_to: Option<Decimal>,
}

impl TaxBracket {
    /// Creates a bounded bracket.
    #[must_use]
    pub fn bounded(rate: Decimal, up_to: Decimal) -> Self {
        Self { rate, up_to: Some(up_to) }
    }

    /// Creates the unbounded final bracket.
    #[must_use]
    pub fn unbounded(rate: Decimal) -> Self {
        Self { rate, up_to: None }
    }
}

/// Validated, ascending sequence of tax brackets for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Creates a bracket table after validation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBracketTable`] if:
    /// - the bracket list is empty
    /// - any rate is outside `[0, 1]`
    /// - a non-final bracket is unbounded, or the final bracket is bounded
    /// - thresholds are not strictly ascending starting above zero
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self> {
        if brackets.is_empty() {
            return Err(CoreError::InvalidBracketTable("bracket list cannot be empty".into()));
        }

        let mut last_threshold = Decimal::ZERO;
        let final_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(CoreError::InvalidBracketTable(format!(
                    "rate {} at bracket {index} must be a fraction between 0 and 1",
                    bracket.rate
                )));
            }
            match bracket.up_to {
                Some(threshold) if index == final_index => {
                    return Err(CoreError::InvalidBracketTable(format!(
                        "final bracket must be unbounded, found threshold {threshold}"
                    )));
                }
                Some(threshold) => {
                    if threshold <= last_threshold {
                        return Err(CoreError::InvalidBracketTable(format!(
                            "threshold {threshold} at bracket {index} must exceed {last_threshold}"
                        )));
                    }
                    last_threshold = threshold;
                }
                None => {
                    if index != final_index {
                        return Err(CoreError::InvalidBracketTable(format!(
                            "only the final bracket may be unbounded, bracket {index} is not last"
                        )));
                    }
                }
            }
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets in ascending threshold order.
    #[must_use]
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the top marginal rate.
    #[must_use]
    pub fn top_rate(&self) -> Decimal {
        self.brackets.last().map_or(Decimal::ZERO, |b| b.rate)
    }
}

/// Jurisdictions with built-in bracket tables.
///
/// Thresholds are denominated in USD; callers working in another currency
/// convert through a single rate snapshot before and after computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// United States federal brackets (single filer).
    UnitedStates,
    /// Brazil IRPF brackets.
    Brazil,
    /// Spain IRPF general scale.
    Spain,
}

impl Jurisdiction {
    /// Returns the progressive bracket table for this jurisdiction.
    #[must_use]
    pub fn bracket_table(&self) -> BracketTable {
        let brackets = match self {
            Self::UnitedStates => vec![
                TaxBracket::bounded(Decimal::new(10, 2), Decimal::from(11_000)),
                TaxBracket::bounded(Decimal::new(12, 2), Decimal::from(44_725)),
                TaxBracket::bounded(Decimal::new(22, 2), Decimal::from(95_375)),
                TaxBracket::bounded(Decimal::new(24, 2), Decimal::from(182_100)),
                TaxBracket::bounded(Decimal::new(32, 2), Decimal::from(231_250)),
                TaxBracket::bounded(Decimal::new(35, 2), Decimal::from(578_125)),
                TaxBracket::unbounded(Decimal::new(37, 2)),
            ],
            Self::Brazil => vec![
                TaxBracket::bounded(Decimal::ZERO, Decimal::from(4_628)),
                TaxBracket::bounded(Decimal::new(75, 3), Decimal::from(6_222)),
                TaxBracket::bounded(Decimal::new(15, 2), Decimal::from(8_259)),
                TaxBracket::bounded(Decimal::new(225, 3), Decimal::from(10_271)),
                TaxBracket::unbounded(Decimal::new(275, 3)),
            ],
            Self::Spain => vec![
                TaxBracket::bounded(Decimal::new(19, 2), Decimal::from(13_387)),
                TaxBracket::bounded(Decimal::new(24, 2), Decimal::from(21_720)),
                TaxBracket::bounded(Decimal::new(30, 2), Decimal::from(37_849)),
                TaxBracket::bounded(Decimal::new(37, 2), Decimal::from(64_516)),
                TaxBracket::bounded(Decimal::new(45, 2), Decimal::from(322_580)),
                TaxBracket::unbounded(Decimal::new(47, 2)),
            ],
        };
        // Built-in tables satisfy every construction invariant.
        BracketTable { brackets }
    }

    /// Parses a jurisdiction from its string form (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "unitedstates" | "usa" | "us" => Some(Self::UnitedStates),
            "brazil" | "br" => Some(Self::Brazil),
            "spain" | "es" => Some(Self::Spain),
            _ => None,
        }
    }

    /// Returns the snake_case string form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnitedStates => "united_states",
            Self::Brazil => "brazil",
            Self::Spain => "spain",
        }
    }
}
