//! Financial calculators.
//!
//! Small, pure calculators backing the platform's "smart tools": business
//! profitability, personal budget, and investment projection. Each takes
//! a plain input struct and returns a derived result that is rendered and
//! discarded.

pub mod budget;
pub mod investment;
pub mod profitability;

pub use budget::{annualize_monthly_income, summarize_budget, BudgetInputs, BudgetSummary};
pub use investment::{project_investment, InvestmentInputs, InvestmentProjection};
pub use profitability::{analyze_profitability, ProfitabilityAnalysis, ProfitabilityInputs};
