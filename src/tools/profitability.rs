//! Business profitability analysis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly business figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitabilityInputs {
    /// Total monthly revenue.
    pub revenue: Decimal,
    /// Cost of goods sold.
    pub cogs: Decimal,
    /// Monthly operating expenses.
    pub expenses: Decimal,
}

/// Derived profitability figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitabilityAnalysis {
    /// Revenue minus cost of goods sold.
    pub gross_profit: Decimal,
    /// Gross profit minus operating expenses.
    pub operating_profit: Decimal,
    /// Operating profit over revenue, as a percentage; zero when there is
    /// no revenue.
    pub net_profit_margin: Decimal,
}

/// Computes gross profit, operating profit, and net margin.
#[must_use]
pub fn analyze_profitability(inputs: &ProfitabilityInputs) -> ProfitabilityAnalysis {
    let gross_profit = inputs.revenue - inputs.cogs;
    let operating_profit = gross_profit - inputs.expenses;
    let net_profit_margin = if inputs.revenue > Decimal::ZERO {
        operating_profit / inputs.revenue * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    ProfitabilityAnalysis { gross_profit, operating_profit, net_profit_margin }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profitability_analysis() {
        let analysis = analyze_profitability(&ProfitabilityInputs {
            revenue: Decimal::from(10_000),
            cogs: Decimal::from(4_000),
            expenses: Decimal::from(2_500),
        });
        assert_eq!(analysis.gross_profit, Decimal::from(6_000));
        assert_eq!(analysis.operating_profit, Decimal::from(3_500));
        assert_eq!(analysis.net_profit_margin, Decimal::from(35));
    }

    #[test]
    fn test_zero_revenue_has_zero_margin() {
        let analysis = analyze_profitability(&ProfitabilityInputs {
            revenue: Decimal::ZERO,
            cogs: Decimal::from(100),
            expenses: Decimal::from(50),
        });
        assert_eq!(analysis.net_profit_margin, Decimal::ZERO);
        assert_eq!(analysis.operating_profit, Decimal::from(-150));
    }

    #[test]
    fn test_loss_making_business_has_negative_margin() {
        let analysis = analyze_profitability(&ProfitabilityInputs {
            revenue: Decimal::from(1_000),
            cogs: Decimal::from(800),
            expenses: Decimal::from(400),
        });
        assert_eq!(analysis.net_profit_margin, Decimal::from(-20));
    }
}
