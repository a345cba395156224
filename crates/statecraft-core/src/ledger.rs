//! Budget, debt, and interest-rate bookkeeping.
//!
//! All amounts are in billion euro, held as [`Decimal`] so settlement
//! arithmetic is exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base interest rate in percent.
fn base_rate() -> Decimal {
    Decimal::new(3, 0)
}

/// The government's annual budget, accumulated debt, and interest rate.
///
/// `debt` is zero or negative; costs exceeding the available budget are
/// pushed onto it. `budget` resets to `annual_budget` on year rollover.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub budget: Decimal,
    pub annual_budget: Decimal,
    pub debt: Decimal,
    pub interest_rate: Decimal,
}

impl Ledger {
    pub fn new(annual_budget: Decimal) -> Self {
        Self {
            budget: annual_budget,
            annual_budget,
            debt: Decimal::ZERO,
            interest_rate: base_rate(),
        }
    }

    /// Settles a cost: debit the budget while it lasts, move any
    /// shortfall onto the debt (which grows more negative).
    pub fn settle(&mut self, cost: Decimal) {
        if cost <= Decimal::ZERO {
            return;
        }
        if self.budget >= cost {
            self.budget -= cost;
        } else {
            let shortfall = cost - self.budget;
            self.budget = Decimal::ZERO;
            self.debt -= shortfall;
        }
    }

    /// Interest rate as a deterministic function of |debt|:
    /// 3.0 % base plus 0.3 % per 100 bn of debt.
    pub fn recompute_interest(&mut self) {
        self.interest_rate =
            base_rate() + self.debt.abs() / Decimal::new(100, 0) * Decimal::new(3, 1);
    }

    /// Year rollover: the budget refills, debt and rate carry over.
    pub fn rollover_year(&mut self) {
        self.budget = self.annual_budget;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Ledger {
        Ledger::new(Decimal::new(25, 0))
    }

    #[test]
    fn exact_budget_leaves_no_debt() {
        let mut l = ledger();
        l.settle(Decimal::new(25, 0));
        l.recompute_interest();
        assert_eq!(l.budget, Decimal::ZERO);
        assert_eq!(l.debt, Decimal::ZERO);
        assert_eq!(l.interest_rate, Decimal::new(3, 0));
    }

    #[test]
    fn shortfall_moves_onto_debt() {
        let mut l = ledger();
        l.budget = Decimal::new(10, 0);
        l.settle(Decimal::new(25, 0));
        l.recompute_interest();
        assert_eq!(l.budget, Decimal::ZERO);
        assert_eq!(l.debt, Decimal::new(-15, 0));
        // 3.0 + 15/100 * 0.3 = 3.045, exactly.
        assert_eq!(l.interest_rate, Decimal::new(3045, 3));
    }

    #[test]
    fn zero_cost_is_a_noop() {
        let mut l = ledger();
        l.settle(Decimal::ZERO);
        assert_eq!(l.budget, Decimal::new(25, 0));
    }

    #[test]
    fn rollover_refills_budget_keeps_debt() {
        let mut l = ledger();
        l.settle(Decimal::new(40, 0));
        assert_eq!(l.debt, Decimal::new(-15, 0));
        l.rollover_year();
        assert_eq!(l.budget, Decimal::new(25, 0));
        assert_eq!(l.debt, Decimal::new(-15, 0));
    }
}
