use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-instrument realized prices, one entry per simulated day.
pub type PriceHistory = BTreeMap<String, Vec<f64>>;

/// Per-instrument signed daily quantities (positive buys, negative sells).
pub type SaleHistory = BTreeMap<String, Vec<i64>>;

/// Decision for one instrument on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy(u64),
    Sell(u64),
    Hold,
}

impl TradeAction {
    pub fn from_signed(quantity: i64) -> Self {
        match quantity {
            q if q > 0 => TradeAction::Buy(q as u64),
            q if q < 0 => TradeAction::Sell(q.unsigned_abs()),
            _ => TradeAction::Hold,
        }
    }

    /// Signed quantity: positive for buys, negative for sells.
    pub fn signed(&self) -> i64 {
        match *self {
            TradeAction::Buy(q) => q as i64,
            TradeAction::Sell(q) => -(q as i64),
            TradeAction::Hold => 0,
        }
    }
}

/// Why a strategy was disqualified during evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfeasibilityReason {
    NegativeInventory,
    NegativeCash,
}

/// Point at which evaluation stopped for an infeasible strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub day: usize,
    pub ticker: Option<String>,
    pub reason: InfeasibilityReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_action_from_signed() {
        assert_eq!(TradeAction::from_signed(3), TradeAction::Buy(3));
        assert_eq!(TradeAction::from_signed(-2), TradeAction::Sell(2));
        assert_eq!(TradeAction::from_signed(0), TradeAction::Hold);
        assert_eq!(TradeAction::Sell(4).signed(), -4);
    }
}
