use crate::types::InfeasibilityReason;
use std::collections::BTreeMap;

/// Cash and per-instrument inventory while a strategy is replayed.
pub struct Portfolio {
    pub cash: f64,
    inventory: BTreeMap<String, i64>,
}

impl Portfolio {
    pub fn new<'a, I>(initial_cash: f64, tickers: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        Self {
            cash: initial_cash,
            inventory: tickers.into_iter().map(|t| (t.clone(), 0)).collect(),
        }
    }

    /// Apply a signed quantity at `price`. Selling more than is held rejects the
    /// whole strategy, nothing is partially filled.
    pub fn apply(&mut self, ticker: &str, quantity: i64, price: f64) -> Result<(), InfeasibilityReason> {
        let held = self.inventory.entry(ticker.to_string()).or_insert(0);
        *held += quantity;
        if *held < 0 {
            return Err(InfeasibilityReason::NegativeInventory);
        }

        self.cash -= price * quantity as f64;
        Ok(())
    }

    /// End-of-day cash check.
    pub fn check_cash(&self) -> Result<(), InfeasibilityReason> {
        if self.cash < 0.0 {
            return Err(InfeasibilityReason::NegativeCash);
        }
        Ok(())
    }

    pub fn inventory(&self, ticker: &str) -> i64 {
        self.inventory.get(ticker).copied().unwrap_or(0)
    }

    /// Sell all remaining inventory at `final_price(ticker)` and return the resulting cash.
    pub fn liquidate<F>(&mut self, final_price: F) -> f64
    where
        F: Fn(&str) -> f64,
    {
        for (ticker, held) in self.inventory.iter_mut() {
            self.cash += final_price(ticker) * *held as f64;
            *held = 0;
        }
        self.cash
    }
}
