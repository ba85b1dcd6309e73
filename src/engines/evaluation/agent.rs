use super::portfolio::Portfolio;
use crate::error::{GenetradeError, Result};
use crate::types::{PriceHistory, Rejection, SaleHistory, TradeAction};
use serde::{Deserialize, Serialize};

/// A materialized strategy: integer daily actions plus fitness and age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub sale_history: SaleHistory,
    /// Final cash after liquidation, 0 for infeasible strategies
    pub profit: f64,
    /// Generations survived
    pub age: u32,
    pub rejection: Option<Rejection>,
}

impl Agent {
    pub fn new(sale_history: SaleHistory) -> Self {
        Self {
            sale_history,
            profit: 0.0,
            age: 0,
            rejection: None,
        }
    }

    pub fn days(&self) -> usize {
        self.sale_history.values().next().map(Vec::len).unwrap_or(0)
    }

    pub fn actions(&self, ticker: &str) -> Option<Vec<TradeAction>> {
        self.sale_history
            .get(ticker)
            .map(|history| history.iter().map(|&q| TradeAction::from_signed(q)).collect())
    }

    pub fn is_feasible(&self) -> bool {
        self.rejection.is_none()
    }

    /// Replay the strategy against realized prices and store the resulting profit.
    ///
    /// Days are processed in order with instruments in map order inside each day.
    /// Selling below zero inventory, or ending a day with negative cash, stops the
    /// replay and forces the profit to 0. Errors only report prices that do not cover
    /// the strategy.
    pub fn execute(&mut self, prices: &PriceHistory, start_cash: f64) -> Result<f64> {
        let days = self.days();
        let mut series = Vec::with_capacity(self.sale_history.len());
        for (ticker, actions) in &self.sale_history {
            let ticker_prices = prices
                .get(ticker)
                .filter(|p| !p.is_empty())
                .ok_or_else(|| GenetradeError::MissingPrices(ticker.clone()))?;
            if actions.len() != days {
                return Err(GenetradeError::GeneLengthMismatch {
                    ticker: ticker.clone(),
                    expected: days,
                    actual: actions.len(),
                });
            }
            if ticker_prices.len() < days {
                return Err(GenetradeError::InsufficientData {
                    ticker: ticker.clone(),
                    have: ticker_prices.len(),
                    need: days,
                });
            }
            series.push((ticker.as_str(), actions.as_slice(), ticker_prices.as_slice()));
        }

        let mut portfolio = Portfolio::new(start_cash, self.sale_history.keys());
        let mut rejection = None;

        'days: for day in 0..days {
            for (ticker, actions, ticker_prices) in &series {
                if let Err(reason) = portfolio.apply(ticker, actions[day], ticker_prices[day]) {
                    rejection = Some(Rejection {
                        day,
                        ticker: Some(ticker.to_string()),
                        reason,
                    });
                    break 'days;
                }
            }
            if let Err(reason) = portfolio.check_cash() {
                rejection = Some(Rejection {
                    day,
                    ticker: None,
                    reason,
                });
                break;
            }
        }

        if let Some(rejection) = rejection {
            log::trace!("strategy rejected on day {}: {:?}", rejection.day, rejection.reason);
            self.rejection = Some(rejection);
            self.profit = 0.0;
            return Ok(self.profit);
        }

        self.rejection = None;
        self.profit = portfolio.liquidate(|ticker| {
            prices
                .get(ticker)
                .and_then(|p| p.last().copied())
                .unwrap_or(0.0)
        });
        Ok(self.profit)
    }
}
