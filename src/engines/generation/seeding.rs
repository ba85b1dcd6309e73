use super::gene::Gene;
use super::genome::Genome;
use crate::config::SimulationConfig;
use crate::engines::estimation::PriceEstimator;
use crate::error::{GenetradeError, Result};
use crate::types::TradeAction;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Buy when the forecast rises more than this fraction
const BUY_THRESHOLD: f64 = 0.001;
/// Sell when the forecast falls more than this fraction
const SELL_THRESHOLD: f64 = -0.0001;

/// Forecast input for one instrument
#[derive(Debug, Clone)]
pub struct InstrumentForecast {
    pub last_known_price: f64,
    pub predicted: Vec<f64>,
}

impl InstrumentForecast {
    /// Forecast `horizon` days past the end of `window`.
    pub fn from_window(estimator: &dyn PriceEstimator, window: &[f64], horizon: usize) -> Result<Self> {
        let last_known_price = *window.last().ok_or_else(|| {
            GenetradeError::Estimation("Cannot forecast from an empty window".to_string())
        })?;
        let result = estimator.estimate(window, horizon)?;
        Ok(Self {
            last_known_price,
            predicted: result.estimated_prices,
        })
    }
}

/// Builds initial genomes by greedily trading against forecasts
pub struct WarmStartSeeder {
    start_cash: f64,
    max_buy_per_day: u64,
    max_sell_per_day: u64,
    days: usize,
}

impl WarmStartSeeder {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            start_cash: config.start_cash,
            max_buy_per_day: config.max_buy_per_day,
            max_sell_per_day: config.max_sell_per_day,
            days: config.days,
        }
    }

    pub fn seed<R: Rng>(
        &self,
        forecasts: &BTreeMap<String, InstrumentForecast>,
        rng: &mut R,
    ) -> Result<Genome> {
        for (ticker, forecast) in forecasts {
            if forecast.predicted.len() < self.days {
                return Err(GenetradeError::Estimation(format!(
                    "Forecast for {} covers {} days, simulation needs {}",
                    ticker,
                    forecast.predicted.len(),
                    self.days
                )));
            }
        }

        let mut cash = self.start_cash;
        let mut inventory: BTreeMap<&str, u64> =
            forecasts.keys().map(|t| (t.as_str(), 0)).collect();
        let mut actions: BTreeMap<&str, Vec<TradeAction>> = forecasts
            .keys()
            .map(|t| (t.as_str(), Vec::with_capacity(self.days)))
            .collect();
        let mut order: Vec<&str> = forecasts.keys().map(String::as_str).collect();

        for day in 0..self.days {
            order.shuffle(rng);

            for &ticker in &order {
                let forecast = &forecasts[ticker];
                let prev_price = if day == 0 {
                    forecast.last_known_price
                } else {
                    forecast.predicted[day - 1]
                };
                let held = inventory.get(ticker).copied().unwrap_or(0);
                let action = self.decide(prev_price, forecast.predicted[day], cash, held, rng);

                match action {
                    TradeAction::Buy(q) => {
                        cash -= q as f64 * prev_price;
                        inventory.insert(ticker, held + q);
                    }
                    TradeAction::Sell(q) => {
                        cash += q as f64 * prev_price;
                        inventory.insert(ticker, held - q);
                    }
                    TradeAction::Hold => {}
                }
                if let Some(history) = actions.get_mut(ticker) {
                    history.push(action);
                }
            }
        }

        let genes = actions
            .into_iter()
            .map(|(ticker, history)| {
                let content = history.iter().map(|a| a.signed() as f64).collect();
                (ticker.to_string(), Gene::new(content))
            })
            .collect();
        Genome::new(genes)
    }

    fn decide<R: Rng>(
        &self,
        prev_price: f64,
        future_price: f64,
        cash: f64,
        held: u64,
        rng: &mut R,
    ) -> TradeAction {
        // a non-positive reference price gives no meaningful ratio
        if prev_price <= 0.0 || !prev_price.is_finite() {
            return TradeAction::Hold;
        }
        let ratio = (future_price - prev_price) / prev_price;

        if ratio > BUY_THRESHOLD {
            let affordable = (cash / prev_price).floor();
            if affordable >= 1.0 {
                let cap = (affordable as u64).min(self.max_buy_per_day);
                return TradeAction::Buy(rng.gen_range(1..=cap));
            }
        } else if ratio < SELL_THRESHOLD && held > 0 {
            let cap = held.min(self.max_sell_per_day);
            return TradeAction::Sell(rng.gen_range(1..=cap));
        }
        TradeAction::Hold
    }
}
