use crate::{
    engines::evaluation::Agent,
    error::{GenetradeError, Result},
    types::PriceHistory,
};

/// Replays agents against realized prices. Forecasts never reach this type.
pub struct FitnessEvaluator {
    prices: PriceHistory,
    start_cash: f64,
}

/// Summary of one evaluated generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationFitness {
    pub best_index: usize,
    pub best_profit: f64,
    pub total_profit: f64,
    pub feasible: usize,
}

impl FitnessEvaluator {
    pub fn new(prices: PriceHistory, start_cash: f64) -> Self {
        Self { prices, start_cash }
    }

    pub fn start_cash(&self) -> f64 {
        self.start_cash
    }

    pub fn prices(&self) -> &PriceHistory {
        &self.prices
    }

    pub fn evaluate(&self, agent: &mut Agent) -> Result<f64> {
        agent.execute(&self.prices, self.start_cash)
    }

    /// Evaluate every agent; all profits are known before anything is returned.
    pub fn evaluate_population(&self, agents: &mut [Agent]) -> Result<GenerationFitness> {
        self.evaluate_population_with(agents, |_, _| {})
    }

    /// Same as `evaluate_population`, calling `on_evaluated(n, total)` after each agent.
    pub fn evaluate_population_with<F>(&self, agents: &mut [Agent], mut on_evaluated: F) -> Result<GenerationFitness>
    where
        F: FnMut(usize, usize),
    {
        if agents.is_empty() {
            return Err(GenetradeError::Configuration(
                "Cannot evaluate an empty population".to_string(),
            ));
        }

        let mut best_index = 0;
        let mut best_profit = f64::NEG_INFINITY;
        let mut total_profit = 0.0;
        let mut feasible = 0;

        let total = agents.len();
        for (i, agent) in agents.iter_mut().enumerate() {
            let profit = self.evaluate(agent)?;
            on_evaluated(i + 1, total);
            total_profit += profit;
            if agent.is_feasible() {
                feasible += 1;
            }
            if profit > best_profit {
                best_profit = profit;
                best_index = i;
            }
        }

        log::debug!(
            "Evaluated {} agents: {} feasible, best profit {:.2}",
            agents.len(),
            feasible,
            best_profit
        );

        Ok(GenerationFitness {
            best_index,
            best_profit,
            total_profit,
            feasible,
        })
    }
}
