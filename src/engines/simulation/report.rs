use crate::engines::evaluation::Agent;
use crate::engines::generation::EliteStrategy;
use crate::error::Result;
use crate::types::{SaleHistory, TradeAction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Best agent observed over a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestAgent {
    pub sale_history: SaleHistory,
    pub actions: BTreeMap<String, Vec<TradeAction>>,
    /// Final cash after liquidation
    pub profit: f64,
    /// `profit - start_cash`
    pub net_gain: f64,
    pub age: u32,
    /// Generation that produced it, 0 being the initial population
    pub generation: usize,
}

impl BestAgent {
    pub fn from_agent(agent: &Agent, start_cash: f64, generation: usize) -> Self {
        let actions = agent
            .sale_history
            .keys()
            .filter_map(|ticker| agent.actions(ticker).map(|a| (ticker.clone(), a)))
            .collect();
        Self {
            sale_history: agent.sale_history.clone(),
            actions,
            profit: agent.profit,
            net_gain: agent.profit - start_cash,
            age: agent.age,
            generation,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub estimator: String,
    pub tickers: Vec<String>,
    pub start_cash: f64,
    pub days: usize,
    pub iterations: usize,
    pub best_agent: BestAgent,
    pub iteration_best_profits: Vec<f64>,
    pub best_profits_so_far: Vec<f64>,
    pub hall_of_fame: Vec<EliteStrategy>,
    pub ages_at_death: Vec<u32>,
    pub final_profits: Vec<f64>,
}

impl SimulationReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(writer, self)?;
        log::info!("Report written to {}", path.as_ref().display());
        Ok(())
    }

    pub fn mean_age_at_death(&self) -> Option<f64> {
        if self.ages_at_death.is_empty() {
            return None;
        }
        let total: u64 = self.ages_at_death.iter().map(|&a| a as u64).sum();
        Some(total as f64 / self.ages_at_death.len() as f64)
    }
}
