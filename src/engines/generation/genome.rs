//! Genome representation for the strategy search
//!
//! A genome maps every traded instrument to a [`Gene`]: a real-valued vector with one
//! entry per simulated day. All genes of a genome share the same length.
//!
//! # Why real values instead of integer actions?
//!
//! Arithmetic crossover and gaussian mutation need a continuous space to move through:
//! - **Crossover**: blending two parents can land between or beyond their quantities
//! - **Mutation**: small noise accumulates over generations before it flips a rounded action
//! - **Materialization**: [`Genome::to_agent`] rounds once, the search never sees the rounding
//!
//! # Example
//!
//! ```
//! use genetrade::engines::generation::{Gene, Genome};
//! use std::collections::BTreeMap;
//!
//! let mut genes = BTreeMap::new();
//! genes.insert("AAPL".to_string(), Gene::new(vec![1.2, -0.6, 0.0]));
//! let genome = Genome::new(genes).unwrap();
//! let agent = genome.to_agent();
//! assert_eq!(agent.sale_history["AAPL"], vec![1, -1, 0]);
//! ```
use super::gene::Gene;
use crate::config::GeneticSettings;
use crate::engines::evaluation::Agent;
use crate::error::{GenetradeError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    genes: BTreeMap<String, Gene>,
}

impl Genome {
    /// Build a genome, rejecting genes of unequal length.
    pub fn new(genes: BTreeMap<String, Gene>) -> Result<Self> {
        let mut expected = None;
        for (ticker, gene) in &genes {
            match expected {
                None => expected = Some(gene.len()),
                Some(len) if len != gene.len() => {
                    return Err(GenetradeError::GeneLengthMismatch {
                        ticker: ticker.clone(),
                        expected: len,
                        actual: gene.len(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(Self { genes })
    }

    /// Every value drawn from `U(-amplitude, amplitude)`.
    pub fn random<R: Rng>(tickers: &[String], days: usize, amplitude: f64, rng: &mut R) -> Self {
        let genes = tickers
            .iter()
            .map(|ticker| {
                let content = (0..days)
                    .map(|_| rng.gen_range(-amplitude..=amplitude))
                    .collect();
                (ticker.clone(), Gene::new(content))
            })
            .collect();
        Self { genes }
    }

    pub fn genes(&self) -> &BTreeMap<String, Gene> {
        &self.genes
    }

    pub fn gene(&self, ticker: &str) -> Option<&Gene> {
        self.genes.get(ticker)
    }

    /// Number of simulated days
    pub fn days(&self) -> usize {
        self.genes.values().next().map(Gene::len).unwrap_or(0)
    }

    pub fn mutate<R: Rng>(&mut self, settings: &GeneticSettings, rng: &mut R) -> Result<()> {
        for gene in self.genes.values_mut() {
            gene.mutate(settings, rng)?;
        }
        Ok(())
    }

    /// Per-instrument crossover with `other`, which must cover the same instruments and days.
    pub fn crossover<R: Rng>(
        &self,
        other: &Genome,
        settings: &GeneticSettings,
        rng: &mut R,
    ) -> Result<Genome> {
        if self.genes.len() != other.genes.len() {
            return Err(GenetradeError::InstrumentMismatch(format!(
                "parents cover {} and {} instruments",
                self.genes.len(),
                other.genes.len()
            )));
        }

        let mut genes = BTreeMap::new();
        for (ticker, gene) in &self.genes {
            let partner = other.genes.get(ticker).ok_or_else(|| {
                GenetradeError::InstrumentMismatch(format!("second parent has no gene for {}", ticker))
            })?;
            if partner.len() != gene.len() {
                return Err(GenetradeError::GeneLengthMismatch {
                    ticker: ticker.clone(),
                    expected: gene.len(),
                    actual: partner.len(),
                });
            }
            genes.insert(ticker.clone(), gene.crossover(partner, settings, rng));
        }

        Ok(Genome { genes })
    }

    /// Round every value to the nearest integer action (ties to even).
    pub fn to_agent(&self) -> Agent {
        let sale_history = self
            .genes
            .iter()
            .map(|(ticker, gene)| {
                let actions = gene
                    .content
                    .iter()
                    .map(|v| v.round_ties_even() as i64)
                    .collect();
                (ticker.clone(), actions)
            })
            .collect();
        Agent::new(sale_history)
    }

    pub fn from_agent(agent: &Agent) -> Result<Self> {
        let genes = agent
            .sale_history
            .iter()
            .map(|(ticker, actions)| {
                let content = actions.iter().map(|&a| a as f64).collect();
                (ticker.clone(), Gene::new(content))
            })
            .collect();
        Self::new(genes)
    }
}
