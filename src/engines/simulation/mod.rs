pub mod report;

pub use report::{BestAgent, SimulationReport};

use crate::config::AppConfig;
use crate::data::MarketData;
use crate::engines::estimation::PriceEstimator;
use crate::engines::evaluation::{Agent, FitnessEvaluator, GenerationFitness};
use crate::engines::generation::{
    EvolutionEngine, Genome, HallOfFame, InstrumentForecast, Population, ProgressCallback, WarmStartSeeder,
};
use crate::error::{GenetradeError, Result};
use crate::types::PriceHistory;
use std::collections::BTreeMap;

/// One evolutionary search over a fixed set of instruments.
///
/// Estimation windows feed the warm-start forecasts only; fitness is always computed
/// against the realized simulation prices.
pub struct Simulation {
    config: AppConfig,
    estimator: Box<dyn PriceEstimator>,
    estimation_prices: PriceHistory,
    evaluator: FitnessEvaluator,
    engine: EvolutionEngine,
    hall_of_fame: HallOfFame,
}

impl Simulation {
    /// Split `market` at the configured start date and build the run.
    pub fn new(config: AppConfig, market: &MarketData) -> Result<Self> {
        let (estimation_prices, simulation_prices) = market.split_at(
            config.estimation.start_date,
            config.estimation.lookback_days,
            config.simulation.days,
        )?;
        Self::from_prices(config, estimation_prices, simulation_prices)
    }

    pub fn from_prices(
        config: AppConfig,
        estimation_prices: PriceHistory,
        mut simulation_prices: PriceHistory,
    ) -> Result<Self> {
        config.validate()?;

        let days = config.simulation.days;
        if simulation_prices.is_empty() {
            return Err(GenetradeError::Configuration(
                "No instruments to simulate".to_string(),
            ));
        }
        if !estimation_prices.keys().eq(simulation_prices.keys()) {
            return Err(GenetradeError::InstrumentMismatch(
                "Estimation and simulation prices cover different instruments".to_string(),
            ));
        }
        for (ticker, prices) in simulation_prices.iter_mut() {
            if prices.len() < days {
                return Err(GenetradeError::InsufficientData {
                    ticker: ticker.clone(),
                    have: prices.len(),
                    need: days,
                });
            }
            // liquidation uses the last simulated day
            prices.truncate(days);
        }

        let estimator = config.estimation.estimator.build();
        let evaluator = FitnessEvaluator::new(simulation_prices, config.simulation.start_cash);
        let engine = EvolutionEngine::new(config.evolution.clone())?;
        let hall_of_fame = HallOfFame::new(config.evolution.hall_of_fame_size);

        Ok(Self {
            config,
            estimator,
            estimation_prices,
            evaluator,
            engine,
            hall_of_fame,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    pub fn tickers(&self) -> Vec<String> {
        self.evaluator.prices().keys().cloned().collect()
    }

    /// Forecast every instrument `days` ahead from the end of its estimation window.
    pub fn forecasts(&self) -> Result<BTreeMap<String, InstrumentForecast>> {
        let horizon = self.config.simulation.days;
        self.estimation_prices
            .iter()
            .map(|(ticker, window)| {
                InstrumentForecast::from_window(self.estimator.as_ref(), window, horizon)
                    .map(|forecast| (ticker.clone(), forecast))
            })
            .collect()
    }

    /// Warm-start seeds first, then random genomes up to the population size.
    pub fn initial_population(&mut self) -> Result<Population> {
        let size = self.config.evolution.population_size;
        let seeded = ((size as f64 * self.config.simulation.warm_start_ratio).round() as usize).min(size);
        let tickers = self.tickers();
        let days = self.config.simulation.days;
        let amplitude = self.config.simulation.random_gene_amplitude;

        let mut agents = Vec::with_capacity(size);
        if seeded > 0 {
            let forecasts = self.forecasts()?;
            let seeder = WarmStartSeeder::new(&self.config.simulation);
            for _ in 0..seeded {
                agents.push(seeder.seed(&forecasts, self.engine.rng())?.to_agent());
            }
        }
        while agents.len() < size {
            agents.push(Genome::random(&tickers, days, amplitude, self.engine.rng()).to_agent());
        }

        log::info!(
            "Initial population: {} warm-start, {} random",
            seeded,
            size - seeded
        );
        Ok(Population::new(agents))
    }

    fn evaluate<C: ProgressCallback>(&self, population: &mut Population, callback: &mut C) -> Result<GenerationFitness> {
        self.evaluator
            .evaluate_population_with(&mut population.agents, |n, total| callback.on_agent_evaluated(n, total))
    }

    /// Run the configured number of generations and summarise the search.
    pub fn run<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<SimulationReport> {
        let start_cash = self.config.simulation.start_cash;
        let iterations = self.config.evolution.iterations;

        let mut population = self.initial_population()?;
        let fitness = self.evaluate(&mut population, callback)?;
        self.hall_of_fame.record_generation(&population.agents, 0);

        let mut best = Tracked::new(&population.agents[fitness.best_index], 0);
        let mut iteration_best_profits = Vec::with_capacity(iterations);
        let mut best_profits_so_far = Vec::with_capacity(iterations);

        for generation in 0..iterations {
            callback.on_generation_start(generation);

            self.engine.evolve(&mut population)?;
            let fitness = self.evaluate(&mut population, callback)?;
            self.hall_of_fame.record_generation(&population.agents, generation + 1);
            best.offer(&population.agents[fitness.best_index], generation + 1);

            iteration_best_profits.push(fitness.best_profit);
            best_profits_so_far.push(best.agent.profit);

            log::debug!(
                "Generation {}: best net gain {:.2}, {} of {} feasible",
                generation + 1,
                fitness.best_profit - start_cash,
                fitness.feasible,
                population.len()
            );
            callback.on_generation_complete(generation, fitness.best_profit, best.agent.profit);
        }

        log::info!(
            "Best profit {:.2} (net gain {:.2}) found in generation {}",
            best.agent.profit,
            best.agent.profit - start_cash,
            best.generation
        );

        Ok(SimulationReport {
            estimator: self.estimator.name().to_string(),
            tickers: self.tickers(),
            start_cash,
            days: self.config.simulation.days,
            iterations,
            best_agent: BestAgent::from_agent(&best.agent, start_cash, best.generation),
            iteration_best_profits,
            best_profits_so_far,
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
            ages_at_death: population.ages_at_death.clone(),
            final_profits: population.profits(),
        })
    }
}

/// Best agent so far, kept as a copy since populations are replaced each generation
struct Tracked {
    agent: Agent,
    generation: usize,
}

impl Tracked {
    fn new(agent: &Agent, generation: usize) -> Self {
        Self {
            agent: agent.clone(),
            generation,
        }
    }

    fn offer(&mut self, agent: &Agent, generation: usize) {
        if agent.profit > self.agent.profit {
            self.agent = agent.clone();
            self.generation = generation;
        }
    }
}
