use crate::config::{ConfigSection, EvolutionConfig, ShortfallPolicy};
use crate::engines::evaluation::Agent;
use crate::engines::generation::{
    genome::Genome,
    operators::{roulette_sample_distinct, roulette_wheel, uniform_sample_distinct},
};
use crate::error::{GenetradeError, Result};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Live agents of one generation plus the ages of every agent removed so far
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub agents: Vec<Agent>,
    pub ages_at_death: Vec<u32>,
}

impl Population {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self {
            agents,
            ages_at_death: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn profits(&self) -> Vec<f64> {
        self.agents.iter().map(|a| a.profit).collect()
    }

    pub fn total_profit(&self) -> f64 {
        self.agents.iter().map(|a| a.profit).sum()
    }

    pub fn best(&self) -> Option<&Agent> {
        self.agents
            .iter()
            .max_by(|a, b| a.profit.partial_cmp(&b.profit).unwrap_or(std::cmp::Ordering::Equal))
    }
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: StdRng,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Shared generator so initialisation and evolution draw from one seeded stream
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Replace `population` with the next generation.
    ///
    /// Profits must already be assigned. The size of the population never changes.
    pub fn evolve(&mut self, population: &mut Population) -> Result<()> {
        if population.is_empty() {
            return Err(GenetradeError::Configuration(
                "Cannot evolve an empty population".to_string(),
            ));
        }

        let fitness = population.profits();
        let total: f64 = fitness.iter().map(|f| f.max(0.0)).sum();

        if total == 0.0 {
            log::warn!(
                "Population of {} has zero total fitness, mutating every agent",
                population.len()
            );
            return self.mutate_all(population);
        }

        let size = population.len();
        let mut children_size = (size as f64 * self.config.children_ratio).floor() as usize;
        let mut alive_size = size - children_size;

        let eligible: Vec<usize> = (0..size)
            .filter(|&i| population.agents[i].age < self.config.max_age)
            .collect();

        if eligible.len() < alive_size {
            match self.config.shortfall_policy {
                ShortfallPolicy::Fail => {
                    return Err(GenetradeError::InsufficientSurvivors {
                        eligible: eligible.len(),
                        required: alive_size,
                    });
                }
                ShortfallPolicy::BreedReplacements => {
                    log::warn!(
                        "Only {} agents below max age {}, breeding {} extra children",
                        eligible.len(),
                        self.config.max_age,
                        alive_size - eligible.len()
                    );
                    children_size += alive_size - eligible.len();
                    alive_size = eligible.len();
                }
            }
        }

        let genomes = population
            .agents
            .iter()
            .map(Genome::from_agent)
            .collect::<Result<Vec<_>>>()?;
        let children = self.breed(&genomes, &fitness, children_size)?;
        let survivors = self.select_survivors(&eligible, &fitness, alive_size)?;

        let mut keep = vec![false; size];
        for &i in &survivors {
            keep[i] = true;
        }

        let mut next = Vec::with_capacity(size);
        for (i, mut agent) in std::mem::take(&mut population.agents).into_iter().enumerate() {
            if keep[i] {
                agent.age += 1;
                next.push(agent);
            } else {
                population.ages_at_death.push(agent.age);
            }
        }
        next.extend(children);

        log::debug!(
            "Next generation: {} survivors, {} children, {} deaths recorded",
            alive_size,
            children_size,
            population.ages_at_death.len()
        );

        population.agents = next;
        Ok(())
    }

    fn mutate_all(&mut self, population: &mut Population) -> Result<()> {
        let mut next = Vec::with_capacity(population.len());
        for agent in &population.agents {
            let mut genome = Genome::from_agent(agent)?;
            genome.mutate(&self.config.genetic, &mut self.rng)?;
            next.push(genome.to_agent());
            population.ages_at_death.push(agent.age);
        }
        population.agents = next;
        Ok(())
    }

    fn breed(&mut self, genomes: &[Genome], fitness: &[f64], amount: usize) -> Result<Vec<Agent>> {
        if amount == 0 {
            return Ok(Vec::new());
        }

        let wheel = roulette_wheel(fitness)?;
        let mut children = Vec::with_capacity(amount);
        while children.len() < amount {
            let first = &genomes[wheel.sample(&mut self.rng)];
            let second = &genomes[wheel.sample(&mut self.rng)];

            let mut child = first.crossover(second, &self.config.genetic, &mut self.rng)?;
            child.mutate(&self.config.genetic, &mut self.rng)?;
            children.push(child.to_agent());
        }
        Ok(children)
    }

    /// Indices into the population, drawn without replacement from `eligible`.
    fn select_survivors(&mut self, eligible: &[usize], fitness: &[f64], amount: usize) -> Result<Vec<usize>> {
        let eligible_fitness: Vec<f64> = eligible.iter().map(|&i| fitness[i]).collect();
        let mass: f64 = eligible_fitness.iter().map(|f| f.max(0.0)).sum();

        let picked = if mass == 0.0 {
            uniform_sample_distinct(eligible.len(), amount, &mut self.rng)?
        } else {
            roulette_sample_distinct(&eligible_fitness, amount, &mut self.rng)?
        };
        Ok(picked.into_iter().map(|p| eligible[p]).collect())
    }
}
