use crate::engines::evaluation::Agent;
use crate::types::SaleHistory;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EliteStrategy {
    pub sale_history: SaleHistory,
    pub profit: f64,
    pub age: u32,
    /// Generation in which the strategy was first recorded
    pub generation: usize,
}

impl EliteStrategy {
    pub fn from_agent(agent: &Agent, generation: usize) -> Self {
        Self {
            sale_history: agent.sale_history.clone(),
            profit: agent.profit,
            age: agent.age,
            generation,
        }
    }
}

/// Best distinct strategies seen over a run, highest profit first
pub struct HallOfFame {
    strategies: Vec<EliteStrategy>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            strategies: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to add a strategy to the Hall of Fame
    pub fn try_add(&mut self, strategy: EliteStrategy) -> bool {
        let signature = get_signature(&strategy.sale_history);
        if self.seen_signatures.contains(&signature) {
            return false;
        }
        if self.strategies.len() >= self.max_size {
            match self.strategies.last() {
                Some(worst) if worst.profit >= strategy.profit => return false,
                None if self.max_size == 0 => return false,
                _ => {}
            }
        }

        self.seen_signatures.insert(signature);
        self.strategies.push(strategy);
        self.sort_and_trim();
        true
    }

    /// Offer every agent of a generation.
    pub fn record_generation(&mut self, agents: &[Agent], generation: usize) -> usize {
        agents
            .iter()
            .filter(|a| a.is_feasible())
            .filter(|a| self.try_add(EliteStrategy::from_agent(a, generation)))
            .count()
    }

    fn sort_and_trim(&mut self) {
        // stable sort keeps the earliest entry first among equal profits
        self.strategies.sort_by(|a, b| {
            b.profit.partial_cmp(&a.profit).unwrap_or(std::cmp::Ordering::Equal)
        });

        while self.strategies.len() > self.max_size {
            if let Some(removed) = self.strategies.pop() {
                self.seen_signatures.remove(&get_signature(&removed.sale_history));
            }
        }
    }

    pub fn best(&self) -> Option<&EliteStrategy> {
        self.strategies.first()
    }

    pub fn get_all(&self) -> &[EliteStrategy] {
        &self.strategies
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Canonical string of an action history for deduplication
pub fn get_signature(sale_history: &SaleHistory) -> String {
    serde_json::to_string(sale_history).unwrap_or_else(|_| String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(history: Vec<i64>, profit: f64) -> Agent {
        let mut agent = Agent::new(SaleHistory::from([("A".to_string(), history)]));
        agent.profit = profit;
        agent
    }

    #[test]
    fn test_keeps_top_n_by_profit() {
        let mut hof = HallOfFame::new(2);
        hof.record_generation(
            &[agent(vec![1], 10.0), agent(vec![2], 30.0), agent(vec![3], 20.0)],
            0,
        );

        assert_eq!(hof.len(), 2);
        assert_eq!(hof.best().unwrap().profit, 30.0);
        assert_eq!(hof.get_all()[1].profit, 20.0);
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut hof = HallOfFame::new(5);
        assert!(hof.try_add(EliteStrategy::from_agent(&agent(vec![1, 0], 10.0), 0)));
        assert!(!hof.try_add(EliteStrategy::from_agent(&agent(vec![1, 0], 10.0), 1)));
        assert_eq!(hof.len(), 1);
    }

    #[test]
    fn test_evicted_strategy_can_return() {
        let mut hof = HallOfFame::new(1);
        hof.try_add(EliteStrategy::from_agent(&agent(vec![1], 10.0), 0));
        hof.try_add(EliteStrategy::from_agent(&agent(vec![2], 20.0), 1));
        assert_eq!(hof.best().unwrap().sale_history["A"], vec![2]);
        assert!(!hof.try_add(EliteStrategy::from_agent(&agent(vec![1], 10.0), 2)));
        assert!(hof.try_add(EliteStrategy::from_agent(&agent(vec![1], 25.0), 3)));
        assert_eq!(hof.best().unwrap().generation, 3);
    }

    #[test]
    fn test_infeasible_agents_skipped() {
        use crate::types::{InfeasibilityReason, Rejection};

        let mut rejected = agent(vec![-1], 0.0);
        rejected.rejection = Some(Rejection {
            day: 0,
            ticker: Some("A".to_string()),
            reason: InfeasibilityReason::NegativeInventory,
        });
        let mut hof = HallOfFame::new(3);
        assert_eq!(hof.record_generation(&[rejected], 0), 0);
        assert!(hof.is_empty());
    }

    #[test]
    fn test_reloaded_strategies_keep_distinct_identity() {
        let first = EliteStrategy::from_agent(&agent(vec![1, 0], 10.0), 0);
        let second = EliteStrategy::from_agent(&agent(vec![0, 1], 12.0), 0);
        let json = serde_json::to_string(&vec![first, second]).unwrap();
        let reloaded: Vec<EliteStrategy> = serde_json::from_str(&json).unwrap();

        let mut hof = HallOfFame::new(5);
        for strategy in reloaded.iter().cloned() {
            assert!(hof.try_add(strategy));
        }
        assert_eq!(hof.len(), 2);
        assert!(!hof.try_add(reloaded[0].clone()));
    }
}
