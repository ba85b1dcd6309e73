use crate::config::GeneticSettings;
use crate::error::{GenetradeError, Result};
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};
use serde::{Deserialize, Serialize};

/// Per-day trade intensity for one instrument.
///
/// The sign of each value is the trade direction and its rounded magnitude the quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    pub content: Vec<f64>,
}

impl Gene {
    pub fn new(content: Vec<f64>) -> Self {
        Self { content }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Add gaussian noise to one random position.
    pub fn mutate_change<R: Rng>(&mut self, settings: &GeneticSettings, rng: &mut R) -> Result<()> {
        if self.content.is_empty() {
            return Ok(());
        }
        let noise = Normal::new(0.0, settings.float_mutation_variance)
            .map_err(|e| GenetradeError::Configuration(format!("float_mutation_variance: {}", e)))?;
        let i = rng.gen_range(0..self.content.len());
        self.content[i] += noise.sample(rng);
        Ok(())
    }

    /// Cyclically rotate a randomly placed window of log-normal size by a log-normal shift.
    pub fn mutate_rotate<R: Rng>(&mut self, settings: &GeneticSettings, rng: &mut R) -> Result<()> {
        let len = self.content.len();
        if len == 0 {
            return Ok(());
        }
        let size_dist = LogNormal::new(0.0, settings.rotation_size_variance)
            .map_err(|e| GenetradeError::Configuration(format!("rotation_size_variance: {}", e)))?;
        let shift_dist = LogNormal::new(0.0, settings.rotation_shift_variance)
            .map_err(|e| GenetradeError::Configuration(format!("rotation_shift_variance: {}", e)))?;

        let start = rng.gen_range(0..len);
        let size = (size_dist.sample(rng) as usize).min(len);
        let shift = shift_dist.sample(rng) as usize;
        if size <= 1 {
            return Ok(());
        }

        self.content = rotate_window(&self.content, start, size, shift % size);
        Ok(())
    }

    pub fn mutate<R: Rng>(&mut self, settings: &GeneticSettings, rng: &mut R) -> Result<()> {
        if rng.gen::<f64>() < settings.mutate_change_chance {
            self.mutate_change(settings, rng)?;
        }
        if rng.gen::<f64>() < settings.mutate_rotate_chance {
            self.mutate_rotate(settings, rng)?;
        }
        Ok(())
    }

    /// k-point crossover; returns one of the two children at random.
    pub fn crossover_point<R: Rng>(&self, other: &Gene, settings: &GeneticSettings, rng: &mut R) -> Gene {
        let len = self.content.len();
        let mut child1 = self.content.clone();
        let mut child2 = other.content.clone();

        if len > 0 {
            for _ in 0..settings.crossover_point_amount {
                let point = rng.gen_range(0..len);
                child1[point..].swap_with_slice(&mut child2[point..]);
            }
        }

        if rng.gen::<f64>() < 0.5 {
            Gene::new(child1)
        } else {
            Gene::new(child2)
        }
    }

    /// Blend each position with its own `beta ~ U(-imbalance, 1 + imbalance)`.
    pub fn crossover_uniform<R: Rng>(&self, other: &Gene, settings: &GeneticSettings, rng: &mut R) -> Gene {
        let low = -settings.crossover_imbalance;
        let high = 1.0 + settings.crossover_imbalance;
        let content = self
            .content
            .iter()
            .zip(&other.content)
            .map(|(v1, v2)| {
                let beta = rng.gen_range(low..=high);
                v1 * beta + v2 * (1.0 - beta)
            })
            .collect();
        Gene::new(content)
    }

    pub fn crossover<R: Rng>(&self, other: &Gene, settings: &GeneticSettings, rng: &mut R) -> Gene {
        if rng.gen::<f64>() < settings.crossover_point_chance {
            self.crossover_point(other, settings, rng)
        } else {
            self.crossover_uniform(other, settings, rng)
        }
    }
}

/// Rotate `size` wrapping positions from `start` by `shift` (`shift < size`).
///
/// Positions in the last `shift` slots of the block read from `size` places back so the
/// block stays a permutation of its own values.
fn rotate_window(content: &[f64], start: usize, size: usize, shift: usize) -> Vec<f64> {
    let len = content.len() as i64;
    let mut rotated = content.to_vec();

    for i in 0..size {
        let cur = (start + i) % content.len();
        let mut target = (cur as i64 + shift as i64).rem_euclid(len);
        if i.saturating_add(shift) >= size {
            target = (target + len - size as i64).rem_euclid(len);
        }
        rotated[cur] = content[target as usize];
    }

    rotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut v = values.to_vec();
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    #[test]
    fn test_rotate_window_inside() {
        let content = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let rotated = rotate_window(&content, 1, 4, 1);
        assert_eq!(rotated, vec![0.0, 2.0, 3.0, 4.0, 1.0, 5.0]);
    }

    #[test]
    fn test_rotate_window_wraps_around_end() {
        let content = [0.0, 1.0, 2.0, 3.0, 4.0];
        let rotated = rotate_window(&content, 3, 3, 2);
        // block holds positions 3, 4, 0 with values 3, 4, 0
        assert_eq!(rotated, vec![4.0, 1.0, 2.0, 0.0, 3.0]);
    }

    #[test]
    fn test_rotate_full_length_is_permutation() {
        let content = [7.0, 8.0, 9.0, 10.0];
        let rotated = rotate_window(&content, 2, 4, 3);
        assert_eq!(sorted(&rotated), sorted(&content));
    }

    #[test]
    fn test_mutate_change_touches_one_position() {
        let mut rng = StdRng::seed_from_u64(7);
        let settings = GeneticSettings::default();
        let mut gene = Gene::new(vec![1.0; 8]);
        gene.mutate_change(&settings, &mut rng).unwrap();
        let changed = gene.content.iter().filter(|&&v| v != 1.0).count();
        assert!(changed <= 1);
        assert_eq!(gene.len(), 8);
    }

    #[test]
    fn test_mutate_rotate_preserves_values() {
        let mut rng = StdRng::seed_from_u64(11);
        let settings = GeneticSettings::default();
        let original: Vec<f64> = (0..12).map(|v| v as f64).collect();
        let mut gene = Gene::new(original.clone());
        for _ in 0..50 {
            gene.mutate_rotate(&settings, &mut rng).unwrap();
        }
        assert_eq!(sorted(&gene.content), original);
    }

    #[test]
    fn test_point_crossover_takes_each_position_from_a_parent() {
        let mut rng = StdRng::seed_from_u64(3);
        let settings = GeneticSettings {
            crossover_point_amount: 3,
            ..Default::default()
        };
        let a = Gene::new(vec![1.0; 10]);
        let b = Gene::new(vec![2.0; 10]);
        for _ in 0..20 {
            let child = a.crossover_point(&b, &settings, &mut rng);
            assert_eq!(child.len(), 10);
            assert!(child.content.iter().all(|&v| v == 1.0 || v == 2.0));
        }
    }

    #[test]
    fn test_uniform_crossover_stays_in_extended_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let settings = GeneticSettings::default();
        let a = Gene::new(vec![0.0; 200]);
        let b = Gene::new(vec![4.0; 200]);
        let child = a.crossover_uniform(&b, &settings, &mut rng);
        // beta in [-0.25, 1.25] maps to [-1, 5]
        assert!(child.content.iter().all(|&v| (-1.0 - 1e-9..=5.0 + 1e-9).contains(&v)));
        assert!(child.content.iter().any(|&v| !(0.0..=4.0).contains(&v)));
    }

    #[test]
    fn test_identical_parents_point_crossover_is_identity() {
        let mut rng = StdRng::seed_from_u64(9);
        let settings = GeneticSettings::default();
        let a = Gene::new(vec![1.0, -2.0, 3.0]);
        assert_eq!(a.crossover_point(&a, &settings, &mut rng), a);
    }
}
