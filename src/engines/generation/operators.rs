use crate::error::{GenetradeError, Result};
use rand::distributions::WeightedIndex;
use rand::seq::index;
use rand::Rng;

/// Roulette wheel over a fitness vector: probability proportional to fitness.
/// Negative fitness counts as zero.
pub fn roulette_wheel(fitness: &[f64]) -> Result<WeightedIndex<f64>> {
    WeightedIndex::new(fitness.iter().map(|f| f.max(0.0)))
        .map_err(|e| GenetradeError::Configuration(format!("Fitness is not selectable: {}", e)))
}

/// Draw `amount` distinct indices, each draw proportional to the fitness still in the pool.
///
/// Once the remaining mass is zero the rest are drawn uniformly.
pub fn roulette_sample_distinct<R: Rng>(
    fitness: &[f64],
    amount: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if amount > fitness.len() {
        return Err(GenetradeError::InsufficientSurvivors {
            eligible: fitness.len(),
            required: amount,
        });
    }

    let mut pool: Vec<(usize, f64)> = fitness
        .iter()
        .enumerate()
        .map(|(i, f)| (i, f.max(0.0)))
        .collect();
    let mut chosen = Vec::with_capacity(amount);

    for _ in 0..amount {
        let mass: f64 = pool.iter().map(|(_, f)| f).sum();
        let position = if mass > 0.0 {
            let mut spin = rng.gen::<f64>() * mass;
            let mut picked = None;
            for (pos, (_, f)) in pool.iter().enumerate() {
                if *f <= 0.0 {
                    continue;
                }
                spin -= f;
                picked = Some(pos);
                if spin <= 0.0 {
                    break;
                }
            }
            // rounding can leave spin marginally positive; the last weighted entry takes it
            picked.unwrap_or(0)
        } else {
            rng.gen_range(0..pool.len())
        };
        chosen.push(pool.swap_remove(position).0);
    }

    Ok(chosen)
}

/// Draw `amount` distinct indices out of `len` uniformly.
pub fn uniform_sample_distinct<R: Rng>(len: usize, amount: usize, rng: &mut R) -> Result<Vec<usize>> {
    if amount > len {
        return Err(GenetradeError::InsufficientSurvivors {
            eligible: len,
            required: amount,
        });
    }
    Ok(index::sample(rng, len, amount).into_vec())
}
