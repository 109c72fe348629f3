use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Record};
use crate::error::{Error, Result};

/// The `(count, seed)` pair that identifies a generated dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationParams {
    pub count: usize,
    pub seed: u64,
}

impl GenerationParams {
    pub fn new(count: i64, seed: u64) -> Result<Self> {
        let count = usize::try_from(count).map_err(|_| {
            Error::InvalidArgument(format!("point count must be non-negative, got {}", count))
        })?;
        Ok(Self { count, seed })
    }

    /// Draw `count` standard normal `y` values from a generator seeded with
    /// `seed`, then set `x = linspace(y[0], count + 1, count) * mean(y)`.
    pub fn generate(&self) -> Dataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let y: Vec<f64> = (&mut rng)
            .sample_iter::<f64, _>(StandardNormal)
            .take(self.count)
            .collect();

        let Some(&first) = y.first() else {
            return Dataset::default();
        };
        let mean = y.iter().sum::<f64>() / y.len() as f64;

        linspace(first, (self.count + 1) as f64, self.count)
            .into_iter()
            .zip(y)
            .map(|(x, y)| Record::new(x * mean, y))
            .collect()
    }
}

/// Generate the synthetic dataset for a point count and seed.
///
/// Same inputs give a bit-identical dataset on every call.
pub fn generate(count: i64, seed: u64) -> Result<Dataset> {
    Ok(GenerationParams::new(count, seed)?.generate())
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// A single value is `start`; with two or more the last one is exactly `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return std::iter::repeat(start).take(n).collect();
    }
    let step = (stop - start) / (n - 1) as f64;
    let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    if let Some(last) = values.last_mut() {
        *last = stop;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(250, 50).unwrap();
        let b = generate(250, 50).unwrap();
        assert_eq!(a.len(), 250);
        for (ra, rb) in a.iter().zip(b.iter()) {
            assert_eq!(ra.x.to_bits(), rb.x.to_bits());
            assert_eq!(ra.y.to_bits(), rb.y.to_bits());
        }
    }

    #[test]
    fn test_generate_five_from_seed_zero_is_stable() {
        let first = generate(5, 0).unwrap();
        for _ in 0..3 {
            assert_eq!(generate(5, 0).unwrap(), first);
        }
        assert_eq!(first.len(), 5);
        assert!(first.iter().all(|r| r.x.is_finite() && r.y.is_finite()));
    }

    #[test]
    fn test_generate_seeds_differ() {
        assert_ne!(generate(10, 1).unwrap(), generate(10, 2).unwrap());
    }

    #[test]
    fn test_generate_empty() {
        assert!(generate(0, 7).unwrap().is_empty());
    }

    #[test]
    fn test_generate_single_point() {
        let ds = generate(1, 3).unwrap();
        assert_eq!(ds.len(), 1);
        let r = ds.get(0).unwrap();
        // linspace degenerates to y[0] and the mean of one value is y[0]
        assert_eq!(r.x, r.y * r.y);
    }

    #[test]
    fn test_generate_x_formula() {
        let ds = generate(20, 11).unwrap();
        let y: Vec<f64> = ds.column(crate::Column::Y).collect();
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        let first = ds.get(0).unwrap();
        let last = ds.get(19).unwrap();
        assert!((first.x - y[0] * mean).abs() < 1e-12);
        assert!((last.x - 21.0 * mean).abs() < 1e-12);
    }

    #[test]
    fn test_generate_negative_count() {
        assert!(matches!(generate(-1, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.5, 9.0, 1), vec![2.5]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(-1.0, 1.0, 2), vec![-1.0, 1.0]);
    }
}
