use crate::error::{FlareError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// Indexy riadkov trénovacej a testovacej časti
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratégia delenia datasetu na trénovaciu a testovaciu časť
pub trait SplitPolicy: fmt::Debug {
    fn get_name(&self) -> &str;

    fn split(&self, n_samples: usize) -> Result<SplitIndices>;
}

fn check_partitions(cutoff: usize, n_samples: usize) -> Result<()> {
    if cutoff == 0 || cutoff >= n_samples {
        return Err(FlareError::Config(format!(
            "Delenie na {} trénovacích z {} riadkov necháva prázdnu časť",
            cutoff, n_samples
        )));
    }
    Ok(())
}

fn check_fraction(train_fraction: f64) -> Result<()> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(FlareError::Config(format!(
            "Podiel trénovacích dát musí byť v (0, 1), zadané {}",
            train_fraction
        )));
    }
    Ok(())
}

fn fraction_cutoff(train_fraction: f64, n_samples: usize) -> usize {
    (n_samples as f64 * train_fraction).round() as usize
}

/// Pevná hranica: prvých `train_rows` riadkov je trénovacích, zvyšok testovacích
#[derive(Debug, Clone)]
pub struct PositionalSplit {
    pub train_rows: usize,
}

impl PositionalSplit {
    pub fn new(train_rows: usize) -> Self {
        Self { train_rows }
    }
}

impl SplitPolicy for PositionalSplit {
    fn get_name(&self) -> &str {
        "positional"
    }

    fn split(&self, n_samples: usize) -> Result<SplitIndices> {
        check_partitions(self.train_rows, n_samples)?;
        Ok(SplitIndices {
            train: (0..self.train_rows).collect(),
            test: (self.train_rows..n_samples).collect(),
        })
    }
}

/// Pozičná hranica daná podielom riadkov
#[derive(Debug, Clone)]
pub struct FractionSplit {
    pub train_fraction: f64,
}

impl FractionSplit {
    pub fn new(train_fraction: f64) -> Result<Self> {
        check_fraction(train_fraction)?;
        Ok(Self { train_fraction })
    }
}

impl SplitPolicy for FractionSplit {
    fn get_name(&self) -> &str {
        "fraction"
    }

    fn split(&self, n_samples: usize) -> Result<SplitIndices> {
        PositionalSplit::new(fraction_cutoff(self.train_fraction, n_samples)).split(n_samples)
    }
}

/// Náhodné premiešanie so seedom, potom hranica daná podielom
#[derive(Debug, Clone)]
pub struct ShuffledSplit {
    pub train_fraction: f64,
    pub seed: u64,
}

impl ShuffledSplit {
    pub fn new(train_fraction: f64, seed: u64) -> Result<Self> {
        check_fraction(train_fraction)?;
        Ok(Self { train_fraction, seed })
    }
}

impl SplitPolicy for ShuffledSplit {
    fn get_name(&self) -> &str {
        "shuffled"
    }

    fn split(&self, n_samples: usize) -> Result<SplitIndices> {
        let cutoff = fraction_cutoff(self.train_fraction, n_samples);
        check_partitions(cutoff, n_samples)?;

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let test = indices.split_off(cutoff);
        Ok(SplitIndices { train: indices, test })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_split_keeps_order() {
        let split = PositionalSplit::new(3).split(5).unwrap();
        assert_eq!(split.train, vec![0, 1, 2]);
        assert_eq!(split.test, vec![3, 4]);
    }

    #[test]
    fn empty_partition_is_rejected() {
        assert!(PositionalSplit::new(0).split(5).is_err());
        assert!(PositionalSplit::new(5).split(5).is_err());
        assert!(FractionSplit::new(0.9).unwrap().split(2).is_err());
        assert!(FractionSplit::new(1.0).is_err());
        assert!(ShuffledSplit::new(f64::NAN, 1).is_err());
    }

    #[test]
    fn fraction_split_rounds_cutoff() {
        let split = FractionSplit::new(0.75).unwrap().split(10).unwrap();
        assert_eq!(split.train.len(), 8);
        assert_eq!(split.test, vec![8, 9]);
    }

    #[test]
    fn shuffled_split_is_reproducible_partition() {
        let policy = ShuffledSplit::new(0.5, 7).unwrap();
        let first = policy.split(20).unwrap();
        let second = policy.split(20).unwrap();
        assert_eq!(first, second);

        let mut all: Vec<usize> = first.train.iter().chain(&first.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
        assert_eq!(first.train.len(), 10);
    }
}
