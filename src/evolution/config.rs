//! Run configuration.
//!
//! [`EvolutionConfig`] holds the construction-time parameters of a run:
//! population size, genome length, rates, generation count, and seed.

use super::organisms::BitString;
use super::population::Population;
use crate::error::EvolutionError;
use crate::random::{self, entropy_seed, EvolutionRng};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for an evolution run.
///
/// # Defaults
///
/// ```
/// use u_evolve::evolution::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::evolution::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_birth_rate(0.3)
///     .with_death_rate(0.3)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvolutionConfig {
    /// Number of organisms in the seed population.
    pub population_size: usize,

    /// Number of genes per organism.
    pub genome_length: usize,

    /// Births per organism (fraction of the population size).
    ///
    /// Each birth consumes two parents, so at most half the population
    /// breeds. Values of 1.0 and above select the whole population.
    pub birth_rate: f64,

    /// Deaths per organism (fraction of the population size).
    pub death_rate: f64,

    /// Number of generations to run. There is no early exit.
    pub generations: usize,

    /// Random seed for reproducibility, read by [`EvolutionConfig::create_rng`].
    ///
    /// `None` draws a seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            genome_length: 100,
            birth_rate: 0.4,
            death_rate: 0.4,
            generations: 100,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the seed population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of genes per organism.
    pub fn with_genome_length(mut self, n: usize) -> Self {
        self.genome_length = n;
        self
    }

    /// Sets the birth rate. Negative values clamp to 0.
    pub fn with_birth_rate(mut self, rate: f64) -> Self {
        self.birth_rate = rate.max(0.0);
        self
    }

    /// Sets the death rate. Negative values clamp to 0.
    pub fn with_death_rate(mut self, rate: f64) -> Self {
        self.death_rate = rate.max(0.0);
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Zero population size and zero generations are valid (degenerate)
    /// runs; a zero-length genome cannot be crossed over.
    pub fn validate(&self) -> Result<(), EvolutionError> {
        check_rate("birth_rate", self.birth_rate)?;
        check_rate("death_rate", self.death_rate)?;
        if self.genome_length == 0 {
            return Err(EvolutionError::EmptyGenome);
        }
        Ok(())
    }

    /// Creates the generator for a run from [`seed`](Self::seed).
    ///
    /// Without a seed, one is drawn from OS entropy. The seed in use is
    /// logged at `info` so an unseeded run can be replayed.
    pub fn create_rng(&self) -> EvolutionRng {
        let seed = self.seed.unwrap_or_else(entropy_seed);
        log::info!("using seed {seed}");
        random::create_rng(seed)
    }

    /// Builds a population of random [`BitString`] organisms.
    pub fn bit_string_population<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<Population<BitString>, EvolutionError> {
        self.validate()?;
        let len = self.genome_length;
        Ok(Population::random(
            self.population_size,
            self.birth_rate,
            self.death_rate,
            rng,
            |rng| BitString::random(len, rng),
        ))
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), EvolutionError> {
    if value.is_nan() || value < 0.0 {
        return Err(EvolutionError::InvalidRate { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::Organism;
    use crate::random::create_rng;

    #[test]
    fn test_default_config() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.genome_length, 100);
        assert!((config.birth_rate - 0.4).abs() < 1e-10);
        assert!((config.death_rate - 0.4).abs() < 1e-10);
        assert_eq!(config.generations, 100);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvolutionConfig::default()
            .with_population_size(4)
            .with_genome_length(3)
            .with_birth_rate(0.5)
            .with_death_rate(0.25)
            .with_generations(7)
            .with_seed(42);

        assert_eq!(config.population_size, 4);
        assert_eq!(config.genome_length, 3);
        assert!((config.birth_rate - 0.5).abs() < 1e-10);
        assert!((config.death_rate - 0.25).abs() < 1e-10);
        assert_eq!(config.generations, 7);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_negative_rates() {
        let config = EvolutionConfig::default()
            .with_birth_rate(-1.0)
            .with_death_rate(-0.1);
        assert_eq!(config.birth_rate, 0.0);
        assert_eq!(config.death_rate, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rates_above_one_are_valid() {
        let config = EvolutionConfig::default()
            .with_birth_rate(2.0)
            .with_death_rate(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_nan_rate() {
        let config = EvolutionConfig {
            birth_rate: f64::NAN,
            ..EvolutionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EvolutionError::InvalidRate { name: "birth_rate", .. })
        ));
    }

    #[test]
    fn test_validate_negative_rate_set_directly() {
        let config = EvolutionConfig {
            death_rate: -0.5,
            ..EvolutionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EvolutionError::InvalidRate { name: "death_rate", .. })
        ));
    }

    #[test]
    fn test_validate_empty_genome() {
        let config = EvolutionConfig::default().with_genome_length(0);
        assert_eq!(config.validate(), Err(EvolutionError::EmptyGenome));
    }

    #[test]
    fn test_zero_population_and_generations_are_valid() {
        let config = EvolutionConfig::default()
            .with_population_size(0)
            .with_generations(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bit_string_population() {
        let config = EvolutionConfig::default()
            .with_population_size(12)
            .with_genome_length(9);
        let mut rng = create_rng(42);
        let pop = config.bit_string_population(&mut rng).unwrap();
        assert_eq!(pop.len(), 12);
        assert!(pop.organisms().iter().all(|o| o.len() == 9));
        assert!(pop.organisms().iter().all(|o| o.fitness() <= 9));
    }

    #[test]
    fn test_seed_drives_population() {
        let config = EvolutionConfig::default()
            .with_population_size(12)
            .with_genome_length(32);
        let a = config.clone().with_seed(1);
        let b = config.clone().with_seed(1);
        let c = config.with_seed(2);

        let pop_a = a.bit_string_population(&mut a.create_rng()).unwrap();
        let pop_b = b.bit_string_population(&mut b.create_rng()).unwrap();
        let pop_c = c.bit_string_population(&mut c.create_rng()).unwrap();
        assert_eq!(pop_a.organisms(), pop_b.organisms());
        assert_ne!(pop_a.organisms(), pop_c.organisms());
    }

    #[test]
    fn test_unseeded_config_creates_rng() {
        let config = EvolutionConfig::default()
            .with_population_size(5)
            .with_genome_length(4);
        assert!(config.seed.is_none());
        let pop = config.bit_string_population(&mut config.create_rng()).unwrap();
        assert_eq!(pop.len(), 5);
    }

    #[test]
    fn test_bit_string_population_rejects_invalid() {
        let config = EvolutionConfig::default().with_genome_length(0);
        let mut rng = create_rng(42);
        assert!(config.bit_string_population(&mut rng).is_err());
    }
}
