//! Generational evolutionary optimizer.
//!
//! Maintains a population of candidate solutions ("organisms"), breeds the
//! fittest each generation, culls the weakest, and tracks the best solution
//! found.
//!
//! - [`evolution`]: the engine: organism traits, population policy, and the
//!   generational loop, plus bit-string and real-vector organisms.
//! - [`random`]: the seedable generator passed explicitly through a run.
//! - [`error`]: the structured error type.
//!
//! # Example
//!
//! ```
//! use u_evolve::evolution::{EvolutionConfig, EvolutionRunner};
//! use u_evolve::random::create_rng;
//!
//! let config = EvolutionConfig::default()
//!     .with_population_size(50)
//!     .with_genome_length(32)
//!     .with_generations(20);
//! let mut rng = create_rng(42);
//! let mut population = config.bit_string_population(&mut rng).unwrap();
//! let result = EvolutionRunner::run(&mut population, config.generations, &mut rng).unwrap();
//! assert_eq!(result.value_history.len(), 21);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod evolution;
pub mod random;
