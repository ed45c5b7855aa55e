//! Generational evolution engine.
//!
//! A population of organisms is evolved for a fixed number of generations.
//! Each generation the fittest fraction (set by the birth rate) is paired
//! at random and bred by crossover and mutation, the weakest fraction (set
//! by the death rate) is culled, and the children join the survivors.
//!
//! # Core Traits
//!
//! - [`Organism`]: A candidate solution: fitness, crossover, mutation
//! - [`Fitness`]: Scalar quality; higher is better
//!
//! # Key Types
//!
//! - [`Population`]: Organisms plus rates; selection, culling, statistics
//! - [`EvolutionRunner`]: Executes the generational loop
//! - [`EvolutionConfig`]: Construction-time parameters
//! - [`BitString`], [`RealVector`], [`Genome`]: Bundled representations
//!
//! # Submodules
//!
//! - [`operators`]: Generic single-point crossover over gene slices

mod config;
pub mod operators;
mod organisms;
mod population;
mod runner;
mod types;

pub use config::EvolutionConfig;
pub use organisms::{BitString, Genome, RealVector};
pub use population::Population;
pub use runner::{
    EvolutionResult, EvolutionRunner, GenerationObserver, GenerationReport, GenerationStats,
    LineReporter, Turnover,
};
pub use types::{Fitness, Organism};
