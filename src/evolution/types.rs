//! Core trait definitions for the evolution engine.
//!
//! [`Organism`] is the contract between the generic [`Population`] engine
//! and a concrete candidate-solution representation. [`Fitness`] bounds
//! the scalar quality an organism reports.
//!
//! [`Population`]: super::Population

use crate::error::EvolutionError;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Marker trait for fitness values.
///
/// Higher fitness is considered better (maximization). Values must be
/// summable so a population can report its total value, and printable so
/// progress lines can show them verbatim.
///
/// Built-in implementations exist for the common integer and float types.
pub trait Fitness:
    PartialOrd + Copy + Send + Sync + Debug + Display + Sum + 'static
{
    /// Converts the fitness to `f64` for logging and history.
    fn to_f64(self) -> f64;
}

macro_rules! impl_fitness {
    ($($t:ty),*) => {
        $(
            impl Fitness for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_fitness!(usize, u32, u64, i32, i64, f32, f64);

/// Total order over fitness values; incomparable pairs (NaN) compare equal.
pub(crate) fn compare<F: Fitness>(a: &F, b: &F) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// A candidate solution in the population.
///
/// Fitness must be a pure function of the organism's state: the engine
/// may evaluate it any number of times, in any order, and (with the
/// `parallel` feature) from several threads.
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use u_evolve::error::EvolutionError;
/// use u_evolve::evolution::Organism;
///
/// #[derive(Clone, Debug)]
/// struct Coin(bool);
///
/// impl Organism for Coin {
///     type Fitness = u32;
///
///     fn fitness(&self) -> u32 {
///         self.0 as u32
///     }
///
///     fn crossover<R: Rng>(&self, peer: &Self, rng: &mut R) -> Result<Self, EvolutionError> {
///         Ok(if rng.random_bool(0.5) { self.clone() } else { peer.clone() })
///     }
/// }
/// ```
pub trait Organism: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the scalar quality of this organism.
    fn fitness(&self) -> Self::Fitness;

    /// Produces one child by recombining `self` with `peer`.
    ///
    /// Returns [`EvolutionError`] when the two representations are not
    /// compatible; implementations must never return a truncated or
    /// partially built child.
    fn crossover<R: Rng>(&self, peer: &Self, rng: &mut R) -> Result<Self, EvolutionError>;

    /// Returns a mutated version of this organism.
    ///
    /// The default implementation is the identity.
    fn mutate<R: Rng>(self, _rng: &mut R) -> Self {
        self
    }
}
