//! Generic crossover operators over gene slices.
//!
//! These operate on `&[T]` gene sequences and are representation-agnostic:
//! bit strings, real vectors, and any fixed-length encoding can use them.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: splice two parents at a random index
//! - [`splice_at`]: the same splice at a caller-chosen index
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*

use crate::error::EvolutionError;
use rand::Rng;

/// Single-point crossover.
///
/// Draws a split index uniformly from `[0, n)` and returns
/// `parent1[..index] ++ parent2[index..]`. An index of 0 yields a copy of
/// `parent2`; the last gene always comes from `parent2`.
///
/// Empty parents produce an empty child without drawing from `rng`.
///
/// # Errors
/// [`EvolutionError::LengthMismatch`] if the parents differ in length.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn single_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> Result<Vec<T>, EvolutionError> {
    check_lengths(parent1, parent2)?;
    if parent1.is_empty() {
        return Ok(Vec::new());
    }
    let index = rng.random_range(0..parent1.len());
    log::trace!("single-point crossover at {index}/{}", parent1.len());
    splice_at(parent1, parent2, index)
}

/// Deterministic splice: `parent1[..index] ++ parent2[index..]`.
///
/// `index` may equal the length, in which case the child is a copy of
/// `parent1`.
///
/// # Errors
/// [`EvolutionError::LengthMismatch`] if the parents differ in length.
///
/// # Panics
/// Panics if `index > parent1.len()`.
pub fn splice_at<T: Clone>(
    parent1: &[T],
    parent2: &[T],
    index: usize,
) -> Result<Vec<T>, EvolutionError> {
    check_lengths(parent1, parent2)?;
    assert!(
        index <= parent1.len(),
        "crossover index {index} out of bounds for length {}",
        parent1.len()
    );

    let mut child = Vec::with_capacity(parent1.len());
    child.extend_from_slice(&parent1[..index]);
    child.extend_from_slice(&parent2[index..]);
    Ok(child)
}

fn check_lengths<T>(parent1: &[T], parent2: &[T]) -> Result<(), EvolutionError> {
    if parent1.len() != parent2.len() {
        return Err(EvolutionError::LengthMismatch {
            left: parent1.len(),
            right: parent2.len(),
        });
    }
    Ok(())
}
