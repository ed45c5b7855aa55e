//! Concrete organism representations.
//!
//! - [`BitString`]: fixed-length binary genes, fitness = number of set bits
//!   (the OneMax problem).
//! - [`RealVector`]: fixed-length real genes, fitness = negated sphere
//!   function, maximal at the origin.
//! - [`Genome`]: a closed sum over the representations above, for
//!   populations that are assembled at runtime. Crossing two different
//!   kinds is rejected with [`EvolutionError::IncompatibleKinds`].
//!
//! All three use the identity mutation.

use super::operators::{single_point_crossover, splice_at};
use super::types::Organism;
use crate::error::EvolutionError;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fixed-length sequence of binary genes.
///
/// Deserialized genes are normalized the same way as [`BitString::from_genes`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawBitString"))]
pub struct BitString {
    genes: Vec<u8>,
}

/// Wire form of [`BitString`] before normalization.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBitString {
    genes: Vec<u8>,
}

#[cfg(feature = "serde")]
impl From<RawBitString> for BitString {
    fn from(raw: RawBitString) -> Self {
        Self::from_genes(raw.genes)
    }
}

impl BitString {
    /// Creates a bit string whose genes are independently 0 or 1 with
    /// equal probability.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let genes = (0..len).map(|_| rng.random_range(0..2u8)).collect();
        Self { genes }
    }

    /// Creates a bit string from explicit genes. Any non-zero gene is
    /// stored as 1.
    pub fn from_genes<I: IntoIterator<Item = u8>>(genes: I) -> Self {
        let genes = genes.into_iter().map(|g| u8::from(g != 0)).collect();
        Self { genes }
    }

    /// The genes, each 0 or 1.
    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the bit string has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Child made of `self[..index]` followed by `peer[index..]`.
    pub fn crossover_at(&self, peer: &Self, index: usize) -> Result<Self, EvolutionError> {
        splice_at(&self.genes, &peer.genes, index).map(|genes| Self { genes })
    }
}

impl Organism for BitString {
    type Fitness = usize;

    fn fitness(&self) -> usize {
        self.genes.iter().map(|&g| g as usize).sum()
    }

    fn crossover<R: Rng>(&self, peer: &Self, rng: &mut R) -> Result<Self, EvolutionError> {
        single_point_crossover(&self.genes, &peer.genes, rng).map(|genes| Self { genes })
    }
}

impl std::fmt::Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for g in &self.genes {
            write!(f, "{g}")?;
        }
        Ok(())
    }
}

/// A fixed-length vector of real genes.
///
/// Fitness is `-Σ xᵢ²`, so the optimum (0.0) sits at the origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RealVector {
    genes: Vec<f64>,
}

impl RealVector {
    /// Creates a vector with genes drawn uniformly from `[lo, hi)`.
    ///
    /// # Panics
    /// Panics if `lo >= hi`.
    pub fn random<R: Rng>(len: usize, lo: f64, hi: f64, rng: &mut R) -> Self {
        let genes = (0..len).map(|_| rng.random_range(lo..hi)).collect();
        Self { genes }
    }

    /// Creates a vector from explicit genes.
    pub fn from_genes(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    /// The genes.
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the vector has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl Organism for RealVector {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        -self.genes.iter().map(|x| x * x).sum::<f64>()
    }

    fn crossover<R: Rng>(&self, peer: &Self, rng: &mut R) -> Result<Self, EvolutionError> {
        single_point_crossover(&self.genes, &peer.genes, rng).map(|genes| Self { genes })
    }
}

/// An organism whose representation is chosen at runtime.
///
/// All kinds report fitness as `f64` so they can share one population;
/// breeding, however, only works within a kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Genome {
    /// A [`BitString`]; fitness is its bit count as `f64`.
    Bits(BitString),
    /// A [`RealVector`].
    Real(RealVector),
}

impl Genome {
    /// Short name of the representation, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Genome::Bits(_) => "bit-string",
            Genome::Real(_) => "real-vector",
        }
    }
}

impl From<BitString> for Genome {
    fn from(bits: BitString) -> Self {
        Genome::Bits(bits)
    }
}

impl From<RealVector> for Genome {
    fn from(real: RealVector) -> Self {
        Genome::Real(real)
    }
}

impl Organism for Genome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        match self {
            Genome::Bits(b) => b.fitness() as f64,
            Genome::Real(r) => r.fitness(),
        }
    }

    fn crossover<R: Rng>(&self, peer: &Self, rng: &mut R) -> Result<Self, EvolutionError> {
        match (self, peer) {
            (Genome::Bits(a), Genome::Bits(b)) => a.crossover(b, rng).map(Genome::Bits),
            (Genome::Real(a), Genome::Real(b)) => a.crossover(b, rng).map(Genome::Real),
            _ => Err(EvolutionError::IncompatibleKinds {
                left: self.kind(),
                right: peer.kind(),
            }),
        }
    }

    fn mutate<R: Rng>(self, rng: &mut R) -> Self {
        match self {
            Genome::Bits(b) => Genome::Bits(b.mutate(rng)),
            Genome::Real(r) => Genome::Real(r.mutate(rng)),
        }
    }
}
