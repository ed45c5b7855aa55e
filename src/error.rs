//! Error types for the evolution engine.

/// Errors raised by organisms, configuration, and the generational loop.
///
/// Crossover failures are fatal to a run: [`EvolutionRunner`] propagates
/// them without retrying. Callers decide whether to abort the process or
/// recover.
///
/// [`EvolutionRunner`]: crate::evolution::EvolutionRunner
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolutionError {
    /// Crossover between two representations of different length.
    #[error("cannot cross over organisms of different length ({left} vs {right})")]
    LengthMismatch {
        /// Length of the receiving organism.
        left: usize,
        /// Length of the peer.
        right: usize,
    },

    /// Crossover between two different concrete representations.
    #[error("cannot cross over a {left} organism with a {right} organism")]
    IncompatibleKinds {
        /// Kind of the receiving organism.
        left: &'static str,
        /// Kind of the peer.
        right: &'static str,
    },

    /// A birth or death rate that is negative or not a number.
    #[error("{name} must be a non-negative number, got {value}")]
    InvalidRate {
        /// Field name, `birth_rate` or `death_rate`.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A genome length of zero where random organisms must be generated.
    #[error("genome_length must be at least 1")]
    EmptyGenome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = EvolutionError::LengthMismatch { left: 3, right: 5 };
        assert_eq!(
            err.to_string(),
            "cannot cross over organisms of different length (3 vs 5)"
        );
    }

    #[test]
    fn test_incompatible_kinds_message() {
        let err = EvolutionError::IncompatibleKinds {
            left: "bit-string",
            right: "real-vector",
        };
        assert_eq!(
            err.to_string(),
            "cannot cross over a bit-string organism with a real-vector organism"
        );
    }
}
