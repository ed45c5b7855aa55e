//! The population: organisms plus birth and death rates.
//!
//! [`Population`] owns selection (elitist parent pool, shuffled pairing),
//! culling (weakest first), and aggregate statistics. Selection and
//! culling sort the backing storage in place; storage order carries no
//! meaning between calls.

use super::runner::GenerationStats;
use super::types::{compare, Organism};
use rand::Rng;
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An ordered collection of organisms evolving under fixed rates.
///
/// # Examples
///
/// ```
/// use u_evolve::evolution::{BitString, Population};
///
/// let organisms = vec![
///     BitString::from_genes([1, 1, 0]),
///     BitString::from_genes([1, 0, 0]),
///     BitString::from_genes([0, 0, 0]),
///     BitString::from_genes([1, 1, 1]),
/// ];
/// let pop = Population::new(organisms, 0.5, 0.5);
///
/// assert_eq!(pop.total_value(), 6);
/// assert_eq!(pop.best_fitness(), Some(3));
/// assert_eq!(pop.num_parents(), 4);
/// assert_eq!(pop.num_to_kill(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Population<O: Organism> {
    organisms: Vec<O>,
    birth_rate: f64,
    death_rate: f64,
}

impl<O: Organism> Population<O> {
    /// Creates a population from existing organisms.
    ///
    /// Negative or NaN rates are treated as 0. Rates above 1 are kept;
    /// the derived counts clamp to the population size.
    pub fn new(organisms: Vec<O>, birth_rate: f64, death_rate: f64) -> Self {
        Self {
            organisms,
            birth_rate: sanitize_rate(birth_rate),
            death_rate: sanitize_rate(death_rate),
        }
    }

    /// Creates `size` organisms with `factory` and wraps them in a population.
    pub fn random<R, F>(
        size: usize,
        birth_rate: f64,
        death_rate: f64,
        rng: &mut R,
        mut factory: F,
    ) -> Self
    where
        R: Rng,
        F: FnMut(&mut R) -> O,
    {
        let organisms = (0..size).map(|_| factory(rng)).collect();
        Self::new(organisms, birth_rate, death_rate)
    }

    /// Number of organisms.
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    /// Returns `true` if no organisms remain.
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// The organisms in current storage order.
    pub fn organisms(&self) -> &[O] {
        &self.organisms
    }

    /// Consumes the population, returning its organisms.
    pub fn into_organisms(self) -> Vec<O> {
        self.organisms
    }

    /// Fraction of the population size that sets the number of births.
    pub fn birth_rate(&self) -> f64 {
        self.birth_rate
    }

    /// Fraction of the population size culled per generation.
    pub fn death_rate(&self) -> f64 {
        self.death_rate
    }

    /// Number of parents selected per generation.
    ///
    /// `2 * floor(birth_rate * len)`, clamped to `len` and rounded down to
    /// an even count. Always even and never larger than [`len`](Self::len).
    pub fn num_parents(&self) -> usize {
        let n = self.organisms.len();
        let births = scaled_count(n, self.birth_rate);
        let parents = births.saturating_mul(2);
        if parents > n {
            n / 2 * 2
        } else {
            parents
        }
    }

    /// Number of organisms culled per generation: `floor(death_rate * len)`,
    /// clamped to `len`.
    pub fn num_to_kill(&self) -> usize {
        let n = self.organisms.len();
        scaled_count(n, self.death_rate).min(n)
    }

    /// Selects the breeding pool.
    ///
    /// Sorts the population by descending fitness, takes the top
    /// [`num_parents`](Self::num_parents) organisms, and shuffles them in
    /// place (for each `i` from low to high, swap with a uniform `j` in
    /// `[0, i]`). Consecutive pairs of the returned slice are the breeding
    /// pairs.
    pub fn select_parents<R: Rng>(&mut self, rng: &mut R) -> &[O] {
        let num_parents = self.num_parents();
        self.sort_by_fitness(|a, b| compare(b, a));

        let pool = &mut self.organisms[..num_parents];
        for i in 0..pool.len() {
            let j = rng.random_range(0..=i);
            pool.swap(i, j);
        }

        &self.organisms[..num_parents]
    }

    /// Removes the weakest organisms and returns how many were removed.
    ///
    /// Sorts by ascending fitness and drops the first
    /// [`num_to_kill`](Self::num_to_kill). Ties at the cut-off keep the
    /// order of the stable sort.
    pub fn kill_weakest(&mut self) -> usize {
        let num_to_kill = self.num_to_kill();
        self.sort_by_fitness(compare);
        self.organisms.drain(..num_to_kill);
        num_to_kill
    }

    /// Appends organisms (typically the children of a generation).
    pub fn extend<I: IntoIterator<Item = O>>(&mut self, children: I) {
        self.organisms.extend(children);
    }

    /// Sum of all fitness values.
    pub fn total_value(&self) -> O::Fitness {
        self.fitness_values().into_iter().sum()
    }

    /// The organism with the highest fitness, or `None` if empty.
    ///
    /// Ties go to the first maximal organism in storage order.
    pub fn best(&self) -> Option<&O> {
        let values = self.fitness_values();
        let mut best: Option<usize> = None;
        for (i, v) in values.iter().enumerate() {
            match best {
                Some(b) if compare(v, &values[b]) != Ordering::Greater => {}
                _ => best = Some(i),
            }
        }
        best.map(|i| &self.organisms[i])
    }

    /// Fitness of [`best`](Self::best).
    pub fn best_fitness(&self) -> Option<O::Fitness> {
        self.best().map(Organism::fitness)
    }

    /// Snapshot of size, total value and best fitness.
    pub fn stats(&self, generation: usize) -> GenerationStats<O::Fitness> {
        GenerationStats {
            generation,
            size: self.len(),
            total_value: self.total_value(),
            best_fitness: self.best_fitness(),
        }
    }

    /// Evaluates every organism once, in storage order.
    fn fitness_values(&self) -> Vec<O::Fitness> {
        #[cfg(feature = "parallel")]
        {
            self.organisms.par_iter().map(Organism::fitness).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.organisms.iter().map(Organism::fitness).collect()
        }
    }

    /// Stable sort of the storage by fitness, evaluating each organism once.
    fn sort_by_fitness<C>(&mut self, mut cmp: C)
    where
        C: FnMut(&O::Fitness, &O::Fitness) -> Ordering,
    {
        let values = self.fitness_values();
        let mut scored: Vec<(O::Fitness, O)> =
            values.into_iter().zip(self.organisms.drain(..)).collect();
        scored.sort_by(|a, b| cmp(&a.0, &b.0));
        self.organisms = scored.into_iter().map(|(_, o)| o).collect();
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.max(0.0)
    }
}

/// `floor(rate * n)`, saturating for very large rates.
fn scaled_count(n: usize, rate: f64) -> usize {
    // `as` saturates on overflow and maps NaN to 0.
    (n as f64 * rate).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::BitString;
    use crate::random::create_rng;

    fn scenario() -> Population<BitString> {
        let organisms = vec![
            BitString::from_genes([1, 1, 0]),
            BitString::from_genes([1, 0, 0]),
            BitString::from_genes([0, 0, 0]),
            BitString::from_genes([1, 1, 1]),
        ];
        Population::new(organisms, 0.5, 0.5)
    }

    fn with_fitness(values: &[usize], birth_rate: f64, death_rate: f64) -> Population<BitString> {
        let width = values.iter().copied().max().unwrap_or(0);
        let organisms = values
            .iter()
            .map(|&v| BitString::from_genes((0..width).map(|i| u8::from(i < v))))
            .collect();
        Population::new(organisms, birth_rate, death_rate)
    }

    fn fitnesses(pop: &Population<BitString>) -> Vec<usize> {
        pop.organisms().iter().map(Organism::fitness).collect()
    }

    #[test]
    fn test_scenario_aggregates() {
        let pop = scenario();
        assert_eq!(pop.len(), 4);
        assert_eq!(pop.total_value(), 6);
        assert_eq!(pop.best_fitness(), Some(3));
        assert_eq!(pop.num_parents(), 4);
        assert_eq!(pop.num_to_kill(), 2);
    }

    #[test]
    fn test_num_parents_clamps_to_even() {
        // 5 * 0.9 = 4 births -> 8 parents > 5 -> clamp to 5 -> round to 4
        assert_eq!(with_fitness(&[1, 1, 1, 1, 1], 0.9, 0.0).num_parents(), 4);
        // 5 * 0.4 = 2 births -> 4 parents
        assert_eq!(with_fitness(&[1, 1, 1, 1, 1], 0.4, 0.0).num_parents(), 4);
        // 10 * 0.25 = 2 births -> 4 parents
        assert_eq!(with_fitness(&[1; 10], 0.25, 0.0).num_parents(), 4);
    }

    #[test]
    fn test_single_organism_never_breeds() {
        let mut pop = with_fitness(&[3], 1.0, 1.0);
        assert_eq!(pop.num_parents(), 0);
        assert!(pop.num_to_kill() <= 1);
        let mut rng = create_rng(42);
        assert!(pop.select_parents(&mut rng).is_empty());
        assert_eq!(pop.len(), 1);
    }

    #[test]
    fn test_zero_rates() {
        let mut pop = with_fitness(&[1, 2, 3, 4], 0.0, 0.0);
        assert_eq!(pop.num_parents(), 0);
        assert_eq!(pop.num_to_kill(), 0);
        assert_eq!(pop.kill_weakest(), 0);
        assert_eq!(pop.len(), 4);
    }

    #[test]
    fn test_rates_above_one_clamp() {
        let mut pop = with_fitness(&[1, 2, 3, 4, 5], 3.0, 7.5);
        assert_eq!(pop.num_parents(), 4);
        assert_eq!(pop.num_to_kill(), 5);
        assert_eq!(pop.kill_weakest(), 5);
        assert!(pop.is_empty());
    }

    #[test]
    fn test_negative_and_nan_rates_are_zero() {
        let pop = with_fitness(&[1, 2], -0.5, f64::NAN);
        assert_eq!(pop.birth_rate(), 0.0);
        assert_eq!(pop.death_rate(), 0.0);
        assert_eq!(pop.num_parents(), 0);
        assert_eq!(pop.num_to_kill(), 0);
    }

    #[test]
    fn test_select_parents_takes_fittest() {
        let mut pop = with_fitness(&[0, 5, 2, 7, 1, 6], 0.35, 0.0);
        assert_eq!(pop.num_parents(), 4);
        let mut rng = create_rng(42);
        let mut parents: Vec<usize> = pop
            .select_parents(&mut rng)
            .iter()
            .map(Organism::fitness)
            .collect();
        parents.sort_unstable();
        assert_eq!(parents, vec![2, 5, 6, 7]);
        // Storage keeps its size; the tail is the rest in descending order.
        assert_eq!(pop.len(), 6);
        assert_eq!(&fitnesses(&pop)[4..], &[1, 0]);
    }

    #[test]
    fn test_select_parents_shuffles_pairing() {
        let values: Vec<usize> = (0..20).collect();
        let mut rng = create_rng(7);
        let mut seen_non_sorted = false;
        for _ in 0..10 {
            let mut pop = with_fitness(&values, 0.5, 0.0);
            let parents: Vec<usize> = pop
                .select_parents(&mut rng)
                .iter()
                .map(Organism::fitness)
                .collect();
            let mut sorted = parents.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            if parents != sorted {
                seen_non_sorted = true;
            }
        }
        assert!(seen_non_sorted, "shuffle should perturb the sorted order");
    }

    #[test]
    fn test_kill_weakest_removes_lowest() {
        let mut pop = scenario();
        assert_eq!(pop.kill_weakest(), 2);
        assert_eq!(fitnesses(&pop), vec![2, 3]);
    }

    #[test]
    fn test_extend_merges_children() {
        let mut pop = scenario();
        pop.kill_weakest();
        pop.extend(vec![BitString::from_genes([1, 1, 1])]);
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.total_value(), 8);
    }

    #[test]
    fn test_best_empty_is_none() {
        let pop: Population<BitString> = Population::new(Vec::new(), 0.5, 0.5);
        assert!(pop.best().is_none());
        assert!(pop.best_fitness().is_none());
        assert_eq!(pop.total_value(), 0);
    }

    #[test]
    fn test_best_tie_goes_to_first() {
        let organisms = vec![
            BitString::from_genes([0, 0]),
            BitString::from_genes([1, 0]),
            BitString::from_genes([0, 1]),
        ];
        let pop = Population::new(organisms, 0.0, 0.0);
        assert_eq!(pop.best().unwrap().genes(), &[1, 0]);
    }

    #[test]
    fn test_random_population() {
        let mut rng = create_rng(42);
        let pop = Population::random(10, 0.4, 0.4, &mut rng, |rng| BitString::random(8, rng));
        assert_eq!(pop.len(), 10);
        assert!(pop.organisms().iter().all(|o| o.len() == 8));
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = scenario().stats(0);
        assert_eq!(stats.generation, 0);
        assert_eq!(stats.size, 4);
        assert_eq!(stats.total_value, 6);
        assert_eq!(stats.best_fitness, Some(3));
    }
}
