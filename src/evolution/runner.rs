//! Generational loop execution.
//!
//! [`EvolutionRunner`] drives a [`Population`] through a fixed number of
//! generations: select parents → crossover + mutate pairs → cull the
//! weakest → merge children → report.

use super::population::Population;
use super::types::{compare, Fitness, Organism};
use crate::error::EvolutionError;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::io::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate state of the population after a generation.
///
/// Formats as `Iteration: <i>; Size: <N>; Value: <V>; Best: <B>`, with
/// `none` for the best fitness of an empty population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationStats<F> {
    /// Generation index; 0 is the seed population.
    pub generation: usize,
    /// Number of organisms.
    pub size: usize,
    /// Sum of all fitness values.
    pub total_value: F,
    /// Highest fitness, or `None` when the population is empty.
    pub best_fitness: Option<F>,
}

impl<F: Fitness> fmt::Display for GenerationStats<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Iteration: {}; Size: {}; Value: {}; Best: ",
            self.generation, self.size, self.total_value
        )?;
        match self.best_fitness {
            Some(best) => write!(f, "{best}"),
            None => f.write_str("none"),
        }
    }
}

/// Births and deaths within one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Turnover {
    /// Children produced by crossover.
    pub born: usize,
    /// Organisms removed by culling.
    pub killed: usize,
}

impl fmt::Display for Turnover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} children born, {} organisms die", self.born, self.killed)
    }
}

/// One progress event.
///
/// The seed population (generation 0) carries no turnover. Every later
/// generation formats as two lines: the turnover, then the stats.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationReport<F> {
    /// Births and deaths of the generation just completed; `None` for the
    /// seed population.
    pub turnover: Option<Turnover>,

    /// Population state after the generation.
    pub stats: GenerationStats<F>,
}

impl<F: Fitness> fmt::Display for GenerationReport<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(turnover) = &self.turnover {
            writeln!(f, "{turnover}")?;
        }
        write!(f, "{}", self.stats)
    }
}

/// Receives a [`GenerationReport`] after generation 0 and after every
/// completed generation.
///
/// Observers are a side channel: they cannot influence the run. Any
/// `FnMut(&GenerationReport<F>)` closure is an observer.
pub trait GenerationObserver<F: Fitness> {
    /// Called once per report, in generation order.
    fn on_generation(&mut self, report: &GenerationReport<F>);
}

impl<F: Fitness, T: FnMut(&GenerationReport<F>)> GenerationObserver<F> for T {
    fn on_generation(&mut self, report: &GenerationReport<F>) {
        self(report)
    }
}

/// Writes every report as text lines to `W`.
///
/// Write failures are logged and otherwise ignored.
pub struct LineReporter<W: Write> {
    out: W,
}

impl<W: Write> LineReporter<W> {
    /// Creates a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineReporter<std::io::Stdout> {
    /// A reporter that prints to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<F: Fitness, W: Write> GenerationObserver<F> for LineReporter<W> {
    fn on_generation(&mut self, report: &GenerationReport<F>) {
        if let Err(err) = writeln!(self.out, "{report}") {
            log::warn!(
                "failed to write progress for generation {}: {err}",
                report.stats.generation
            );
        }
    }
}

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<O: Organism> {
    /// The best organism seen at any report point, or `None` if the
    /// population was empty throughout.
    pub best: Option<O>,

    /// Fitness of `best`.
    pub best_fitness: Option<O::Fitness>,

    /// Number of generations executed.
    pub generations: usize,

    /// Children produced over the whole run.
    pub total_born: usize,

    /// Organisms culled over the whole run.
    pub total_killed: usize,

    /// Total population value after each generation, starting with the
    /// seed population.
    pub value_history: Vec<f64>,

    /// Best fitness after each generation, starting with the seed
    /// population.
    pub best_history: Vec<Option<f64>>,
}

/// Executes the generational loop.
///
/// # Usage
///
/// ```
/// use u_evolve::evolution::{BitString, EvolutionRunner, Population};
/// use u_evolve::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let mut pop = Population::random(20, 0.4, 0.4, &mut rng, |rng| BitString::random(16, rng));
/// let result = EvolutionRunner::run(&mut pop, 10, &mut rng).unwrap();
/// assert_eq!(result.generations, 10);
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs `generations` generations without reporting.
    pub fn run<O, R>(
        population: &mut Population<O>,
        generations: usize,
        rng: &mut R,
    ) -> Result<EvolutionResult<O>, EvolutionError>
    where
        O: Organism,
        R: Rng,
    {
        let mut silent = |_: &GenerationReport<O::Fitness>| {};
        Self::run_with_observer(population, generations, rng, &mut silent)
    }

    /// Runs `generations` generations, reporting each to `observer`.
    ///
    /// # Errors
    /// Returns the first crossover error. The run stops at that point; the
    /// population keeps its size but may have been reordered by selection.
    pub fn run_with_observer<O, R, Obs>(
        population: &mut Population<O>,
        generations: usize,
        rng: &mut R,
        observer: &mut Obs,
    ) -> Result<EvolutionResult<O>, EvolutionError>
    where
        O: Organism,
        R: Rng,
        Obs: GenerationObserver<O::Fitness> + ?Sized,
    {
        log::info!(
            "starting evolution: {} organisms, birth rate {}, death rate {}, {} generations",
            population.len(),
            population.birth_rate(),
            population.death_rate(),
            generations
        );

        let mut tracker = Tracker::new(generations);
        let stats = population.stats(0);
        tracker.record(population, &stats);
        observer.on_generation(&GenerationReport {
            turnover: None,
            stats,
        });

        for generation in 1..=generations {
            let turnover = step(population, rng)?;
            tracker.total_born += turnover.born;
            tracker.total_killed += turnover.killed;

            let stats = population.stats(generation);
            log::debug!(
                "generation {generation}: {} born, {} killed, size {}, value {}",
                turnover.born,
                turnover.killed,
                stats.size,
                stats.total_value
            );
            tracker.record(population, &stats);
            observer.on_generation(&GenerationReport {
                turnover: Some(turnover),
                stats,
            });
        }

        let result = tracker.finish(generations);
        log::info!(
            "evolution finished after {} generations: best fitness {:?}",
            result.generations,
            result.best_fitness
        );
        Ok(result)
    }
}

/// One generation: breed the selected pairs, cull, merge.
fn step<O: Organism, R: Rng>(
    population: &mut Population<O>,
    rng: &mut R,
) -> Result<Turnover, EvolutionError> {
    let parents = population.select_parents(rng);
    let mut children = Vec::with_capacity(parents.len() / 2);
    for pair in parents.chunks_exact(2) {
        let child = pair[0].crossover(&pair[1], rng)?;
        children.push(child.mutate(rng));
    }

    let killed = population.kill_weakest();
    let born = children.len();
    population.extend(children);

    Ok(Turnover { born, killed })
}

/// Accumulates the run result across report points.
struct Tracker<O: Organism> {
    best: Option<O>,
    total_born: usize,
    total_killed: usize,
    value_history: Vec<f64>,
    best_history: Vec<Option<f64>>,
}

impl<O: Organism> Tracker<O> {
    fn new(generations: usize) -> Self {
        Self {
            best: None,
            total_born: 0,
            total_killed: 0,
            value_history: Vec::with_capacity(generations + 1),
            best_history: Vec::with_capacity(generations + 1),
        }
    }

    fn record(&mut self, population: &Population<O>, stats: &GenerationStats<O::Fitness>) {
        self.value_history.push(stats.total_value.to_f64());
        self.best_history.push(stats.best_fitness.map(Fitness::to_f64));

        if let Some(candidate) = population.best() {
            let improved = match &self.best {
                Some(best) => {
                    compare(&candidate.fitness(), &best.fitness()) == Ordering::Greater
                }
                None => true,
            };
            if improved {
                self.best = Some(candidate.clone());
            }
        }
    }

    fn finish(self, generations: usize) -> EvolutionResult<O> {
        EvolutionResult {
            best_fitness: self.best.as_ref().map(Organism::fitness),
            best: self.best,
            generations,
            total_born: self.total_born,
            total_killed: self.total_killed,
            value_history: self.value_history,
            best_history: self.best_history,
        }
    }
}
