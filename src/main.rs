use clap::Parser;

use u_evolve::evolution::{EvolutionConfig, EvolutionRunner, LineReporter};

/// Evolves random bit strings toward all ones and prints progress.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of organisms in the seed population
    #[arg(long, default_value_t = 100)]
    population: usize,

    /// Number of genes per organism
    #[arg(long, default_value_t = 100)]
    length: usize,

    /// Births per organism per generation
    #[arg(long, default_value_t = 0.4)]
    birth_rate: f64,

    /// Deaths per organism per generation
    #[arg(long, default_value_t = 0.4)]
    death_rate: f64,

    /// Number of generations to run
    #[arg(long, default_value_t = 100)]
    generations: usize,

    /// Random seed; drawn from OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = EvolutionConfig {
        seed: args.seed,
        ..EvolutionConfig::default()
    }
    .with_population_size(args.population)
    .with_genome_length(args.length)
    .with_birth_rate(args.birth_rate)
    .with_death_rate(args.death_rate)
    .with_generations(args.generations);

    let mut rng = config.create_rng();
    let mut population = config.bit_string_population(&mut rng)?;
    let mut reporter = LineReporter::stdout();
    let result = EvolutionRunner::run_with_observer(
        &mut population,
        config.generations,
        &mut rng,
        &mut reporter,
    )?;

    if let Some(best) = &result.best {
        log::info!("best organism: {best}");
    }
    Ok(())
}
