use anyhow::{Context, Result};
use clap::Parser;
use gramevo::config::{AppConfig, ConfigManager};
use gramevo::engines::evaluation::{sample_points, SymbolicRegression};
use gramevo::engines::generation::{write_history, ConsoleProgressCallback, EvolutionEngine};
use gramevo::grammars::ArithmeticGrammar;
use gramevo::types::BinaryOp;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Stopping loss for the demo when neither the flag nor the config sets one
const DEFAULT_TARGET: f64 = 1e-6;

/// Symbolic regression of x^4 + x^3 + x^2 + x by grammatical evolution
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    generations: Option<usize>,

    #[arg(short, long)]
    population: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Evaluate on all cores
    #[arg(long)]
    parallel: bool,

    /// Number of sampled points of the target function
    #[arg(long, default_value_t = 200)]
    points: usize,

    /// Stop once the L1 loss drops below this [default: config, else 1e-6]
    #[arg(long)]
    target: Option<f64>,

    /// Write the per-generation log here as JSON lines
    #[arg(long)]
    history: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let manager = ConfigManager::new();
    if let Some(path) = &cli.config {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    manager.update(|config| {
        if let Some(generations) = cli.generations {
            config.evolution.generations = generations;
        }
        if let Some(population) = cli.population {
            config.evolution.population_size = population;
        }
        if cli.seed.is_some() {
            config.evolution.seed = cli.seed;
        }
        if cli.parallel {
            config.execution.parallel = true;
        }
        if cli.target.is_some() {
            config.evolution.target_score = cli.target;
        } else if config.evolution.target_score.is_none() {
            config.evolution.target_score = Some(DEFAULT_TARGET);
        }
    })?;
    Ok(manager.get())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let samples = sample_points(|x| x.powi(4) + x.powi(3) + x.powi(2) + x, cli.points, -1.0..1.0, &mut rng);

    let grammar = ArithmeticGrammar::univariate("x", &BinaryOp::ALL);
    let fitness = SymbolicRegression::new("x", samples);

    let mut engine = EvolutionEngine::from_app_config(&config, grammar, fitness)?;
    let outcome = engine.run(ConsoleProgressCallback)?;

    log::info!(
        "Best after {} generations (found in generation {}): SCORE={}",
        outcome.generations_run,
        outcome.best_generation + 1,
        outcome.best_score()
    );
    match outcome.best_phenotype() {
        Some(expr) => log::info!("\t{}", expr),
        None => log::warn!("No genome mapped to a valid expression"),
    }
    for (rank, elite) in outcome.hall_of_fame.iter().enumerate() {
        log::info!("\t\t#{}: {} -> {}", rank + 1, elite.canonical_string, elite.score);
    }

    if let Some(path) = &cli.history {
        write_history(path, &outcome.history)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
