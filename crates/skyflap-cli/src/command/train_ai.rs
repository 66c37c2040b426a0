use std::path::PathBuf;

use anyhow::Context as _;
use skyflap_engine::{Seed, WorldConfig};
use skyflap_training::{EvolutionEngine, EvolutionParams};

use crate::{command, model::AiModel, util::Output};

/// Headless episodes stop here unless `--episode-tick-limit` says otherwise,
/// so a population that learned to fly forever still finishes.
const DEFAULT_EPISODE_TICK_LIMIT: u64 = 50_000;

/// Evolution settings shared by `evolve` and `train-ai`.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvolutionArg {
    /// Number of actors per generation
    #[arg(long, default_value_t = EvolutionParams::default().population_size)]
    population: usize,
    /// Fraction of the fittest actors kept as parents
    #[arg(long, default_value_t = EvolutionParams::default().selection)]
    selection: f64,
    /// Probability that a single weight mutates
    #[arg(long, default_value_t = EvolutionParams::default().mutation_probability)]
    mutation_probability: f32,
    /// Maximum relative change of a mutated weight
    #[arg(long, default_value_t = EvolutionParams::default().mutation_factor)]
    mutation_factor: f32,
    /// End an episode after this many ticks
    #[arg(long)]
    episode_tick_limit: Option<u64>,
    /// Training seed as 32 hex digits (random if omitted)
    #[arg(long)]
    pub(super) seed: Option<Seed>,
}

impl EvolutionArg {
    pub(super) fn params(&self, default_tick_limit: Option<u64>) -> EvolutionParams {
        EvolutionParams {
            population_size: self.population,
            selection: self.selection,
            mutation_probability: self.mutation_probability,
            mutation_factor: self.mutation_factor,
            episode_tick_limit: self.episode_tick_limit.or(default_tick_limit),
        }
    }

    /// Builds the engine, drawing a seed if none was given.
    pub(super) fn engine(
        &self,
        default_tick_limit: Option<u64>,
    ) -> anyhow::Result<(EvolutionEngine, Seed)> {
        let seed = command::seed_or_random(self.seed);
        let engine = EvolutionEngine::new(
            self.params(default_tick_limit),
            WorldConfig::default(),
            seed,
        )
        .context("Invalid evolution settings")?;
        Ok((engine, seed))
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainAiArg {
    #[clap(flatten)]
    pub(super) evolution: EvolutionArg,
    /// Number of generations to train
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    generations: u64,
    /// Name stored in the model file
    #[arg(long, default_value = "evolved")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainAiArg) -> anyhow::Result<()> {
    command::init_logger();
    let TrainAiArg {
        evolution,
        generations,
        name,
        output,
    } = arg;

    let (mut engine, seed) = evolution.engine(Some(DEFAULT_EPISODE_TICK_LIMIT))?;
    log::info!(
        "training {} actors for {generations} generations, seed {seed}",
        engine.params().population_size
    );

    let mut best_score = 0;
    for _ in 0..*generations {
        let summary = engine.run_generation();
        best_score = best_score.max(summary.best_score);
    }

    let champion = engine
        .champion()
        .context("Training ended without a completed generation")?;
    let model = AiModel::from_champion(name.clone(), seed, champion);
    Output::save_json(&model, output.as_deref())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Generation: {}", model.generation);
    eprintln!("  Champion score: {}", model.best_score);
    eprintln!("  Best score of the run: {best_score}");
    eprintln!("  Seed: {seed}");

    Ok(())
}
