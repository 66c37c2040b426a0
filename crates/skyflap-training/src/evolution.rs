//! Generation loop of the population trainer.
//!
//! The [`EvolutionEngine`] is a three-phase state machine:
//!
//! ```text
//! SpawnGeneration -> RunEpisode (one call per tick) -> SelectAndBreed -> SpawnGeneration
//! ```
//!
//! - **SpawnGeneration** places every actor at the spawn point and draws a
//!   fresh obstacle layout shared by the whole population.
//! - **RunEpisode** advances the shared world one tick. Every live actor is
//!   tested for collision, scored, and queries its model; the obstacles then
//!   advance once and every live actor moves. The episode ends when the last
//!   actor dies.
//! - **SelectAndBreed** ranks actors by reverse death order, keeps the top
//!   fraction as parents and fills the next population with mutated copies.
//!
//! Each call to [`EvolutionEngine::step`] performs exactly one unit of work,
//! so a frame-paced driver can render between ticks.
//!
//! # Example
//!
//! ```
//! use skyflap_engine::{Seed, WorldConfig};
//! use skyflap_training::{EvolutionEngine, EvolutionParams};
//!
//! let params = EvolutionParams {
//!     population_size: 20,
//!     episode_tick_limit: Some(500),
//!     ..EvolutionParams::default()
//! };
//! let mut engine = EvolutionEngine::new(params, WorldConfig::default(), Seed::from_u64(1)).unwrap();
//! let summary = engine.run_generation();
//! assert_eq!(summary.generation, 0);
//! assert_eq!(engine.population().len(), 20);
//! ```

use std::fmt;

use rand::Rng as _;
use rand_pcg::Pcg32;
use skyflap_engine::{ActorMode, ActorState, Ground, PipeField, Seed, WorldConfig, collided};
use skyflap_strategy::{DecisionModel, Observation};

use crate::{episode::EpisodeState, population::Population};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum EvolutionConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("selection fraction must be within [0, 1], got {selection}")]
    SelectionOutOfRange { selection: f64 },
    #[display("mutation probability must be within [0, 1], got {probability}")]
    MutationProbabilityOutOfRange { probability: f32 },
    #[display("mutation factor must be finite and non-negative, got {factor}")]
    InvalidMutationFactor { factor: f32 },
    #[display("episode tick limit must be at least 1")]
    ZeroTickLimit,
    #[display("population has {actual} models, expected {expected}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
}

/// Tunables of the population trainer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionParams {
    pub population_size: usize,
    /// Fraction of the population, fittest first, kept as parents.
    pub selection: f64,
    /// Per-weight probability of mutation.
    pub mutation_probability: f32,
    /// Maximum relative change of a mutated weight.
    pub mutation_factor: f32,
    /// Ends an episode after this many ticks, killing the remaining actors
    /// in index order.
    pub episode_tick_limit: Option<u64>,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 200,
            selection: 0.4,
            mutation_probability: 0.1,
            mutation_factor: 0.1,
            episode_tick_limit: None,
        }
    }
}

impl EvolutionParams {
    pub fn validate(&self) -> Result<(), EvolutionConfigError> {
        if self.population_size == 0 {
            return Err(EvolutionConfigError::EmptyPopulation);
        }
        if !(0.0..=1.0).contains(&self.selection) {
            return Err(EvolutionConfigError::SelectionOutOfRange {
                selection: self.selection,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(EvolutionConfigError::MutationProbabilityOutOfRange {
                probability: self.mutation_probability,
            });
        }
        if !self.mutation_factor.is_finite() || self.mutation_factor < 0.0 {
            return Err(EvolutionConfigError::InvalidMutationFactor {
                factor: self.mutation_factor,
            });
        }
        if self.episode_tick_limit == Some(0) {
            return Err(EvolutionConfigError::ZeroTickLimit);
        }
        Ok(())
    }

    /// Number of parents kept per generation before the lower bound of one.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn truncated_parent_count(&self) -> usize {
        (self.selection * self.population_size as f64).floor() as usize
    }

    /// Number of parents kept per generation, never less than one.
    #[must_use]
    pub fn parent_count(&self) -> usize {
        self.truncated_parent_count().max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Phase {
    #[display("spawn")]
    SpawnGeneration,
    #[display("episode")]
    RunEpisode,
    #[display("breed")]
    SelectAndBreed,
}

/// Outcome of one completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub generation: u64,
    pub seed: Seed,
    pub ticks: u64,
    pub best_score: usize,
    pub mean_score: f64,
    pub parents: usize,
    /// Whether the episode was cut short by the tick limit.
    pub truncated: bool,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation {}: best {}, mean {:.2}, {} ticks, {} parents",
            self.generation, self.best_score, self.mean_score, self.ticks, self.parents
        )?;
        if self.truncated {
            f.write_str(" (tick limit reached)")?;
        }
        Ok(())
    }
}

/// Fittest model of a completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Champion {
    pub generation: u64,
    pub score: usize,
    pub model: DecisionModel,
}

#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    params: EvolutionParams,
    config: WorldConfig,
    rng: Pcg32,
    population: Population,
    episode: EpisodeState,
    actors: Vec<ActorState>,
    pipes: PipeField,
    ground: Ground,
    phase: Phase,
    generation: u64,
    generation_seed: Seed,
    truncated: bool,
    champion: Option<Champion>,
}

impl EvolutionEngine {
    /// Creates an engine with a freshly randomised population.
    ///
    /// All randomness (initial weights, obstacle layouts, parent picks and
    /// mutations) is drawn from `seed`, so equal seeds give equal runs.
    pub fn new(
        params: EvolutionParams,
        config: WorldConfig,
        seed: Seed,
    ) -> Result<Self, EvolutionConfigError> {
        params.validate()?;
        let mut rng = seed.rng();
        let population = Population::random(params.population_size, &mut rng);
        Ok(Self::build(params, config, seed, rng, population))
    }

    /// Creates an engine that starts from an existing population.
    pub fn with_population(
        params: EvolutionParams,
        config: WorldConfig,
        seed: Seed,
        population: Population,
    ) -> Result<Self, EvolutionConfigError> {
        params.validate()?;
        if population.len() != params.population_size {
            return Err(EvolutionConfigError::PopulationSizeMismatch {
                expected: params.population_size,
                actual: population.len(),
            });
        }
        Ok(Self::build(params, config, seed, seed.rng(), population))
    }

    fn build(
        params: EvolutionParams,
        config: WorldConfig,
        seed: Seed,
        rng: Pcg32,
        population: Population,
    ) -> Self {
        if params.truncated_parent_count() == 0 {
            log::warn!(
                "selection {} of {} actors keeps no parents; keeping the fittest one",
                params.selection,
                params.population_size
            );
        }
        Self {
            params,
            config,
            rng,
            population,
            episode: EpisodeState::new(params.population_size),
            actors: Vec::new(),
            pipes: PipeField::empty(config, seed),
            ground: Ground::from_config(&config),
            phase: Phase::SpawnGeneration,
            generation: 0,
            generation_seed: seed,
            truncated: false,
            champion: None,
        }
    }

    #[must_use]
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the generation being spawned or run.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Obstacle seed of the current generation.
    #[must_use]
    pub fn generation_seed(&self) -> Seed {
        self.generation_seed
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn episode(&self) -> &EpisodeState {
        &self.episode
    }

    /// Actors of the current episode, in population order.
    #[must_use]
    pub fn actors(&self) -> &[ActorState] {
        &self.actors
    }

    #[must_use]
    pub fn pipes(&self) -> &PipeField {
        &self.pipes
    }

    #[must_use]
    pub fn ground(&self) -> Ground {
        self.ground
    }

    /// Fittest model of the most recently completed generation.
    #[must_use]
    pub fn champion(&self) -> Option<&Champion> {
        self.champion.as_ref()
    }

    /// Performs one unit of work of the current phase.
    ///
    /// Returns the summary when a generation has just been bred.
    pub fn step(&mut self) -> Option<GenerationSummary> {
        match self.phase {
            Phase::SpawnGeneration => {
                self.spawn_generation();
                None
            }
            Phase::RunEpisode => {
                self.run_episode_tick();
                None
            }
            Phase::SelectAndBreed => Some(self.select_and_breed()),
        }
    }

    /// Steps until the current generation is bred.
    ///
    /// Without an episode tick limit this only returns once every actor has
    /// died.
    pub fn run_generation(&mut self) -> GenerationSummary {
        loop {
            if let Some(summary) = self.step() {
                return summary;
            }
        }
    }

    fn spawn_generation(&mut self) {
        self.generation_seed = self.rng.random();
        self.pipes = PipeField::with_seed(self.config, self.generation_seed);
        let actor = ActorState::spawn(&self.config, ActorMode::Normal);
        self.actors = vec![actor; self.params.population_size];
        self.episode = EpisodeState::new(self.params.population_size);
        self.truncated = false;
        self.phase = Phase::RunEpisode;
        log::debug!(
            "generation {} spawned with layout {}",
            self.generation,
            self.generation_seed
        );
    }

    fn run_episode_tick(&mut self) {
        let Self {
            population,
            episode,
            actors,
            pipes,
            ground,
            ..
        } = self;

        // decisions only read the committed state of this tick
        for (index, actor) in actors.iter_mut().enumerate() {
            if !episode.is_alive(index) {
                continue;
            }
            if collided(actor, pipes, *ground) {
                actor.kill();
                episode.record_death(index);
                continue;
            }
            episode.credit(index, actor, pipes);
            let obs = Observation::observe(actor, pipes);
            actor.apply(population.model(index).decide(&obs));
        }
        if episode.is_finished() {
            self.phase = Phase::SelectAndBreed;
            return;
        }

        pipes.tick();
        for actor in actors.iter_mut().filter(|actor| actor.is_alive()) {
            actor.step();
        }
        episode.record_tick();

        if self
            .params
            .episode_tick_limit
            .is_some_and(|limit| episode.ticks() >= limit)
        {
            for (index, actor) in actors.iter_mut().enumerate() {
                if episode.is_alive(index) {
                    actor.kill();
                    episode.record_death(index);
                }
            }
            self.truncated = true;
            self.phase = Phase::SelectAndBreed;
        }
    }

    fn select_and_breed(&mut self) -> GenerationSummary {
        let parents: Vec<usize> = self
            .episode
            .fitness_ranking()
            .take(self.params.parent_count())
            .collect();
        assert!(!parents.is_empty());

        let fittest = parents[0];
        self.champion = Some(Champion {
            generation: self.generation,
            score: self.episode.score(fittest),
            model: self.population.model(fittest).clone(),
        });

        let summary = GenerationSummary {
            generation: self.generation,
            seed: self.generation_seed,
            ticks: self.episode.ticks(),
            best_score: self.episode.best_score(),
            mean_score: self.episode.mean_score(),
            parents: parents.len(),
            truncated: self.truncated,
        };
        log::info!("{summary}");

        self.population = self.population.breed(
            &parents,
            self.params.mutation_probability,
            self.params.mutation_factor,
            &mut self.rng,
        );
        assert_eq!(self.population.len(), self.params.population_size);

        self.generation += 1;
        self.phase = Phase::SpawnGeneration;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_keeps_eighty_of_two_hundred() {
        let params = EvolutionParams::default();
        assert_eq!(params.truncated_parent_count(), 80);
        assert_eq!(params.parent_count(), 80);
    }

    #[test]
    fn tiny_selection_still_keeps_one_parent() {
        let params = EvolutionParams {
            population_size: 5,
            selection: 0.1,
            ..EvolutionParams::default()
        };
        assert_eq!(params.truncated_parent_count(), 0);
        assert_eq!(params.parent_count(), 1);
        let zero = EvolutionParams {
            selection: 0.0,
            ..EvolutionParams::default()
        };
        assert_eq!(zero.parent_count(), 1);
    }

    #[test]
    fn rejects_invalid_params() {
        let base = EvolutionParams::default();
        let cases = [
            EvolutionParams {
                population_size: 0,
                ..base
            },
            EvolutionParams {
                selection: 1.5,
                ..base
            },
            EvolutionParams {
                selection: f64::NAN,
                ..base
            },
            EvolutionParams {
                mutation_probability: -0.1,
                ..base
            },
            EvolutionParams {
                mutation_factor: f32::INFINITY,
                ..base
            },
            EvolutionParams {
                episode_tick_limit: Some(0),
                ..base
            },
        ];
        for params in cases {
            assert!(
                EvolutionEngine::new(params, WorldConfig::default(), Seed::from_u64(0)).is_err(),
                "{params:?}"
            );
        }
        assert_eq!(
            EvolutionParams {
                population_size: 0,
                ..base
            }
            .validate(),
            Err(EvolutionConfigError::EmptyPopulation)
        );
    }

    #[test]
    fn population_size_mismatch_is_rejected() {
        let mut rng = Seed::from_u64(0).rng();
        let population = Population::random(3, &mut rng);
        let err = EvolutionEngine::with_population(
            EvolutionParams::default(),
            WorldConfig::default(),
            Seed::from_u64(0),
            population,
        )
        .unwrap_err();
        assert_eq!(
            err,
            EvolutionConfigError::PopulationSizeMismatch {
                expected: 200,
                actual: 3
            }
        );
    }

    #[test]
    fn phases_cycle_in_order() {
        let params = EvolutionParams {
            population_size: 10,
            episode_tick_limit: Some(300),
            ..EvolutionParams::default()
        };
        let mut engine =
            EvolutionEngine::new(params, WorldConfig::default(), Seed::from_u64(4)).unwrap();
        assert!(engine.phase().is_spawn_generation());
        assert!(engine.step().is_none());
        assert!(engine.phase().is_run_episode());
        assert_eq!(engine.actors().len(), 10);
        while engine.phase().is_run_episode() {
            assert!(engine.step().is_none());
        }
        assert!(engine.phase().is_select_and_breed());
        assert_eq!(engine.episode().death_order().len(), 10);
        let summary = engine.step().unwrap();
        assert!(engine.phase().is_spawn_generation());
        assert_eq!(summary.generation, 0);
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.champion().unwrap().generation, 0);
    }

    #[test]
    fn tick_limit_kills_survivors_in_index_order() {
        let params = EvolutionParams {
            population_size: 6,
            episode_tick_limit: Some(1),
            ..EvolutionParams::default()
        };
        let mut engine =
            EvolutionEngine::new(params, WorldConfig::default(), Seed::from_u64(5)).unwrap();
        let last = engine.population().model(5).clone();
        let summary = engine.run_generation();
        assert!(summary.truncated);
        assert_eq!(summary.ticks, 1);
        assert_eq!(engine.episode().death_order(), &[0, 1, 2, 3, 4, 5]);
        // the last index counts as the fittest
        assert_eq!(engine.champion().unwrap().model, last);
    }
}
