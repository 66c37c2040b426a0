use rand::Rng as _;

use crate::core::{Action, ActorMode, ActorState, PipePair, WorldConfig};

use super::{
    collision::{Ground, collided},
    pipe_field::PipeField,
    seed::Seed,
};

/// One actor flying through one obstacle stream.
///
/// A `GameField` is the snapshot handed to controllers and simulations.
/// Cloning it yields a fully independent world, random source included.
#[derive(Debug, Clone)]
pub struct GameField {
    config: WorldConfig,
    actor: ActorState,
    pipes: PipeField,
    ground: Ground,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl GameField {
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Creates a field with a normal-mode actor at the spawn point.
    #[must_use]
    pub fn with_seed(config: WorldConfig, seed: Seed) -> Self {
        let actor = ActorState::spawn(&config, ActorMode::Normal);
        Self::from_parts(actor, PipeField::with_seed(config, seed))
    }

    /// Assembles a field from an existing actor and obstacle stream.
    #[must_use]
    pub fn from_parts(actor: ActorState, pipes: PipeField) -> Self {
        let config = *pipes.config();
        Self {
            config,
            actor,
            pipes,
            ground: Ground::from_config(&config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[must_use]
    pub fn actor(&self) -> &ActorState {
        &self.actor
    }

    #[must_use]
    pub fn pipes(&self) -> &PipeField {
        &self.pipes
    }

    #[must_use]
    pub fn ground(&self) -> Ground {
        self.ground
    }

    pub fn set_actor_mode(&mut self, mode: ActorMode) {
        self.actor.set_mode(mode, &self.config.physics);
    }

    pub fn kill_actor(&mut self) {
        self.actor.kill();
    }

    #[must_use]
    pub fn collided(&self) -> bool {
        collided(&self.actor, &self.pipes, self.ground)
    }

    #[must_use]
    pub fn crossed(&self, pair: &PipePair) -> bool {
        pair.is_crossed_by(&self.actor)
    }

    pub fn crossed_pairs(&self) -> impl Iterator<Item = &PipePair> {
        self.pipes.crossed_by(&self.actor)
    }

    #[must_use]
    pub fn next_unpassed(&self) -> Option<&PipePair> {
        self.pipes.next_unpassed(&self.actor)
    }

    pub fn apply(&mut self, action: Action) {
        self.actor.apply(action);
    }

    /// Advances obstacles, then the actor, by one tick.
    pub fn tick(&mut self) {
        self.pipes.tick();
        self.actor.step();
    }

    /// Advances only the actor, leaving obstacles frozen.
    pub fn step_actor(&mut self) {
        self.actor.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_is_independent() {
        let field = GameField::with_seed(WorldConfig::default(), Seed::from_u64(3));
        let actor = *field.actor();
        let mut copy = field.clone();
        for _ in 0..50 {
            copy.apply(Action::Flap);
            copy.tick();
        }
        assert_ne!(copy.actor(), &actor);
        assert_eq!(field.actor(), &actor);
        assert_eq!(field.pipes().pairs().next().unwrap().x(), 444.0);
    }

    #[test]
    fn from_parts_takes_ground_from_pipe_config() {
        let config = WorldConfig {
            window_height: 400,
            ..WorldConfig::default()
        };
        let actor = ActorState::spawn(&config, ActorMode::Normal);
        let field = GameField::from_parts(actor, PipeField::empty(config, Seed::from_u64(0)));
        assert_eq!(field.ground().y(), 316);
    }
}
