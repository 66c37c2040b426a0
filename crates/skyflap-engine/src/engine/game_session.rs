use crate::core::{Action, ActorMode, WorldConfig};

use super::{crossing::CrossingTracker, game_field::GameField, game_stats::GameStats, seed::Seed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for the first flap; the actor bobs in place.
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// A single-player game from title bob to game over.
///
/// `tick` is called once per frame with the action chosen for that frame.
/// While playing, each tick:
///
/// 1. ends the game if the actor collides,
/// 2. scores every newly crossed pipe pair,
/// 3. applies the action,
/// 4. advances obstacles and then the actor.
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    crossings: CrossingTracker,
    session_state: SessionState,
    seed: Seed,
}

impl GameSession {
    /// Creates a session waiting for the first flap.
    #[must_use]
    pub fn new(config: WorldConfig, seed: Seed) -> Self {
        let mut field = GameField::with_seed(config, seed);
        field.set_actor_mode(ActorMode::Idle);
        Self {
            field,
            stats: GameStats::new(),
            crossings: CrossingTracker::new(),
            session_state: SessionState::Idle,
            seed,
        }
    }

    /// Creates a session that is already playing.
    #[must_use]
    pub fn started(config: WorldConfig, seed: Seed) -> Self {
        let mut session = Self::new(config, seed);
        session.start();
        session
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    #[must_use]
    pub fn collided(&self) -> bool {
        self.field.collided()
    }

    /// Leaves the idle state. Has no effect once started.
    pub fn start(&mut self) {
        if self.session_state.is_idle() {
            self.field.set_actor_mode(ActorMode::Normal);
            self.session_state = SessionState::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            state @ (SessionState::Idle | SessionState::GameOver) => state,
        };
    }

    /// Discards the current game and waits for a flap on a new layout.
    pub fn restart(&mut self, seed: Seed) {
        *self = Self::new(*self.field.config(), seed);
    }

    pub fn tick(&mut self, action: Action) {
        match self.session_state {
            SessionState::Idle => {
                if action.is_flap() {
                    self.start();
                } else {
                    self.field.step_actor();
                }
            }
            SessionState::Playing => self.play_tick(action),
            SessionState::Paused | SessionState::GameOver => {}
        }
    }

    fn play_tick(&mut self, action: Action) {
        if self.field.collided() {
            self.field.kill_actor();
            self.session_state = SessionState::GameOver;
            return;
        }

        let crossed = self
            .crossings
            .credit(self.field.actor(), self.field.pipes());
        self.stats.add_score(crossed);

        self.field.apply(action);
        if self.field.actor().has_flapped() {
            self.stats.record_flap();
        }
        self.field.tick();
        self.stats.record_tick();
    }
}
