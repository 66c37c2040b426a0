use std::collections::VecDeque;

use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::core::{ActorState, Pipe, PipeId, PipePair, WorldConfig};

use super::seed::Seed;

/// Ordered stream of pipe pairs scrolling at a constant velocity.
///
/// Pairs are kept in spawn order, which is also left-to-right screen order.
/// New pairs are appended at a fixed spacing behind the last one and pairs
/// that have left the screen are evicted from the front.
///
/// The random source travels with the field: cloning a field clones its
/// generator, so a clone advanced in a simulation spawns exactly the pairs
/// the source field will spawn.
///
/// # Example
///
/// ```
/// use skyflap_engine::{PipeField, Seed, WorldConfig};
///
/// let config = WorldConfig::default();
/// let mut a = PipeField::with_seed(config, Seed::from_u64(7));
/// let mut b = a.clone();
/// for _ in 0..500 {
///     a.tick();
///     b.tick();
/// }
/// assert_eq!(a.pairs().collect::<Vec<_>>(), b.pairs().collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone)]
pub struct PipeField {
    config: WorldConfig,
    rng: Pcg32,
    pairs: VecDeque<PipePair>,
    next_id: u64,
}

impl PipeField {
    /// Creates a field with a random seed and the two initial pairs.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a fixed seed for reproducible layouts.
    #[must_use]
    pub fn with_seed(config: WorldConfig, seed: Seed) -> Self {
        let mut this = Self::empty(config, seed);
        let pipe_width = f32::from(config.pipe_width());
        let first_x = f32::from(config.window_width) + pipe_width * 3.0;
        this.spawn_random_pair(first_x);
        this.spawn_random_pair(first_x + config.pipe_spacing());
        this
    }

    /// Creates a field without any pairs.
    ///
    /// The first pair appears just off the right edge on the next tick.
    #[must_use]
    pub fn empty(config: WorldConfig, seed: Seed) -> Self {
        Self {
            config,
            rng: seed.rng(),
            pairs: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Creates a field with hand-placed pairs given as `(x, gap_top)`.
    ///
    /// Later pairs are still spawned randomly from `seed`.
    #[must_use]
    pub fn with_gaps<I>(config: WorldConfig, seed: Seed, gaps: I) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let mut this = Self::empty(config, seed);
        for (x, gap_top) in gaps {
            this.push_pair(x, gap_top);
        }
        this
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the pairs in spawn (left-to-right) order.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = &PipePair> + '_ {
        self.pairs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the first pair whose trailing edge is still right of the
    /// actor's trailing edge.
    #[must_use]
    pub fn next_unpassed(&self, actor: &ActorState) -> Option<&PipePair> {
        let actor_left = actor.rect().x();
        self.pairs.iter().find(|pair| pair.right() > actor_left)
    }

    /// Returns the pairs whose crossing edge is triggered by `actor` on this
    /// tick.
    pub fn crossed_by<'a>(&'a self, actor: &'a ActorState) -> impl Iterator<Item = &'a PipePair> {
        self.pairs.iter().filter(|pair| pair.is_crossed_by(actor))
    }

    #[must_use]
    pub fn collides_with(&self, actor: &ActorState) -> bool {
        self.pairs.iter().any(|pair| pair.collides_with(actor))
    }

    /// Advances every pair by one tick, then spawns and evicts pairs.
    pub fn tick(&mut self) {
        for pair in &mut self.pairs {
            pair.step();
        }
        if let Some(x) = self.next_spawn_x() {
            self.spawn_random_pair(x);
        }
        let min_x = -f32::from(self.config.pipe_width());
        while self.pairs.front().is_some_and(|pair| pair.x() < min_x) {
            self.pairs.pop_front();
        }
    }

    fn next_spawn_x(&self) -> Option<f32> {
        let window_width = f32::from(self.config.window_width);
        let pipe_width = f32::from(self.config.pipe_width());
        let Some(last) = self.pairs.back() else {
            return Some(window_width + 10.0);
        };
        (window_width - (last.x() + pipe_width) > pipe_width * 2.5)
            .then(|| last.x() + self.config.pipe_spacing())
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn spawn_random_pair(&mut self, x: f32) {
        let ground = self.config.ground_y() as f32;
        let range = (ground * 0.6 - f32::from(self.config.pipe_gap)) as i32;
        let offset = (ground * 0.2) as i32;
        let gap_top = self.rng.random_range(0..range.max(1)) + offset;
        self.push_pair(x, gap_top as f32);
    }

    fn push_pair(&mut self, x: f32, gap_top: f32) {
        let config = &self.config;
        let upper_y = gap_top - f32::from(config.upper_pipe_shape.height());
        let lower_y = gap_top + f32::from(config.pipe_gap);
        let upper = Pipe::new(x, upper_y, config.pipe_velocity, config.upper_pipe_shape);
        let lower = Pipe::new(x, lower_y, config.pipe_velocity, config.lower_pipe_shape);
        let id = PipeId(self.next_id);
        self.next_id += 1;
        self.pairs.push_back(PipePair::new(id, upper, lower));
    }
}
