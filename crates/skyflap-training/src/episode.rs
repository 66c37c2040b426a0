use skyflap_engine::{ActorState, CrossingTracker, PipeField};

/// Per-actor bookkeeping of one episode, stored as parallel arrays.
///
/// Deaths are appended in the order they happen, so the last entry of
/// [`death_order`](Self::death_order) is the actor that survived longest.
#[derive(Debug, Clone)]
pub struct EpisodeState {
    alive: Vec<bool>,
    scores: Vec<usize>,
    crossings: Vec<CrossingTracker>,
    death_order: Vec<usize>,
    alive_count: usize,
    best_score: usize,
    ticks: u64,
}

impl EpisodeState {
    /// Starts an episode with every actor alive and no score.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            alive: vec![true; size],
            scores: vec![0; size],
            crossings: vec![CrossingTracker::new(); size],
            death_order: Vec::with_capacity(size),
            alive_count: size,
            best_score: 0,
            ticks: 0,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.alive.len()
    }

    #[must_use]
    pub fn is_alive(&self, index: usize) -> bool {
        self.alive[index]
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.alive_count == 0
    }

    #[must_use]
    pub fn score(&self, index: usize) -> usize {
        self.scores[index]
    }

    #[must_use]
    pub fn scores(&self) -> &[usize] {
        &self.scores
    }

    /// Highest individual score reached so far in this episode.
    #[must_use]
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn mean_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<usize>() as f64 / self.scores.len() as f64
    }

    #[must_use]
    pub fn death_order(&self) -> &[usize] {
        &self.death_order
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Actor indices from fittest to least fit: the reverse of death order.
    pub fn fitness_ranking(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.death_order.iter().rev().copied()
    }

    /// # Panics
    ///
    /// Panics if the actor is already dead.
    pub fn record_death(&mut self, index: usize) {
        assert!(self.alive[index], "actor {index} died twice");
        self.alive[index] = false;
        self.alive_count -= 1;
        self.death_order.push(index);
    }

    /// Scores the pairs `actor` crossed this tick and returns how many.
    pub fn credit(&mut self, index: usize, actor: &ActorState, pipes: &PipeField) -> usize {
        let crossed = self.crossings[index].credit(actor, pipes);
        self.scores[index] += crossed;
        self.best_score = self.best_score.max(self.scores[index]);
        crossed
    }

    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }
}
