/// Counters for one game session.
///
/// # Example
///
/// ```
/// use skyflap_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.add_score(2);
/// stats.record_flap();
/// stats.record_tick();
///
/// assert_eq!(stats.score(), 2);
/// assert_eq!(stats.flaps(), 1);
/// assert_eq!(stats.ticks(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    ticks: u64,
    flaps: u64,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            ticks: 0,
            flaps: 0,
        }
    }

    /// Number of pipe pairs crossed.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Number of ticks played since the first flap.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of accepted flaps.
    #[must_use]
    pub const fn flaps(&self) -> u64 {
        self.flaps
    }

    pub fn add_score(&mut self, crossed: usize) {
        self.score += crossed;
    }

    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub fn record_flap(&mut self) {
        self.flaps += 1;
    }
}
