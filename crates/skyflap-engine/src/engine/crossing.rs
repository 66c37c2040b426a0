use crate::core::{ActorState, PipeId};

use super::pipe_field::PipeField;

/// Per-actor record of which pipe pairs have already been scored.
///
/// Crossing is edge-triggered on the pair, but the tracker is what makes
/// scoring exactly-once: a pair is only credited if its id is newer than the
/// last credited one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrossingTracker {
    last_credited: Option<PipeId>,
}

impl CrossingTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_credited: None,
        }
    }

    #[must_use]
    pub const fn last_credited(&self) -> Option<PipeId> {
        self.last_credited
    }

    /// Credits every pair `actor` crosses on this tick and returns how many
    /// were new.
    pub fn credit(&mut self, actor: &ActorState, pipes: &PipeField) -> usize {
        let mut credited = 0;
        for pair in pipes.crossed_by(actor) {
            if self.last_credited.is_none_or(|last| pair.id() > last) {
                self.last_credited = Some(pair.id());
                credited += 1;
            }
        }
        credited
    }

    pub fn reset(&mut self) {
        self.last_credited = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActorMode, Seed, WorldConfig};

    #[test]
    fn each_pair_is_credited_once() {
        let config = WorldConfig::default();
        let actor = ActorState::spawn(&config, ActorMode::Normal);
        let mut pipes = PipeField::with_seed(config, Seed::from_u64(11));
        let mut tracker = CrossingTracker::new();
        let mut total = 0;
        for _ in 0..1000 {
            total += tracker.credit(&actor, &pipes);
            // crediting twice on the same tick never double counts
            assert_eq!(tracker.credit(&actor, &pipes), 0);
            pipes.tick();
        }
        // one pair arrives every 182 / 5 ticks after the first reaches x = 57
        assert!((20..=30).contains(&total), "{total}");
        assert!(tracker.last_credited().is_some());
    }

    #[test]
    fn reset_forgets_credited_pairs() {
        let config = WorldConfig::default();
        let actor = ActorState::spawn(&config, ActorMode::Normal);
        let pipes = PipeField::with_gaps(config, Seed::from_u64(0), [(55.0, 150.0)]);
        let mut tracker = CrossingTracker::new();
        assert_eq!(tracker.credit(&actor, &pipes), 1);
        assert_eq!(tracker.credit(&actor, &pipes), 0);
        tracker.reset();
        assert_eq!(tracker.credit(&actor, &pipes), 1);
    }
}
