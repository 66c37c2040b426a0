//! Exhaustive lookahead over bounded flap sequences.
//!
//! At each planning instant the planner replays every candidate sequence of
//! its [`ActionUniverse`] in preference order against a snapshot of the live
//! field and commits to the first one that survives. It then plays that
//! sequence back for `cadence` ticks before planning again.
//!
//! When no candidate survives, the planner commits to the idle sequence. This
//! is a fixed policy, independent of the universe order: an unsolvable
//! position is met by not flapping at all.

use std::fmt;

use skyflap_engine::{Action, GameField, SimulationSandbox};

use crate::{
    action_sequence::{
        ActionSequence, ActionUniverse, MAX_SEQUENCE_LEN, MAX_UNIVERSE_SIZE, universe_size,
    },
    controller::Controller,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlannerConfigError {
    #[display("decision window must be between 1 and {}, got {window}", MAX_SEQUENCE_LEN)]
    WindowOutOfRange { window: usize },
    #[display("flap budget {max_flaps} exceeds decision window {window}")]
    FlapBudgetExceedsWindow { max_flaps: usize, window: usize },
    #[display("cadence must be between 1 and the decision window {window}, got {cadence}")]
    CadenceOutOfRange { cadence: usize, window: usize },
    #[display("{size} candidate sequences exceed the limit of {}", MAX_UNIVERSE_SIZE)]
    UniverseTooLarge { size: u128 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Number of future ticks each candidate covers.
    pub window: usize,
    /// Maximum number of flaps in one candidate.
    pub max_flaps: usize,
    /// Ticks between planning instants.
    pub cadence: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            window: 10,
            max_flaps: 10,
            cadence: 10,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        let Self {
            window,
            max_flaps,
            cadence,
        } = *self;
        if !(1..=MAX_SEQUENCE_LEN).contains(&window) {
            return Err(PlannerConfigError::WindowOutOfRange { window });
        }
        if max_flaps > window {
            return Err(PlannerConfigError::FlapBudgetExceedsWindow { max_flaps, window });
        }
        if !(1..=window).contains(&cadence) {
            return Err(PlannerConfigError::CadenceOutOfRange { cadence, window });
        }
        let size = universe_size(window, max_flaps);
        if size > MAX_UNIVERSE_SIZE {
            return Err(PlannerConfigError::UniverseTooLarge { size });
        }
        Ok(())
    }
}

/// How a plan was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PlanOutcome {
    /// The candidate at `rank` in the universe survives the whole window.
    Survivable { rank: usize, flaps: u32 },
    /// No candidate survives; the idle sequence is played.
    Fallback,
}

impl fmt::Display for PlanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Survivable { rank, flaps } => {
                write!(f, "survivable (rank {rank}, {flaps} flaps)")
            }
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    sequence: ActionSequence,
    outcome: PlanOutcome,
    evaluated: usize,
}

impl Plan {
    #[must_use]
    pub fn sequence(&self) -> ActionSequence {
        self.sequence
    }

    #[must_use]
    pub fn outcome(&self) -> PlanOutcome {
        self.outcome
    }

    /// Number of candidates replayed to reach this plan.
    #[must_use]
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }
}

#[derive(Debug, Clone)]
pub struct BruteForcePlanner {
    config: PlannerConfig,
    universe: ActionUniverse,
    current: Option<Plan>,
    ticks_since_plan: usize,
}

impl BruteForcePlanner {
    /// Validates `config` and enumerates the candidate universe once.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerConfigError> {
        config.validate()?;
        let universe = ActionUniverse::new(config.window, config.max_flaps);
        log::debug!(
            "planner: window {}, budget {}, cadence {}, {} candidates",
            config.window,
            config.max_flaps,
            config.cadence,
            universe.len()
        );
        Ok(Self {
            config,
            universe,
            current: None,
            ticks_since_plan: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[must_use]
    pub fn universe(&self) -> &ActionUniverse {
        &self.universe
    }

    /// The plan being played back, if any.
    #[must_use]
    pub fn current_plan(&self) -> Option<&Plan> {
        self.current.as_ref()
    }

    /// Searches the universe against `field` without touching it.
    #[must_use]
    pub fn plan(&self, field: &GameField) -> Plan {
        let sandbox = SimulationSandbox::new(field);
        let mut evaluated = 0;
        for (rank, sequence) in self.universe.iter().enumerate() {
            evaluated += 1;
            if sandbox.evaluate(sequence.actions()) {
                return Plan {
                    sequence: *sequence,
                    outcome: PlanOutcome::Survivable {
                        rank,
                        flaps: sequence.flap_count(),
                    },
                    evaluated,
                };
            }
        }
        Plan {
            sequence: ActionSequence::idle(self.config.window),
            outcome: PlanOutcome::Fallback,
            evaluated,
        }
    }
}

impl Controller for BruteForcePlanner {
    fn decide(&mut self, field: &GameField) -> Action {
        if self.current.is_none() || self.ticks_since_plan >= self.config.cadence {
            let plan = self.plan(field);
            match plan.outcome {
                PlanOutcome::Survivable { .. } => log::trace!(
                    "plan {}: {} after {} candidates",
                    plan.sequence,
                    plan.outcome,
                    plan.evaluated
                ),
                PlanOutcome::Fallback => log::debug!(
                    "no survivable candidate among {}, playing idle",
                    plan.evaluated
                ),
            }
            self.current = Some(plan);
            self.ticks_since_plan = 0;
        }
        let action = self
            .current
            .map_or(Action::Idle, |plan| plan.sequence.action_at(self.ticks_since_plan));
        self.ticks_since_plan += 1;
        action
    }

    fn reset(&mut self) {
        self.current = None;
        self.ticks_since_plan = 0;
    }
}

#[cfg(test)]
mod tests {
    use skyflap_engine::{Seed, WorldConfig};

    use super::*;

    #[test]
    fn default_config_enumerates_1024_candidates() {
        let planner = BruteForcePlanner::new(PlannerConfig::default()).unwrap();
        assert_eq!(planner.universe().len(), 1024);
    }

    #[test]
    fn rejects_invalid_configs() {
        let cases = [
            (0, 0, 1),
            (65, 1, 1),
            (10, 11, 5),
            (10, 2, 0),
            (10, 2, 11),
            (40, 20, 1),
        ];
        for (window, max_flaps, cadence) in cases {
            let config = PlannerConfig {
                window,
                max_flaps,
                cadence,
            };
            assert!(BruteForcePlanner::new(config).is_err(), "{config:?}");
        }
        let err = PlannerConfig {
            window: 10,
            max_flaps: 11,
            cadence: 5,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            PlannerConfigError::FlapBudgetExceedsWindow {
                max_flaps: 11,
                window: 10
            }
        );
        assert_eq!(err.to_string(), "flap budget 11 exceeds decision window 10");
    }

    #[test]
    fn replans_on_cadence() {
        let config = PlannerConfig {
            window: 8,
            max_flaps: 3,
            cadence: 4,
        };
        let mut planner = BruteForcePlanner::new(config).unwrap();
        let mut field = GameField::with_seed(WorldConfig::default(), Seed::from_u64(1));
        let mut plans = Vec::new();
        for tick in 0..12 {
            let action = planner.decide(&field);
            if tick % 4 == 0 {
                plans.push(*planner.current_plan().unwrap());
            }
            let plan = planner.current_plan().unwrap();
            assert_eq!(action, plan.sequence().action_at(tick % 4));
            field.apply(action);
            field.tick();
        }
        assert_eq!(plans.len(), 3);

        planner.reset();
        assert!(planner.current_plan().is_none());
    }

    #[test]
    fn unsolvable_position_falls_back_to_idle() {
        let config = WorldConfig::default();
        let mut field = GameField::with_seed(config, Seed::from_u64(2));
        // let the actor fall into the ground
        while !field.collided() {
            field.tick();
        }
        let planner = BruteForcePlanner::new(PlannerConfig {
            window: 6,
            max_flaps: 6,
            cadence: 1,
        })
        .unwrap();
        let plan = planner.plan(&field);
        assert!(plan.outcome().is_fallback());
        assert!(plan.sequence().is_idle());
        assert_eq!(plan.evaluated(), 64);
    }
}
