use skyflap_engine::{Action, GameField};
use skyflap_strategy::{BruteForcePlanner, Controller, HumanController, ModelController};

/// The controller flying the actor of a play screen.
#[derive(Debug, derive_more::IsVariant)]
pub(super) enum Pilot {
    Human(HumanController),
    Planner(Box<BruteForcePlanner>),
    Model {
        name: String,
        controller: ModelController,
    },
}

impl Pilot {
    pub(super) fn label(&self) -> String {
        match self {
            Self::Human(_) => "Human".to_owned(),
            Self::Planner(planner) => {
                let config = planner.config();
                format!("Brute force W={} K={}", config.window, config.max_flaps)
            }
            Self::Model { name, .. } => format!("Model {name}"),
        }
    }

    /// Queues a flap for the next tick. Only the human pilot listens.
    pub(super) fn request_flap(&mut self) {
        if let Self::Human(human) = self {
            human.request_flap();
        }
    }

    /// Short description of the current plan, for planners.
    pub(super) fn plan_status(&self) -> Option<String> {
        let Self::Planner(planner) = self else {
            return None;
        };
        let status = planner.current_plan().map_or_else(
            || "none".to_owned(),
            |plan| format!("{} {}", plan.sequence(), plan.outcome()),
        );
        Some(status)
    }

    fn controller(&mut self) -> &mut dyn Controller {
        match self {
            Self::Human(human) => human,
            Self::Planner(planner) => planner,
            Self::Model { controller, .. } => controller,
        }
    }
}

impl Controller for Pilot {
    fn decide(&mut self, field: &GameField) -> Action {
        self.controller().decide(field)
    }

    fn reset(&mut self) {
        self.controller().reset();
    }
}

#[cfg(test)]
mod tests {
    use skyflap_engine::{Seed, WorldConfig};
    use skyflap_strategy::PlannerConfig;

    use super::*;

    #[test]
    fn only_the_human_pilot_takes_flap_requests() {
        let field = GameField::with_seed(WorldConfig::default(), Seed::from_u64(0));
        let mut human = Pilot::Human(HumanController::new());
        human.request_flap();
        assert_eq!(human.decide(&field), Action::Flap);
        assert_eq!(human.decide(&field), Action::Idle);
        assert!(human.plan_status().is_none());
    }

    #[test]
    fn planner_reports_its_plan() {
        let field = GameField::with_seed(WorldConfig::default(), Seed::from_u64(0));
        let planner = BruteForcePlanner::new(PlannerConfig::default()).unwrap();
        let mut pilot = Pilot::Planner(Box::new(planner));
        assert_eq!(pilot.plan_status().as_deref(), Some("none"));
        pilot.decide(&field);
        assert!(pilot.plan_status().is_some_and(|s| s.contains("survivable")));
        assert_eq!(pilot.label(), "Brute force W=10 K=10");
    }
}
