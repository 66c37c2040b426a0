use skyflap_engine::{Action, GameField};

use crate::{decision_model::DecisionModel, observation::Observation};

/// Chooses the action for the next tick of a live field.
///
/// One controller drives one actor. The tick loop calls [`decide`] once per
/// tick, before the tick is played, whatever the controller is.
///
/// [`decide`]: Controller::decide
pub trait Controller {
    fn decide(&mut self, field: &GameField) -> Action;

    /// Forgets any per-game state, e.g. after a restart.
    fn reset(&mut self) {}
}

impl<C> Controller for Box<C>
where
    C: Controller + ?Sized,
{
    fn decide(&mut self, field: &GameField) -> Action {
        (**self).decide(field)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Keyboard-driven controller.
///
/// Input handling calls [`request_flap`](Self::request_flap) when a flap key is
/// pressed; the request is consumed by the next decision, so holding or
/// repeating a key within one tick yields a single flap.
#[derive(Debug, Default, Clone)]
pub struct HumanController {
    flap_requested: bool,
}

impl HumanController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_flap(&mut self) {
        self.flap_requested = true;
    }

    #[must_use]
    pub fn is_flap_requested(&self) -> bool {
        self.flap_requested
    }
}

impl Controller for HumanController {
    fn decide(&mut self, _field: &GameField) -> Action {
        Action::from_flap(std::mem::take(&mut self.flap_requested))
    }

    fn reset(&mut self) {
        self.flap_requested = false;
    }
}

/// Plays a trained [`DecisionModel`].
#[derive(Debug, Clone)]
pub struct ModelController {
    model: DecisionModel,
}

impl ModelController {
    #[must_use]
    pub fn new(model: DecisionModel) -> Self {
        Self { model }
    }

    #[must_use]
    pub fn model(&self) -> &DecisionModel {
        &self.model
    }
}

impl Controller for ModelController {
    fn decide(&mut self, field: &GameField) -> Action {
        self.model.decide(&Observation::from_field(field))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use skyflap_engine::{Seed, WorldConfig};

    use super::*;

    #[test]
    fn human_flap_request_is_consumed_once() {
        let field = GameField::with_seed(WorldConfig::default(), Seed::from_u64(0));
        let mut human = HumanController::new();
        assert!(human.decide(&field).is_idle());
        human.request_flap();
        human.request_flap();
        assert!(human.is_flap_requested());
        assert!(human.decide(&field).is_flap());
        assert!(human.decide(&field).is_idle());
    }

    #[test]
    fn model_controller_matches_model_decision() {
        let mut rng = Pcg32::seed_from_u64(1);
        let model = DecisionModel::random(&mut rng);
        let mut field = GameField::with_seed(WorldConfig::default(), Seed::from_u64(1));
        let mut controller: Box<dyn Controller> = Box::new(ModelController::new(model.clone()));
        for _ in 0..50 {
            let expected = model.decide(&Observation::from_field(&field));
            let action = controller.decide(&field);
            assert_eq!(action, expected);
            field.apply(action);
            field.tick();
        }
    }
}
