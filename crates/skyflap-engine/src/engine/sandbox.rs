use crate::core::Action;

use super::game_field::GameField;

/// Replays candidate action sequences against a frozen snapshot of a field.
///
/// Every evaluation runs on its own clone of the snapshot, so the live field
/// is never touched, whatever the sequence does.
///
/// # Example
///
/// ```
/// use skyflap_engine::{Action, GameField, Seed, SimulationSandbox, WorldConfig};
///
/// let field = GameField::with_seed(WorldConfig::default(), Seed::from_u64(1));
/// let sandbox = SimulationSandbox::new(&field);
/// assert!(sandbox.evaluate([Action::Idle; 10]));
/// // never flapping eventually hits the ground
/// assert!(!sandbox.evaluate([Action::Idle; 100]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimulationSandbox<'a> {
    snapshot: &'a GameField,
}

impl<'a> SimulationSandbox<'a> {
    #[must_use]
    pub fn new(snapshot: &'a GameField) -> Self {
        Self { snapshot }
    }

    #[must_use]
    pub fn snapshot(&self) -> &'a GameField {
        self.snapshot
    }

    /// Returns `true` if the actor survives every action of the sequence.
    ///
    /// For each action, a requested flap is applied, then collision is
    /// tested, then the world advances one tick. The first collision ends the
    /// replay.
    #[must_use]
    pub fn evaluate<I>(&self, actions: I) -> bool
    where
        I: IntoIterator<Item = Action>,
    {
        let mut field = self.snapshot.clone();
        for action in actions {
            field.apply(action);
            if field.collided() {
                return false;
            }
            field.tick();
        }
        true
    }
}
