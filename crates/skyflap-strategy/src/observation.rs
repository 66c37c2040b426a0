use skyflap_engine::{ActorState, GameField, PipeField};

/// Number of features fed to a decision model.
pub const FEATURE_COUNT: usize = 3;

/// What a model sees of the world: the actor relative to the next gap.
///
/// All distances are in pixels:
///
/// - `dist_x`: from the actor's right edge to the gap's leading edge
/// - `clearance_below`: from the actor's bottom edge down to the lower pipe
/// - `clearance_above`: from the upper pipe's bottom edge down to the actor
///
/// Clearances are positive while the actor is inside the gap vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    dist_x: f32,
    clearance_below: f32,
    clearance_above: f32,
}

impl Observation {
    #[must_use]
    pub const fn new(dist_x: f32, clearance_below: f32, clearance_above: f32) -> Self {
        Self {
            dist_x,
            clearance_below,
            clearance_above,
        }
    }

    /// Observes `actor` against the nearest pair it has not yet passed.
    ///
    /// With no such pair the screen itself stands in for the gap: its right
    /// edge, the ground line and the top edge.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn observe(actor: &ActorState, pipes: &PipeField) -> Self {
        let rect = actor.rect();
        let config = pipes.config();
        let (leading, gap_top, gap_bottom) = match pipes.next_unpassed(actor) {
            Some(pair) => (pair.left(), pair.gap_top(), pair.gap_bottom()),
            None => (i32::from(config.window_width), 0, config.ground_y()),
        };
        Self::new(
            (leading - rect.right()) as f32,
            (gap_bottom - rect.bottom()) as f32,
            (rect.y() - gap_top) as f32,
        )
    }

    #[must_use]
    pub fn from_field(field: &GameField) -> Self {
        Self::observe(field.actor(), field.pipes())
    }

    #[must_use]
    pub fn dist_x(&self) -> f32 {
        self.dist_x
    }

    #[must_use]
    pub fn clearance_below(&self) -> f32 {
        self.clearance_below
    }

    #[must_use]
    pub fn clearance_above(&self) -> f32 {
        self.clearance_above
    }

    /// Feature vector in model input order.
    #[must_use]
    pub fn features(&self) -> [f32; FEATURE_COUNT] {
        [self.dist_x, self.clearance_below, self.clearance_above]
    }
}
