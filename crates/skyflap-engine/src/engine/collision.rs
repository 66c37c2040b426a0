use crate::core::{ActorState, WorldConfig};

use super::pipe_field::PipeField;

/// Horizontal ground plane at the bottom of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ground {
    y: i32,
}

impl Ground {
    #[must_use]
    pub const fn new(y: i32) -> Self {
        Self { y }
    }

    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.ground_y())
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// True once the actor's rectangle overlaps the ground line.
    #[must_use]
    pub fn is_touched_by(&self, actor: &ActorState) -> bool {
        actor.rect().bottom() > self.y
    }
}

/// Tests an actor against the ground, then against every pipe pair.
///
/// Pipes use a bounding-box prefilter followed by hit-mask intersection.
#[must_use]
pub fn collided(actor: &ActorState, pipes: &PipeField, ground: Ground) -> bool {
    ground.is_touched_by(actor) || pipes.collides_with(actor)
}
