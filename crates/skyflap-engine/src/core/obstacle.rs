use super::{
    actor::ActorState,
    geometry::{Rect, Shape, shapes_collide},
};

/// Spawn serial of a pipe pair.
///
/// Ids increase monotonically within one [`PipeField`](crate::PipeField), so
/// comparing ids compares spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct PipeId(pub(crate) u64);

/// A single scrolling pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    x: f32,
    y: f32,
    vel_x: f32,
    shape: Shape,
}

impl Pipe {
    #[must_use]
    pub fn new(x: f32, y: f32, vel_x: f32, shape: Shape) -> Self {
        Self { x, y, vel_x, shape }
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn vel_x(&self) -> f32 {
        self.vel_x
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.shape.rect_at(self.x, self.y)
    }

    #[must_use]
    pub fn collides_with(&self, actor: &ActorState) -> bool {
        shapes_collide(actor.rect(), actor.shape(), self.rect(), &self.shape)
    }

    fn step(&mut self) {
        self.x += self.vel_x;
    }
}

/// An upper and lower pipe sharing one x position, forming a single gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePair {
    id: PipeId,
    upper: Pipe,
    lower: Pipe,
}

impl PipePair {
    /// # Panics
    ///
    /// Panics if the two pipes are not horizontally aligned.
    #[must_use]
    pub fn new(id: PipeId, upper: Pipe, lower: Pipe) -> Self {
        assert!(
            upper.x.to_bits() == lower.x.to_bits() && upper.vel_x.to_bits() == lower.vel_x.to_bits()
        );
        Self { id, upper, lower }
    }

    #[must_use]
    pub fn id(&self) -> PipeId {
        self.id
    }

    #[must_use]
    pub fn upper(&self) -> &Pipe {
        &self.upper
    }

    #[must_use]
    pub fn lower(&self) -> &Pipe {
        &self.lower
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.upper.x
    }

    /// Leading (left) edge of the pair in pixels.
    #[must_use]
    pub fn left(&self) -> i32 {
        self.upper.rect().x()
    }

    /// Trailing (right) edge of the pair in pixels.
    #[must_use]
    pub fn right(&self) -> i32 {
        self.upper.rect().right()
    }

    /// Bottom edge of the upper pipe.
    #[must_use]
    pub fn gap_top(&self) -> i32 {
        self.upper.rect().bottom()
    }

    /// Top edge of the lower pipe.
    #[must_use]
    pub fn gap_bottom(&self) -> i32 {
        self.lower.rect().y()
    }

    #[must_use]
    pub fn collides_with(&self, actor: &ActorState) -> bool {
        self.upper.collides_with(actor) || self.lower.collides_with(actor)
    }

    /// Edge-triggered crossing test.
    ///
    /// True on the single tick in which the pair's leading edge has just
    /// scrolled past the actor's trailing edge: `x <= actor.x < x + |vel_x|`.
    #[must_use]
    pub fn is_crossed_by(&self, actor: &ActorState) -> bool {
        let x = self.upper.x;
        x <= actor.x() && actor.x() < x - self.upper.vel_x
    }

    pub(crate) fn step(&mut self) {
        self.upper.step();
        self.lower.step();
    }
}
