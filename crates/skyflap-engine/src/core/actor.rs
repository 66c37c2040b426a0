use super::{
    geometry::{Rect, Shape},
    world_config::{ActorPhysics, WorldConfig},
};

/// Per-tick input to an actor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Action {
    #[default]
    Idle,
    Flap,
}

impl Action {
    #[must_use]
    pub const fn from_flap(flap: bool) -> Self {
        if flap { Self::Flap } else { Self::Idle }
    }
}

/// Motion mode of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ActorMode {
    /// Bobbing in place before the game starts. Flaps are ignored.
    Idle,
    /// Falling under gravity and responding to flaps.
    Normal,
}

/// Kinematic state of the player character.
///
/// `ActorState` is a plain value: copies never share mutable state, so a copy
/// handed to a simulation can be advanced freely without touching the
/// original.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorState {
    x: f32,
    y: f32,
    vel_y: f32,
    acc_y: f32,
    min_vel_y: f32,
    max_vel_y: f32,
    rot: f32,
    vel_rot: f32,
    rot_min: f32,
    rot_max: f32,
    flap_acc: f32,
    flap_rot: f32,
    flapped: bool,
    min_y: f32,
    max_y: f32,
    shape: Shape,
    alive: bool,
    mode: ActorMode,
}

impl ActorState {
    /// Creates an actor at the spawn point of `config` in the given mode.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn spawn(config: &WorldConfig, mode: ActorMode) -> Self {
        let (x, y) = config.actor_spawn();
        let shape = config.actor_shape;
        let height = f32::from(shape.height());
        let physics = config.physics;
        let mut actor = Self {
            x,
            y,
            vel_y: 0.0,
            acc_y: 0.0,
            min_vel_y: 0.0,
            max_vel_y: 0.0,
            rot: 0.0,
            vel_rot: 0.0,
            rot_min: physics.rot_min,
            rot_max: physics.rot_max,
            flap_acc: physics.flap_acc,
            flap_rot: physics.flap_rot,
            flapped: false,
            min_y: -2.0 * height,
            max_y: config.ground_y() as f32 - 0.75 * height,
            shape,
            alive: true,
            mode,
        };
        actor.reset_motion(&physics);
        actor
    }

    /// Switches motion mode, resetting velocity and rotation to that mode's
    /// initial values.
    pub fn set_mode(&mut self, mode: ActorMode, physics: &ActorPhysics) {
        self.mode = mode;
        self.reset_motion(physics);
    }

    fn reset_motion(&mut self, physics: &ActorPhysics) {
        self.flapped = false;
        match self.mode {
            ActorMode::Idle => {
                self.vel_y = physics.idle_vel_y;
                self.acc_y = physics.idle_acc_y;
                self.min_vel_y = -physics.idle_vel_bound;
                self.max_vel_y = physics.idle_vel_bound;
                self.rot = 0.0;
                self.vel_rot = 0.0;
            }
            ActorMode::Normal => {
                self.vel_y = physics.initial_vel_y;
                self.acc_y = physics.acc_y;
                self.min_vel_y = physics.min_vel_y;
                self.max_vel_y = physics.max_vel_y;
                self.rot = physics.initial_rot;
                self.vel_rot = physics.vel_rot;
            }
        }
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
    pub fn vel_y(&self) -> f32 {
        self.vel_y
    }

    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rot
    }

    #[must_use]
    pub fn has_flapped(&self) -> bool {
        self.flapped
    }

    #[must_use]
    pub fn mode(&self) -> ActorMode {
        self.mode
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
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Requests an upward impulse for the coming tick.
    ///
    /// Ignored in idle mode and when the actor is already above the top
    /// clamp.
    pub fn flap(&mut self) {
        if self.mode.is_normal() && self.y > self.min_y {
            self.vel_y = self.flap_acc;
            self.flapped = true;
            self.rot = self.flap_rot;
        }
    }

    pub fn apply(&mut self, action: Action) {
        if action.is_flap() {
            self.flap();
        }
    }

    /// Advances the actor by one tick.
    ///
    /// In normal mode gravity is skipped on the tick right after a flap, so
    /// the full flap impulse is applied to the position.
    pub fn step(&mut self) {
        match self.mode {
            ActorMode::Idle => {
                if self.vel_y >= self.max_vel_y || self.vel_y <= self.min_vel_y {
                    self.acc_y = -self.acc_y;
                }
                self.vel_y += self.acc_y;
                self.y += self.vel_y;
            }
            ActorMode::Normal => {
                if !self.flapped {
                    self.vel_y = (self.vel_y + self.acc_y).clamp(self.min_vel_y, self.max_vel_y);
                }
                self.flapped = false;
                self.y = (self.y + self.vel_y).clamp(self.min_y, self.max_y);
                self.rot = (self.rot + self.vel_rot).clamp(self.rot_min, self.rot_max);
            }
        }
    }

    /// Returns the state one tick after applying `action`, leaving `self`
    /// untouched.
    #[must_use]
    pub fn stepped(&self, action: Action) -> Self {
        let mut next = *self;
        next.apply(action);
        next.step();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_actor() -> ActorState {
        ActorState::spawn(&WorldConfig::default(), ActorMode::Normal)
    }

    #[test]
    fn spawn_uses_normal_mode_initial_values() {
        let actor = normal_actor();
        assert_eq!((actor.x(), actor.y()), (57.0, 244.0));
        assert_eq!(actor.vel_y(), -9.0);
        assert_eq!(actor.rotation(), 80.0);
        assert!(actor.is_alive());
    }

    #[test]
    fn stepped_is_pure_and_repeatable() {
        let actor = normal_actor();
        for action in [Action::Idle, Action::Flap] {
            let a = actor.stepped(action);
            let b = actor.stepped(action);
            assert_eq!(a, b);
            assert_eq!(a.y().to_bits(), b.y().to_bits());
        }
        assert_eq!(actor, normal_actor());
    }

    #[test]
    fn gravity_accelerates_until_max_velocity() {
        let mut actor = normal_actor();
        for _ in 0..40 {
            actor.step();
        }
        assert_eq!(actor.vel_y(), 10.0);
    }

    #[test]
    fn flap_resets_velocity_and_skips_gravity_once() {
        let mut actor = normal_actor();
        for _ in 0..5 {
            actor.step();
        }
        let before = actor.y();
        actor.flap();
        assert!(actor.has_flapped());
        assert_eq!(actor.rotation(), 80.0);
        actor.step();
        assert_eq!(actor.y(), before - 9.0);
        assert!(!actor.has_flapped());
        // rotation is clamped back under its maximum
        assert_eq!(actor.rotation(), 20.0);
        actor.step();
        assert_eq!(actor.vel_y(), -8.0);
    }

    #[test]
    fn rotation_decays_to_minimum() {
        let mut actor = normal_actor();
        for _ in 0..100 {
            actor.step();
        }
        assert_eq!(actor.rotation(), -90.0);
    }

    #[test]
    fn vertical_position_is_clamped_above_ground() {
        let config = WorldConfig::default();
        let mut actor = ActorState::spawn(&config, ActorMode::Normal);
        for _ in 0..200 {
            actor.step();
        }
        assert_eq!(actor.y(), 404.0 - 0.75 * 24.0);
    }

    #[test]
    fn idle_mode_bobs_within_bounds_and_ignores_flaps() {
        let mut actor = ActorState::spawn(&WorldConfig::default(), ActorMode::Idle);
        let start = actor.y();
        actor.flap();
        assert!(!actor.has_flapped());
        for _ in 0..100 {
            actor.step();
            assert!(actor.vel_y().abs() <= 4.5);
            assert!((actor.y() - start).abs() < 40.0);
        }
    }
}
