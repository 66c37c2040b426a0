use super::geometry::{HitMask, Shape, ellipse_rows, pipe_rows};

const ACTOR_WIDTH: u16 = 34;
const ACTOR_HEIGHT: usize = 24;
const PIPE_WIDTH: u16 = 52;
const PIPE_HEIGHT: usize = 320;
const PIPE_CAP_ROWS: usize = 24;
const PIPE_BODY_INSET: u16 = 2;

static ACTOR_ROWS: [u64; ACTOR_HEIGHT] = ellipse_rows(ACTOR_WIDTH);
static UPPER_PIPE_ROWS: [u64; PIPE_HEIGHT] =
    pipe_rows(PIPE_WIDTH, PIPE_CAP_ROWS, PIPE_BODY_INSET, false);
static LOWER_PIPE_ROWS: [u64; PIPE_HEIGHT] =
    pipe_rows(PIPE_WIDTH, PIPE_CAP_ROWS, PIPE_BODY_INSET, true);

/// Hit mask of the default actor sprite.
pub static ACTOR_MASK: HitMask = HitMask::new(ACTOR_WIDTH, &ACTOR_ROWS);
/// Hit mask of the default upper pipe sprite (cap at the bottom).
pub static UPPER_PIPE_MASK: HitMask = HitMask::new(PIPE_WIDTH, &UPPER_PIPE_ROWS);
/// Hit mask of the default lower pipe sprite (cap at the top).
pub static LOWER_PIPE_MASK: HitMask = HitMask::new(PIPE_WIDTH, &LOWER_PIPE_ROWS);

/// Motion constants of the actor.
///
/// `Normal` mode values drive gameplay; `idle_*` values drive the bobbing
/// animation shown before the first flap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPhysics {
    pub initial_vel_y: f32,
    pub acc_y: f32,
    pub min_vel_y: f32,
    pub max_vel_y: f32,
    pub flap_acc: f32,
    pub initial_rot: f32,
    pub flap_rot: f32,
    pub vel_rot: f32,
    pub rot_min: f32,
    pub rot_max: f32,
    pub idle_vel_y: f32,
    pub idle_acc_y: f32,
    pub idle_vel_bound: f32,
}

impl Default for ActorPhysics {
    fn default() -> Self {
        Self {
            initial_vel_y: -9.0,
            acc_y: 1.0,
            min_vel_y: -8.0,
            max_vel_y: 10.0,
            flap_acc: -9.0,
            initial_rot: 80.0,
            flap_rot: 80.0,
            vel_rot: -3.0,
            rot_min: -90.0,
            rot_max: 20.0,
            idle_vel_y: 1.0,
            idle_acc_y: 0.5,
            idle_vel_bound: 4.0,
        }
    }
}

/// Every physical constant of the world.
///
/// # Example
///
/// ```
/// use skyflap_engine::WorldConfig;
///
/// let config = WorldConfig::default();
/// assert_eq!(config.ground_y(), 404);
/// assert_eq!(config.actor_spawn(), (57.0, 244.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub window_width: u16,
    pub window_height: u16,
    /// Ground line as a fraction of the window height.
    pub ground_ratio: f32,
    pub actor_shape: Shape,
    pub upper_pipe_shape: Shape,
    pub lower_pipe_shape: Shape,
    /// Vertical size of the opening between an upper and lower pipe.
    pub pipe_gap: u16,
    /// Horizontal pipe velocity per tick (negative scrolls left).
    pub pipe_velocity: f32,
    pub physics: ActorPhysics,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            window_width: 288,
            window_height: 512,
            ground_ratio: 0.79,
            actor_shape: Shape::masked(ACTOR_MASK),
            upper_pipe_shape: Shape::masked(UPPER_PIPE_MASK),
            lower_pipe_shape: Shape::masked(LOWER_PIPE_MASK),
            pipe_gap: 120,
            pipe_velocity: -5.0,
            physics: ActorPhysics::default(),
        }
    }
}

impl WorldConfig {
    /// Ground line in pixels from the top of the window.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn ground_y(&self) -> i32 {
        (f32::from(self.window_height) * self.ground_ratio) as i32
    }

    /// Top-left corner where a freshly spawned actor is placed.
    #[must_use]
    pub fn actor_spawn(&self) -> (f32, f32) {
        let x = (f32::from(self.window_width) * 0.2).floor();
        let y = ((f32::from(self.window_height) - f32::from(self.actor_shape.height())) / 2.0)
            .floor();
        (x, y)
    }

    #[must_use]
    pub fn pipe_width(&self) -> u16 {
        self.lower_pipe_shape.width()
    }

    /// Horizontal distance between the left edges of consecutive pipe pairs.
    #[must_use]
    pub fn pipe_spacing(&self) -> f32 {
        f32::from(self.pipe_width()) * 3.5
    }
}
