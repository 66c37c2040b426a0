//! World simulation built on the [`core`](crate::core) value types.
//!
//! - [`PipeField`] - Scrolling obstacle stream with spawning and eviction
//! - [`GameField`] - One actor, one obstacle stream and the ground
//! - [`SimulationSandbox`] - Side-effect-free replay of action sequences
//! - [`CrossingTracker`] - Exactly-once scoring of crossed pipe pairs
//! - [`GameSession`] - Single-player game with stats and pause/game-over states
//! - [`Seed`] - Seed for deterministic obstacle layouts
//!
//! # Tick order
//!
//! A live tick tests collision, scores crossings, applies the action, then
//! advances obstacles and the actor. The sandbox applies the action first and
//! tests collision before advancing. Collision depends only on positions, so
//! both orders agree on the outcome of a flap.
//!
//! # Example
//!
//! ```
//! use skyflap_engine::{Action, GameField, Seed, WorldConfig};
//!
//! let mut field = GameField::with_seed(WorldConfig::default(), Seed::from_u64(42));
//! let mut ticks = 0;
//! while !field.collided() && ticks < 1000 {
//!     let action = if field.actor().y() > 300.0 { Action::Flap } else { Action::Idle };
//!     field.apply(action);
//!     field.tick();
//!     ticks += 1;
//! }
//! assert!(ticks > 0);
//! ```

pub use self::{
    collision::*, crossing::*, game_field::*, game_session::*, game_stats::*, pipe_field::*,
    sandbox::*, seed::*,
};

mod collision;
mod crossing;
mod game_field;
mod game_session;
mod game_stats;
mod pipe_field;
mod sandbox;
mod seed;
