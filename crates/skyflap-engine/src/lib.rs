//! Deterministic world model of a side-scrolling flapping game.
//!
//! [`core`] holds plain value types (actor kinematics, pipes, hit masks,
//! world constants). [`engine`] builds the scrolling world, the collision
//! test, the simulation sandbox and the live game session on top of them.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
