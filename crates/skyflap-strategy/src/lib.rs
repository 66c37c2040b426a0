//! Control strategies for an actor in a [`skyflap_engine`] world.
//!
//! Every strategy implements [`Controller`], so a single tick loop can drive
//! any of them:
//!
//! - [`HumanController`] - Latches keyboard flap requests
//! - [`BruteForcePlanner`] - Searches bounded flap sequences in a [`SimulationSandbox`]
//! - [`ModelController`] - Queries a trained [`DecisionModel`]
//!
//! [`SimulationSandbox`]: skyflap_engine::SimulationSandbox

pub use self::{
    action_sequence::*, brute_force::*, controller::*, decision_model::*, observation::*,
};

mod action_sequence;
pub mod brute_force;
mod controller;
mod decision_model;
mod observation;
