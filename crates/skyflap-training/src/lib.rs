//! Population-based training of [`DecisionModel`](skyflap_strategy::DecisionModel)s.
//!
//! A [`Population`] of models flies one shared obstacle layout per
//! generation. Fitness is survival order: the actor that dies last is the
//! fittest. The top fraction is kept as parents, and the next generation is
//! filled with mutated copies of them. See [`evolution`] for the phase
//! machine.

pub use self::{episode::*, evolution::*, population::*};

mod episode;
pub mod evolution;
mod population;
