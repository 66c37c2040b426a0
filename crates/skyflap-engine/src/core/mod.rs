pub use self::{actor::*, geometry::*, obstacle::*, world_config::*};

pub(crate) mod actor;
pub(crate) mod geometry;
pub(crate) mod obstacle;
pub(crate) mod world_config;
