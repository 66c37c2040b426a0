//! Fixed-rate terminal loop shared by every interactive command.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod frame_clock;
mod runtime;
