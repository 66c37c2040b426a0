use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// An interactive screen driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure tick and render rates here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles key presses, resizes and other terminal input.
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the world by one frame-clock tick.
    fn update(&mut self, runtime: &mut Runtime);
}
