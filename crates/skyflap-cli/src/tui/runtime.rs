use std::{io, time::Duration};

use super::{App, event::TuiEvent, frame_clock::FrameClock};

#[derive(Debug, Default)]
pub struct Runtime {
    clock: FrameClock,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the world tick rate in ticks per second. `None` pauses ticking.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.clock
            .set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    /// Caps redraws at `rate` frames per second.
    pub fn set_render_rate(&mut self, rate: f64) {
        self.clock
            .set_render_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Takes over the terminal and runs `app` until it asks to exit.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.clock.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Input(event) => app.handle_event(&mut self, &event),
                }
            }
            Ok(())
        })
    }
}
