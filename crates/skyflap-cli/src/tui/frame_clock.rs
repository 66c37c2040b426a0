use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Schedules world ticks at a fixed rate and renders at most once per
/// render interval, only when something changed.
#[derive(Debug)]
pub(super) struct FrameClock {
    tick_interval: Option<Duration>,
    render_interval: Duration,
    next_tick: Instant,
    last_render: Option<Instant>,
    dirty: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            render_interval: Duration::ZERO,
            next_tick: Instant::now(),
            last_render: None,
            dirty: true,
        }
    }

    /// Pass `None` to stop generating ticks.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.next_tick = Instant::now();
    }

    pub(super) fn set_render_interval(&mut self, interval: Duration) {
        self.render_interval = interval;
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            let event = event::read()?;
            self.dirty = true;
            return Ok(event.into());
        }
    }

    fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.tick_interval
            && now >= self.next_tick
        {
            self.next_tick = next_deadline(self.next_tick, interval, now);
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }

        let render_due = self
            .last_render
            .is_none_or(|last| now.duration_since(last) >= self.render_interval);
        if self.dirty && render_due {
            self.last_render = Some(now);
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// Time until the next scheduled event, or `None` to wait for input only.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let tick_at = self.tick_interval.map(|_| self.next_tick);
        let render_at = self.dirty.then(|| {
            self.last_render
                .map_or(now, |last| last + self.render_interval)
        });
        let at = tick_at.into_iter().chain(render_at).min()?;
        Some(at.saturating_duration_since(now))
    }
}

/// Deadline following `deadline`. A clock that fell a whole interval behind
/// restarts from `now` instead of bursting through the missed ticks.
fn next_deadline(deadline: Instant, interval: Duration, now: Instant) -> Instant {
    let next = deadline + interval;
    if next <= now { now + interval } else { next }
}
