use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    widgets::Block,
};
use skyflap_engine::{GameSession, Seed, SessionState, WorldConfig};
use skyflap_strategy::Controller as _;

use crate::{
    command::{TICK_RATE, TURBO_TICKS, seed_or_random},
    tui::{App, Runtime},
    view::{
        KeyBinding, KeyBindingDisplay, PaneState, StatRow, StatsDisplay, WorldDisplay,
        fit_world_area, render_banner, style,
    },
};

use super::pilot::Pilot;

const STATS_WIDTH: u16 = 34;

/// A single game flown by a human, a planner or a model.
///
/// Humans start from the title bob and restart with the flap key after a
/// crash; automatic pilots start straight into play and restart with `r`.
#[derive(Debug)]
pub(super) struct PlayScreen {
    config: WorldConfig,
    fixed_seed: Option<Seed>,
    session: GameSession,
    pilot: Pilot,
    turbo: bool,
    best_score: usize,
    games: u64,
    is_exiting: bool,
}

impl PlayScreen {
    pub(super) fn new(
        config: WorldConfig,
        fixed_seed: Option<Seed>,
        pilot: Pilot,
        turbo: bool,
    ) -> Self {
        let session = Self::new_session(config, seed_or_random(fixed_seed), &pilot);
        Self {
            config,
            fixed_seed,
            session,
            pilot,
            turbo,
            best_score: 0,
            games: 1,
            is_exiting: false,
        }
    }

    fn new_session(config: WorldConfig, seed: Seed, pilot: &Pilot) -> GameSession {
        if pilot.is_human() {
            GameSession::new(config, seed)
        } else {
            GameSession::started(config, seed)
        }
    }

    fn restart(&mut self) {
        self.best_score = self.best_score.max(self.session.stats().score());
        let seed = seed_or_random(self.fixed_seed);
        self.session = Self::new_session(self.config, seed, &self.pilot);
        self.pilot.reset();
        self.games += 1;
    }

    fn is_running(&self) -> bool {
        matches!(
            self.session.session_state(),
            SessionState::Idle | SessionState::Playing
        )
    }

    fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        let action = self.pilot.decide(self.session.field());
        self.session.tick(action);
        if self.session.session_state().is_game_over() {
            self.best_score = self.best_score.max(self.session.stats().score());
        }
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        const HUMAN: &[KeyBinding<'static>] =
            &[(&["Space", "↑"], "Flap"), (&["p"], "Pause"), (&["q"], "Quit")];
        const HUMAN_OVER: &[KeyBinding<'static>] =
            &[(&["Space", "↑"], "Restart"), (&["q"], "Quit")];
        const AUTO: &[KeyBinding<'static>] =
            &[(&["t"], "Turbo"), (&["p"], "Pause"), (&["q"], "Quit")];
        const AUTO_OVER: &[KeyBinding<'static>] = &[(&["r"], "Restart"), (&["q"], "Quit")];

        let over = self.session.session_state().is_game_over();
        match (self.pilot.is_human(), over) {
            (true, false) => HUMAN,
            (true, true) => HUMAN_OVER,
            (false, false) => AUTO,
            (false, true) => AUTO_OVER,
        }
    }

    fn stat_rows(&self) -> Vec<StatRow> {
        let stats = self.session.stats();
        let mut rows = vec![
            StatRow::Heading("PILOT:"),
            StatRow::Value("", self.pilot.label()),
            StatRow::Empty,
            StatRow::Value("SCORE:", stats.score().to_string()),
            StatRow::Value("BEST:", self.best_score.max(stats.score()).to_string()),
            StatRow::Value("GAME:", self.games.to_string()),
            StatRow::Empty,
            StatRow::Value("TICKS:", stats.ticks().to_string()),
            StatRow::Value("FLAPS:", stats.flaps().to_string()),
            StatRow::Empty,
            StatRow::Heading("SEED:"),
            StatRow::Value("", self.session.seed().to_string()),
        ];
        if let Some(status) = self.pilot.plan_status() {
            rows.extend([
                StatRow::Empty,
                StatRow::Heading("PLAN:"),
                StatRow::Value("", status),
            ]);
        }
        rows
    }

    pub(super) fn print_summary(&self) {
        let best = self.best_score.max(self.session.stats().score());
        eprintln!("{} played {} game(s)", self.pilot.label(), self.games);
        eprintln!("  Best score: {best}");
        eprintln!("  Last seed: {}", self.session.seed());
    }
}

impl App for PlayScreen {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(TICK_RATE));
        runtime.set_render_rate(TICK_RATE);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        let state = self.session.session_state();
        let human = self.pilot.is_human();
        match key.code {
            KeyCode::Char(' ') | KeyCode::Up if human && state.is_game_over() => self.restart(),
            KeyCode::Char(' ') | KeyCode::Up if human => self.pilot.request_flap(),
            KeyCode::Char('r') if !human && state.is_game_over() => self.restart(),
            KeyCode::Char('t') if !human => self.turbo = !self.turbo,
            KeyCode::Char('p') if state.is_playing() || state.is_paused() => {
                self.session.toggle_pause();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [world_area, stats_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(STATS_WIDTH)])
                .spacing(1)
                .areas(main_area);
        let world_area = fit_world_area(world_area, &self.config);

        let state = self.session.session_state();
        let pane = match state {
            SessionState::Idle | SessionState::Playing => PaneState::Running { turbo: self.turbo },
            SessionState::Paused => PaneState::Paused,
            SessionState::GameOver => PaneState::Over,
        };
        let field = self.session.field();
        let world = WorldDisplay::new(&self.config, field.pipes(), field.ground())
            .actors([field.actor()])
            .block(Block::bordered().border_style(pane.border_style()));
        frame.render_widget(world, world_area);

        let stats = StatsDisplay::new(self.stat_rows())
            .block(Block::bordered().border_style(style::DEFAULT));
        frame.render_widget(stats, stats_area);
        frame.render_widget(KeyBindingDisplay::new(self.key_bindings()), help_area);

        let banner = match state {
            SessionState::Idle => Some(("PRESS SPACE", style::READY)),
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", style::PAUSED)),
            SessionState::GameOver => Some(("GAME OVER", style::GAME_OVER)),
        };
        if let Some((text, banner_style)) = banner {
            render_banner(text, banner_style, world_area, frame.buffer_mut());
        }
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        let ticks = if self.turbo { TURBO_TICKS } else { 1 };
        for _ in 0..ticks {
            self.tick();
        }
    }
}
