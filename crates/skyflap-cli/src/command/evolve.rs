use std::path::PathBuf;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    widgets::Block,
};
use skyflap_engine::Seed;
use skyflap_training::{EvolutionEngine, GenerationSummary};

use crate::{
    command::{TICK_RATE, TURBO_TICKS, train_ai::EvolutionArg},
    model::AiModel,
    tui::{App, Runtime},
    util::Output,
    view::{
        KeyBinding, KeyBindingDisplay, PaneState, StatRow, StatsDisplay, WorldDisplay,
        fit_world_area, render_banner, style,
    },
};

const STATS_WIDTH: u16 = 34;

const BINDINGS: &[KeyBinding<'static>] =
    &[(&["t"], "Turbo"), (&["p"], "Pause"), (&["q"], "Quit")];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvolveArg {
    #[clap(flatten)]
    evolution: EvolutionArg,
    /// Start in turbo mode
    #[arg(long, default_value_t = false)]
    turbo: bool,
    /// Save the latest champion to this file on exit
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &EvolveArg) -> anyhow::Result<()> {
    let EvolveArg {
        evolution,
        turbo,
        output,
    } = arg;
    let (engine, seed) = evolution.engine(None)?;
    let mut screen = EvolveScreen::new(engine, seed, *turbo);
    Runtime::new().run(&mut screen)?;
    screen.print_summary();

    if let Some(path) = output {
        let Some(champion) = screen.engine.champion() else {
            eprintln!("No generation completed; nothing saved");
            return Ok(());
        };
        let model = AiModel::from_champion("evolved", seed, champion);
        Output::save_json(&model, Some(path.as_path()))?;
        eprintln!("  Champion saved to {}", path.display());
    }
    Ok(())
}

/// Live view of a whole population flying the same obstacle field.
#[derive(Debug)]
struct EvolveScreen {
    engine: EvolutionEngine,
    seed: Seed,
    turbo: bool,
    paused: bool,
    last_summary: Option<GenerationSummary>,
    best_ever: usize,
    is_exiting: bool,
}

impl EvolveScreen {
    fn new(engine: EvolutionEngine, seed: Seed, turbo: bool) -> Self {
        Self {
            engine,
            seed,
            turbo,
            paused: false,
            last_summary: None,
            best_ever: 0,
            is_exiting: false,
        }
    }

    fn step(&mut self) {
        if let Some(summary) = self.engine.step() {
            self.best_ever = self.best_ever.max(summary.best_score);
            self.last_summary = Some(summary);
        }
    }

    fn stat_rows(&self) -> Vec<StatRow> {
        let engine = &self.engine;
        let episode = engine.episode();
        let mut rows = vec![
            StatRow::Value("GENERATION:", engine.generation().to_string()),
            StatRow::Value("PHASE:", engine.phase().to_string()),
            StatRow::Value(
                "ALIVE:",
                format!("{}/{}", episode.alive_count(), episode.size()),
            ),
            StatRow::Value("TICKS:", episode.ticks().to_string()),
            StatRow::Empty,
            StatRow::Value("SCORE:", episode.best_score().to_string()),
            StatRow::Value(
                "BEST EVER:",
                self.best_ever.max(episode.best_score()).to_string(),
            ),
        ];
        if let Some(summary) = &self.last_summary {
            rows.extend([
                StatRow::Empty,
                StatRow::Heading("LAST GENERATION:"),
                StatRow::Value("BEST:", summary.best_score.to_string()),
                StatRow::Value("MEAN:", format!("{:.2}", summary.mean_score)),
                StatRow::Value("PARENTS:", summary.parents.to_string()),
            ]);
        }
        rows.extend([
            StatRow::Empty,
            StatRow::Heading("SEED:"),
            StatRow::Value("", self.seed.to_string()),
        ]);
        rows
    }

    fn print_summary(&self) {
        eprintln!(
            "Evolved {} generation(s) of {} actors",
            self.engine.generation(),
            self.engine.params().population_size
        );
        eprintln!("  Best score: {}", self.best_ever);
        if let Some(summary) = &self.last_summary {
            eprintln!("  Last {summary}");
        }
        eprintln!("  Seed: {}", self.seed);
    }
}

impl App for EvolveScreen {
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
        match key.code {
            KeyCode::Char('t') => self.turbo = !self.turbo,
            KeyCode::Char('p') => self.paused = !self.paused,
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
        let engine = &self.engine;
        let world_area = fit_world_area(world_area, engine.config());

        let pane = if self.paused {
            PaneState::Paused
        } else {
            PaneState::Running { turbo: self.turbo }
        };
        let episode = engine.episode();
        let alive = engine
            .actors()
            .iter()
            .enumerate()
            .filter(|&(index, _)| episode.is_alive(index))
            .map(|(_, actor)| actor);
        let world = WorldDisplay::new(engine.config(), engine.pipes(), engine.ground())
            .actors(alive)
            .block(Block::bordered().border_style(pane.border_style()));
        frame.render_widget(world, world_area);

        let stats = StatsDisplay::new(self.stat_rows())
            .block(Block::bordered().border_style(style::DEFAULT));
        frame.render_widget(stats, stats_area);
        frame.render_widget(KeyBindingDisplay::new(BINDINGS), help_area);

        if self.paused {
            render_banner("PAUSED", style::PAUSED, world_area, frame.buffer_mut());
        }
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        if self.paused {
            return;
        }
        let ticks = if self.turbo { TURBO_TICKS } else { 1 };
        for _ in 0..ticks {
            self.step();
        }
    }
}
