use std::path::PathBuf;

use anyhow::Context as _;
use skyflap_engine::{Seed, WorldConfig};
use skyflap_strategy::{BruteForcePlanner, HumanController, ModelController, PlannerConfig};

use crate::{tui::Runtime, util};

use self::{pilot::Pilot, screen::PlayScreen};

mod pilot;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Obstacle seed as 32 hex digits; every restart replays the same layout
    #[arg(long)]
    seed: Option<Seed>,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Obstacle seed as 32 hex digits; every restart replays the same layout
    #[arg(long)]
    seed: Option<Seed>,
    /// Start in turbo mode
    #[arg(long, default_value_t = false)]
    turbo: bool,
    #[command(subcommand)]
    pilot: AutoPilotArg,
}

#[derive(Debug, Clone, clap::Subcommand)]
enum AutoPilotArg {
    /// Search every flap pattern of a short look-ahead window
    BruteForce(#[clap(flatten)] PlannerArg),
    /// Let a trained decision model fly
    Model {
        /// Path to the model file (JSON format)
        model_path: PathBuf,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct PlannerArg {
    /// Look-ahead window in ticks
    #[arg(long, default_value_t = PlannerConfig::default().window)]
    window: usize,
    /// Maximum flaps searched within one window
    #[arg(long, default_value_t = PlannerConfig::default().max_flaps)]
    max_flaps: usize,
    /// Ticks between two searches
    #[arg(long, default_value_t = PlannerConfig::default().cadence)]
    cadence: usize,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg { seed } = arg;
    let pilot = Pilot::Human(HumanController::new());
    let mut screen = PlayScreen::new(WorldConfig::default(), *seed, pilot, false);
    Runtime::new().run(&mut screen)?;
    screen.print_summary();
    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg { seed, turbo, pilot } = arg;
    let pilot = match pilot {
        AutoPilotArg::BruteForce(PlannerArg {
            window,
            max_flaps,
            cadence,
        }) => {
            let config = PlannerConfig {
                window: *window,
                max_flaps: *max_flaps,
                cadence: *cadence,
            };
            let planner =
                BruteForcePlanner::new(config).context("Invalid brute-force planner settings")?;
            Pilot::Planner(Box::new(planner))
        }
        AutoPilotArg::Model { model_path } => {
            let model = util::read_ai_model_file(model_path)?;
            Pilot::Model {
                name: model.name,
                controller: ModelController::new(model.model),
            }
        }
    };

    let mut screen = PlayScreen::new(WorldConfig::default(), *seed, pilot, *turbo);
    Runtime::new().run(&mut screen)?;
    screen.print_summary();
    Ok(())
}
