use clap::{Parser, Subcommand};
use skyflap_engine::Seed;

use self::{
    evolve::EvolveArg,
    play::{AutoPlayArg, ManualPlayArg},
    train_ai::TrainAiArg,
};

mod evolve;
mod play;
mod train_ai;

/// World ticks per second of the interactive commands.
const TICK_RATE: f64 = 30.0;
/// World ticks per frame-clock tick in turbo mode.
const TURBO_TICKS: usize = 16;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game yourself
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Watch a planner or a trained model play
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Watch the population evolve live
    Evolve(#[clap(flatten)] EvolveArg),
    /// Train a decision model headless and save the best one
    TrainAi(#[clap(flatten)] TrainAiArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()))
    {
        Mode::ManualPlay(arg) => play::run_manual(&arg)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg)?,
        Mode::Evolve(arg) => evolve::run(&arg)?,
        Mode::TrainAi(arg) => train_ai::run(&arg)?,
    }
    Ok(())
}

/// `seed` if given, otherwise a fresh one from the thread RNG.
fn seed_or_random(seed: Option<Seed>) -> Seed {
    seed.unwrap_or_else(rand::random)
}

/// Installs the logger of the headless commands. `RUST_LOG` overrides the
/// default `info` filter.
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}
