mod command;
mod model;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
