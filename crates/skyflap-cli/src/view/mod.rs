use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Clear, Widget as _},
};
use skyflap_engine::WorldConfig;

pub use self::{key_binding_display::*, stats_display::*, world_display::*};

mod key_binding_display;
mod stats_display;
mod world_display;

mod color {
    use ratatui::style::Color;

    pub const SKY: Color = Color::Rgb(78, 192, 202);
    pub const PIPE: Color = Color::Rgb(94, 182, 52);
    pub const GROUND: Color = Color::Rgb(222, 216, 149);
    pub const ACTOR: Color = Color::Rgb(250, 200, 40);
    pub const CRASHED: Color = Color::Rgb(255, 0, 0);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
}

pub mod style {
    use ratatui::style::Style;

    use super::color;

    pub const DEFAULT: Style = Style::new().fg(color::WHITE).bg(color::BLACK);
    pub const LABEL: Style = Style::new().fg(color::GRAY).bg(color::BLACK);
    pub const PAUSED: Style = Style::new().fg(color::BLACK).bg(color::YELLOW);
    pub const GAME_OVER: Style = Style::new().fg(color::WHITE).bg(color::CRASHED);
    pub const READY: Style = Style::new().fg(color::BLACK).bg(color::WHITE);
}

/// Border colour of the world pane: white while running, magenta in turbo,
/// yellow while paused and red after a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneState {
    Running { turbo: bool },
    Paused,
    Over,
}

impl PaneState {
    #[must_use]
    pub fn border_style(self) -> Style {
        let fg = match self {
            Self::Running { turbo: true } => color::MAGENTA,
            Self::Running { turbo: false } => color::WHITE,
            Self::Paused => color::YELLOW,
            Self::Over => color::CRASHED,
        };
        style::DEFAULT.fg(fg)
    }
}

/// Largest area inside `area` with the world's aspect ratio, centred
/// horizontally.
///
/// Terminal cells are about twice as tall as they are wide, so a world of
/// `w × h` pixels needs `2w/h` columns per row.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn fit_world_area(area: Rect, config: &WorldConfig) -> Rect {
    let aspect = 2.0 * f64::from(config.window_width) / f64::from(config.window_height);
    let width_for_height = (f64::from(area.height) * aspect).round() as u16;
    let (width, height) = if width_for_height <= area.width {
        (width_for_height, area.height)
    } else {
        let height = (f64::from(area.width) / aspect).round() as u16;
        (area.width, height.min(area.height))
    };
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, height)
}

/// Draws a one-line banner across the middle of `area`.
pub fn render_banner(text: &str, style: Style, area: Rect, buf: &mut Buffer) {
    let area = area.centered(Constraint::Percentage(80), Constraint::Length(3));
    let block = Block::new().style(style);
    let inner = block.inner(area);
    Clear.render(area, buf);
    block.render(area, buf);
    Text::styled(text, style)
        .centered()
        .render(inner.centered_vertically(Constraint::Length(1)), buf);
}
