use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Block, Widget,
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
    },
};
use skyflap_engine::{ActorState, Ground, PipeField, WorldConfig};

use super::color;

/// Canvas rendering of obstacles, ground and any number of actors.
///
/// World coordinates grow downwards, canvas coordinates upwards, so every
/// `y` is flipped against the window height.
#[derive(Debug)]
pub struct WorldDisplay<'a> {
    config: &'a WorldConfig,
    pipes: &'a PipeField,
    ground: Ground,
    actors: Vec<(&'a ActorState, Color)>,
    block: Option<Block<'a>>,
}

impl<'a> WorldDisplay<'a> {
    pub fn new(config: &'a WorldConfig, pipes: &'a PipeField, ground: Ground) -> Self {
        Self {
            config,
            pipes,
            ground,
            actors: vec![],
            block: None,
        }
    }

    /// Adds actors to draw; crashed ones are drawn in red.
    pub fn actors<I>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = &'a ActorState>,
    {
        self.actors.extend(actors.into_iter().map(|actor| {
            let color = if actor.is_alive() {
                color::ACTOR
            } else {
                color::CRASHED
            };
            (actor, color)
        }));
        self
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn height(&self) -> f64 {
        f64::from(self.config.window_height)
    }

    /// Fills the part of the rows `top..bottom` at columns `left..right`
    /// that lies inside the window.
    fn fill(&self, ctx: &mut Context<'_>, left: i32, right: i32, top: i32, bottom: i32) {
        let top = top.max(0);
        let bottom = bottom.min(i32::from(self.config.window_height));
        if bottom <= top {
            return;
        }
        ctx.draw(&Rectangle {
            x: f64::from(left),
            y: self.height() - f64::from(bottom),
            width: f64::from(right - left),
            height: f64::from(bottom - top),
            color: color::PIPE,
        });
    }
}

impl Widget for WorldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &WorldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = f64::from(self.config.window_width);
        let height = self.height();
        let ground_y = height - f64::from(self.ground.y());

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(color::SKY)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for pair in self.pipes.pairs() {
                    let upper_top = pair.upper().rect().y();
                    let lower_bottom = pair.lower().rect().bottom();
                    self.fill(ctx, pair.left(), pair.right(), upper_top, pair.gap_top());
                    self.fill(ctx, pair.left(), pair.right(), pair.gap_bottom(), lower_bottom);
                }
                ctx.layer();

                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: ground_y,
                    x2: width,
                    y2: ground_y,
                    color: color::GROUND,
                });
                for &(actor, color) in &self.actors {
                    let rect = actor.rect();
                    ctx.draw(&Rectangle {
                        x: f64::from(rect.x()),
                        y: height - f64::from(rect.bottom()),
                        width: f64::from(rect.width()),
                        height: f64::from(rect.height()),
                        color,
                    });
                }
            });
        if let Some(block) = &self.block {
            canvas = canvas.block(block.clone());
        }
        canvas.render(area, buf);
    }
}
