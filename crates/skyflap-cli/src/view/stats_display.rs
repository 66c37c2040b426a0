use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, BlockExt as _, Widget},
};

use super::style;

#[derive(Debug, Clone)]
pub enum StatRow {
    Empty,
    Heading(&'static str),
    Value(&'static str, String),
}

/// Vertical panel of labelled values.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    rows: Vec<StatRow>,
    block: Option<Block<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(rows: Vec<StatRow>) -> Self {
        Self { rows, block: None }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_areas =
            Layout::vertical((0..self.rows.len()).map(|_| Constraint::Length(1))).split(area);
        for (row, area) in iter::zip(self.rows, row_areas.iter().copied()) {
            match row {
                StatRow::Empty => {}
                StatRow::Heading(label) => {
                    Line::styled(label, style::DEFAULT)
                        .left_aligned()
                        .render(area, buf);
                }
                StatRow::Value(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style::LABEL)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value, style::DEFAULT)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
