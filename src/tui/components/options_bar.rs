//! # OptionsBar Component
//!
//! The current menu as clickable cells: `1. HTML5`, `2. CSS3`, ... plus
//! `0. retour` when there is somewhere to go back to.
//!
//! Cells fill columns top to bottom, at most [`MAX_OPTION_ROWS`] per column.
//! Rendering and hit testing share [`OptionsBar::grid`] so a click always
//! lands on the cell the user sees.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType};

use crate::core::messages;
use crate::tui::component::Component;

pub const MAX_OPTION_ROWS: u16 = 6;

/// What a click or hover landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionHit {
    /// 0-based position in the option list.
    Option(usize),
    Back,
}

pub struct OptionsBar<'a> {
    pub options: &'a [String],
    pub show_back: bool,
    pub hovered: Option<OptionHit>,
}

impl<'a> OptionsBar<'a> {
    pub fn new(options: &'a [String], show_back: bool, hovered: Option<OptionHit>) -> Self {
        Self {
            options,
            show_back,
            hovered,
        }
    }

    fn cell_count(&self) -> usize {
        self.options.len() + usize::from(self.show_back)
    }

    fn rows(&self) -> u16 {
        (self.cell_count() as u16).min(MAX_OPTION_ROWS)
    }

    /// Height of the bar, borders included. Zero when there is nothing to show.
    pub fn height(&self) -> u16 {
        match self.rows() {
            0 => 0,
            rows => rows + 2,
        }
    }

    /// `(rows, column width)` of the cell grid inside `inner`.
    fn grid(&self, inner: Rect) -> (u16, u16) {
        let rows = self.rows().max(1);
        let columns = self.cell_count().div_ceil(rows as usize).max(1) as u16;
        (rows, (inner.width / columns).max(1))
    }

    fn cell(&self, index: usize) -> OptionHit {
        if index < self.options.len() {
            OptionHit::Option(index)
        } else {
            OptionHit::Back
        }
    }

    fn label(&self, cell: OptionHit) -> String {
        match cell {
            OptionHit::Option(i) => format!("{}. {}", i + 1, self.options[i]),
            OptionHit::Back => format!("0. {}", messages::BACK_LABEL),
        }
    }

    fn inner(area: Rect) -> Rect {
        Block::bordered().inner(area)
    }

    /// Which cell (if any) is at screen position `(column, row)`.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<OptionHit> {
        let inner = Self::inner(area);
        if column < inner.x
            || column >= inner.x + inner.width
            || row < inner.y
            || row >= inner.y + inner.height
        {
            return None;
        }
        let (rows, column_width) = self.grid(inner);
        let r = row - inner.y;
        if r >= rows {
            return None;
        }
        let c = (column - inner.x) / column_width;
        let index = c as usize * rows as usize + r as usize;
        (index < self.cell_count()).then(|| self.cell(index))
    }
}

impl<'a> Component for OptionsBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.cell_count() == 0 || area.height == 0 {
            return;
        }
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Options")
            .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (rows, column_width) = self.grid(inner);
        for index in 0..self.cell_count() {
            let c = (index / rows as usize) as u16;
            let r = (index % rows as usize) as u16;
            let x = inner.x + c * column_width;
            if r >= inner.height || x >= inner.x + inner.width {
                continue;
            }
            let width = column_width.min(inner.x + inner.width - x);
            let cell = self.cell(index);
            let mut style = Style::default().fg(Color::Cyan);
            if self.hovered == Some(cell) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            frame.render_widget(
                Span::styled(self.label(cell), style),
                Rect::new(x, inner.y + r, width, 1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn technologies() -> Vec<String> {
        ["HTML5", "CSS3", "JavaScript", "PHP", "SQL"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_height_tracks_option_count() {
        let options = technologies();
        assert_eq!(OptionsBar::new(&options, false, None).height(), 7);
        assert_eq!(OptionsBar::new(&options, true, None).height(), 8);
        assert_eq!(OptionsBar::new(&[], false, None).height(), 0);
    }

    #[test]
    fn test_back_cell_without_options() {
        let bar = OptionsBar::new(&[], true, None);
        assert_eq!(bar.height(), 3);
        let area = Rect::new(0, 10, 40, 3);
        assert_eq!(bar.hit_test(area, 2, 11), Some(OptionHit::Back));
    }

    #[test]
    fn test_hit_test_single_column() {
        let options = technologies();
        let bar = OptionsBar::new(&options, false, None);
        let area = Rect::new(0, 10, 40, bar.height());
        // Border row
        assert_eq!(bar.hit_test(area, 5, 10), None);
        assert_eq!(bar.hit_test(area, 5, 11), Some(OptionHit::Option(0)));
        assert_eq!(bar.hit_test(area, 5, 15), Some(OptionHit::Option(4)));
        assert_eq!(bar.hit_test(area, 0, 12), None);
    }

    #[test]
    fn test_hit_test_wraps_into_columns() {
        let options: Vec<String> = (1..=8).map(|i| format!("Category {i}")).collect();
        let bar = OptionsBar::new(&options, true, None);
        // 9 cells, 6 rows → 2 columns of 19 in a 40-wide bar
        let area = Rect::new(0, 0, 40, bar.height());
        assert_eq!(bar.hit_test(area, 1, 1), Some(OptionHit::Option(0)));
        assert_eq!(bar.hit_test(area, 20, 1), Some(OptionHit::Option(6)));
        assert_eq!(bar.hit_test(area, 20, 3), Some(OptionHit::Back));
        assert_eq!(bar.hit_test(area, 20, 4), None);
    }

    #[test]
    fn test_render_numbers_options() {
        let options = technologies();
        let mut bar = OptionsBar::new(&options, true, Some(OptionHit::Option(1)));
        let backend = TestBackend::new(40, bar.height());
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("1. HTML5"));
        assert!(text.contains("5. SQL"));
        assert!(text.contains("0. retour"));
    }
}
