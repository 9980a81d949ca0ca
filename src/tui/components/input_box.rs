//! # InputBox Component
//!
//! Single-line text input.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing and paste)
//! - Handle editing (backspace, delete, cursor movement)
//! - Handle submission (Enter)
//! - Scroll horizontally so the cursor stays visible
//!
//! The buffer and cursor are internal state. The input style and loading flag
//! are props from the application state and only change the title.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::navigation::InputStyle;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders above and below the single text row.
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    pub style: InputStyle,
    /// Dims the box while the catalog loads
    pub dimmed: bool,
    /// Byte offset of the cursor in `buffer`, always on a char boundary
    cursor: usize,
}

impl InputBox {
    pub fn new(style: InputStyle) -> Self {
        Self {
            buffer: String::new(),
            style,
            dimmed: false,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn title(&self) -> &'static str {
        match self.style {
            InputStyle::Menu => "Input (number, 'retour' or 'menu')",
            InputStyle::Search => "Input (number, search term, 'retour' or 'menu')",
        }
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// The tail of the buffer that fits `width` columns with the cursor
    /// visible, and the cursor's column within it.
    fn visible_window(&self, width: usize) -> (&str, u16) {
        let mut start = 0;
        while start < self.cursor && self.buffer[start..self.cursor].width() >= width.max(1) {
            start += self.buffer[start..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
        }
        let column = self.buffer[start..self.cursor].width() as u16;
        (&self.buffer[start..], column)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut border_style = Style::default().fg(Color::Green);
        if self.dimmed {
            border_style = border_style.add_modifier(Modifier::DIM);
        }
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title());
        let inner = block.inner(area);

        let (visible, column) = self.visible_window(inner.width as usize);
        let input = Paragraph::new(visible.to_string())
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + column.min(inner.width - 1), inner.y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = self.prev_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = self.next_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
