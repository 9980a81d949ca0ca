//! # TitleBar Component
//!
//! Top status bar: input mode, status message, and a "↓ New" marker when
//! the transcript has content below the viewport.
//!
//! Purely presentational. All three props come from elsewhere:
//! - `style`: Core App state (fixed per session)
//! - `status_message`: Core App state (loading, ready, last rejection)
//! - `has_unseen_content`: TUI state (scroll position indicator)

use crate::core::navigation::InputStyle;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    pub style: InputStyle,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(style: InputStyle, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            style,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mode = match self.style {
            InputStyle::Menu => "menu",
            InputStyle::Search => "search",
        };
        let mut title = format!("Techchat (mode: {mode})");
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            title.push_str(" | ↓ New");
        }
        title
    }
}

impl Component for TitleBar {
    /// Render the title bar as a single line. A plain `Span`: no borders needed.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
