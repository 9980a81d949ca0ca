use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{Entry, Speaker};
use crate::tui::component::Component;
use crate::tui::highlight;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single transcript entry.
///
/// # Design
///
/// `Message` is a **transient component**: it's created fresh each frame with the data
/// it needs to render. The `is_hovered` flag is passed in from the parent
/// `MessageList`, which tracks hover state persistently.
///
/// # Styling
///
/// - **User** (green): what the user typed or clicked
/// - **Bot** (blue): chatbot prose
/// - **Code** (yellow border): item bodies and examples, highlighted by syntax
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height with
/// `textwrap`, using options that match Ratatui's `Paragraph` wrapping, so the
/// parent can lay out the scroll view without rendering each entry.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub entry: &'a Entry,
    pub is_hovered: bool,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a Entry, is_hovered: bool) -> Self {
        Self { entry, is_hovered }
    }

    /// Calculate the height required for this entry given a width.
    ///
    /// Prose is trimmed before wrapping. Code keeps its indentation, so each
    /// source line is wrapped on its own.
    pub fn calculate_height(entry: &Entry, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding.
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = if entry.is_code {
            entry
                .text
                .lines()
                .map(|line| textwrap::wrap(line, &options).len().max(1))
                .sum::<usize>()
        } else {
            let content = entry.text.trim();
            if content.is_empty() {
                return VERTICAL_OVERHEAD;
            }
            textwrap::wrap(content, &options).len()
        };

        (lines as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn style(&self) -> Style {
        match (self.entry.speaker, self.entry.is_code) {
            (Speaker::User, _) => Style::default().fg(Color::Green),
            (Speaker::Bot, false) => Style::default().fg(Color::Blue),
            (Speaker::Bot, true) => Style::default().fg(Color::Yellow),
        }
    }

    fn title(&self) -> &'static str {
        match (self.entry.speaker, self.entry.is_code) {
            (Speaker::User, _) => "you",
            (Speaker::Bot, false) => "techchat",
            (Speaker::Bot, true) => "code",
        }
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.style();
        let border_style = if self.is_hovered {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.title())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = if self.entry.is_code {
            let text = highlight::render(&self.entry.text, self.entry.syntax.as_deref(), Color::Yellow);
            Paragraph::new(text).wrap(Wrap { trim: false })
        } else {
            Paragraph::new(Text::raw(self.entry.text.trim()))
                .style(style)
                .wrap(Wrap { trim: true })
        };

        paragraph.render(inner_area, buf);
    }
}

/// `Message` is stateless; rendering delegates to the [`Widget`] implementation.
impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
