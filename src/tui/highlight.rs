//! Code block → ratatui `Text` renderer.
//!
//! Item bodies and examples are shown as code. When the current technology
//! names a syntax token syntect knows (`html`, `css`, `js`, `php`, `sql`),
//! lines are highlighted with the `base16-ocean.dark` theme; otherwise they
//! render plain in the fallback color.

use std::sync::LazyLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";

/// Expand tabs (ratatui renders `\t` as zero-width).
fn expand_tabs(line: &str) -> String {
    line.replace('\t', "    ")
}

/// Render `code` line by line, highlighted when `syntax` is known.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
/// Always yields one `Line` per source line, so heights can be predicted.
pub fn render(code: &str, syntax: Option<&str>, fallback: Color) -> Text<'static> {
    let highlighter = syntax
        .and_then(|token| SYNTAX_SET.find_syntax_by_token(token))
        .zip(THEME_SET.themes.get(THEME))
        .map(|(syn, theme)| HighlightLines::new(syn, theme));

    let Some(mut hl) = highlighter else {
        return plain(code, fallback);
    };

    let mut text = Text::default();
    for line in LinesWithEndings::from(code) {
        let spans: Vec<Span<'static>> = match hl.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => ranges
                .into_iter()
                .filter_map(|(hl_style, frag)| {
                    let content = expand_tabs(frag.trim_end_matches('\n'));
                    if content.is_empty() {
                        return None;
                    }
                    let fg = Color::Rgb(
                        hl_style.foreground.r,
                        hl_style.foreground.g,
                        hl_style.foreground.b,
                    );
                    Some(Span::styled(content, Style::default().fg(fg)))
                })
                .collect(),
            Err(_) => vec![Span::styled(
                expand_tabs(line.trim_end_matches('\n')),
                Style::default().fg(fallback),
            )],
        };
        text.lines.push(Line::from(spans));
    }
    text
}

fn plain(code: &str, fg: Color) -> Text<'static> {
    let style = Style::default().fg(fg);
    Text::from(
        code.lines()
            .map(|line| Line::from(Span::styled(expand_tabs(line), style)))
            .collect::<Vec<_>>(),
    )
}
