use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::navigation::Position;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{INPUT_HEIGHT, MessageList, OptionHit, OptionsBar, TitleBar};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub title: Rect,
    pub messages: Rect,
    pub options: Rect,
    pub input: Rect,
}

pub fn layout(frame_area: Rect, options_height: u16) -> Areas {
    use Constraint::{Length, Min};
    let [title, messages, options, input] =
        Layout::vertical([Length(1), Min(0), Length(options_height), Length(INPUT_HEIGHT)])
            .areas(frame_area);
    Areas {
        title,
        messages,
        options,
        input,
    }
}

/// `0. retour` is offered everywhere except the technology menu.
fn show_back(app: &App) -> bool {
    app.session
        .as_ref()
        .is_some_and(|s| s.catalog().is_some() && s.position() != Position::Root)
}

fn options_bar<'a>(app: &'a App, tui: &TuiState) -> OptionsBar<'a> {
    OptionsBar::new(&app.transcript.options, show_back(app), tui.hovered_option)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let mut options = options_bar(app, tui);
    let areas = layout(frame.area(), options.height());

    MessageList::new(&mut tui.message_list, &app.transcript.entries).render(frame, areas.messages);
    options.render(frame, areas.options);

    TitleBar::new(
        app.style,
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, areas.title);

    tui.input_box.render(frame, areas.input);
}

/// Which option cell (if any) is at a screen position.
pub fn hit_test_option(column: u16, row: u16, frame_area: Rect, app: &App, tui: &TuiState) -> Option<OptionHit> {
    let options = options_bar(app, tui);
    let areas = layout(frame_area, options.height());
    options.hit_test(areas.options, column, row)
}

/// Which transcript entry (if any) is at a screen row.
pub fn hit_test_message(row: u16, frame_area: Rect, app: &App, tui: &TuiState) -> Option<usize> {
    let areas = layout(frame_area, options_bar(app, tui).height());
    let main_area = areas.messages;
    if row < main_area.y || row >= main_area.y + main_area.height {
        return None;
    }
    let content_y = (row - main_area.y) + tui.message_list.scroll_state.offset().y;
    tui.message_list.entry_at(content_y)
}
