//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: polls every ~80ms so the catalog result shows up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod highlight;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::messages;
use crate::core::navigation::InputStyle;
use crate::core::state::App;
use crate::source::{build_source, load_catalog};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, OptionHit};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Option cell under the mouse pointer
    pub hovered_option: Option<OptionHit>,
}

impl TuiState {
    pub fn new(style: InputStyle) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(style),
            hovered_option: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Fetch the catalog in the background and report back over `tx`.
fn spawn_load(config: &ResolvedConfig, tx: mpsc::Sender<Action>) {
    let location = config.location.clone();
    let plan = config.plan.clone();
    info!("Spawning catalog load from {}", location);
    tokio::spawn(async move {
        let source = build_source(&location);
        let result = load_catalog(&plan, source.as_ref()).await;
        if tx.send(Action::CatalogLoaded(result)).is_err() {
            warn!("Failed to send catalog: receiver dropped");
        }
    });
}

/// Turn one event into at most one core action, updating TUI-local state on the way.
fn route_event(event: TuiEvent, frame_area: ratatui::layout::Rect, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Restart => {
            tui.message_list = MessageListState::new();
            Some(Action::Restart)
        }
        TuiEvent::Resize => None,
        TuiEvent::MouseMove(column, row) => {
            tui.hovered_option = ui::hit_test_option(column, row, frame_area, app, tui);
            tui.message_list.hovered_index = ui::hit_test_message(row, frame_area, app, tui);
            None
        }
        TuiEvent::MouseClick(column, row) => match ui::hit_test_option(column, row, frame_area, app, tui)? {
            OptionHit::Option(position) => Some(Action::SelectOption(position)),
            OptionHit::Back => Some(Action::Submit(messages::BACK_LABEL.to_string())),
        },
        TuiEvent::ScrollUp | TuiEvent::ScrollDown | TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            None
        }
        _ => match tui.input_box.handle_event(&event)? {
            InputEvent::Submit(text) => Some(Action::Submit(text)),
            InputEvent::ContentChanged => None,
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::new(config.style).with_syntaxes(config.syntaxes());
    let mut tui = TuiState::new(config.style);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_load(&config, tx);

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.input_box.dimmed = app.is_loading;

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let frame_area = terminal.get_frame().area();
            let Some(action) = route_event(event, frame_area, &app, &mut tui) else {
                continue;
            };
            if update(&mut app, action) == Effect::Quit {
                break 'main;
            }
        }

        // Handle background task actions (catalog load)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
