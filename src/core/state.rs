//! # Application State
//!
//! Core business state for techchat. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── session: Option<Session>     // None until the catalog load finishes
//! ├── style: InputStyle            // menu or search, fixed per session
//! ├── transcript: Transcript       // what the Presenter has been told
//! │   ├── entries: Vec<Entry>      // user / bot / code messages
//! │   ├── options: Vec<String>     // clickable menu
//! │   └── syntax: Option<String>   // highlight token for code entries
//! ├── syntaxes: Vec<(tech, token)> // per-technology highlight tokens
//! ├── status_message: String       // status bar text
//! └── is_loading: bool             // catalog fetch in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::navigation::{InputStyle, Session};
use crate::core::reply::{Presenter, Reply};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

/// One rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub speaker: Speaker,
    pub text: String,
    pub is_code: bool,
    /// Syntax token for highlighting code entries (`"html"`, `"css"`...).
    pub syntax: Option<String>,
}

/// The conversation as displayed. Implements [`Presenter`].
#[derive(Debug, Default)]
pub struct Transcript {
    pub entries: Vec<Entry>,
    pub options: Vec<String>,
    syntax: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for Transcript {
    fn display_message(&mut self, text: &str, from_user: bool, is_code: bool) {
        let speaker = if from_user { Speaker::User } else { Speaker::Bot };
        // A new user turn retires the previous menu.
        if from_user {
            self.options.clear();
        }
        self.entries.push(Entry {
            speaker,
            text: text.to_string(),
            is_code,
            syntax: if is_code { self.syntax.clone() } else { None },
        });
    }

    fn display_options(&mut self, labels: &[String]) {
        self.options = labels.to_vec();
    }

    fn clear_display(&mut self) {
        self.entries.clear();
        self.options.clear();
    }
}

pub struct App {
    pub session: Option<Session>,
    pub style: InputStyle,
    pub transcript: Transcript,
    pub syntaxes: Vec<(String, String)>,
    pub status_message: String,
    pub is_loading: bool,
}

impl App {
    pub fn new(style: InputStyle) -> Self {
        Self {
            session: None,
            style,
            transcript: Transcript::new(),
            syntaxes: Vec::new(),
            status_message: String::from("Loading catalog..."),
            is_loading: true,
        }
    }

    pub fn with_syntaxes(mut self, syntaxes: Vec<(String, String)>) -> Self {
        self.syntaxes = syntaxes;
        self
    }

    /// Install a session and show its opening screen.
    pub fn attach(&mut self, mut session: Session) {
        self.is_loading = false;
        self.status_message = match session.load_error() {
            Some(e) => format!("Catalog unavailable: {e}"),
            None => String::from("Ready"),
        };
        let reply = session.start();
        self.session = Some(session);
        self.show(reply);
    }

    /// Replay a session reply into the transcript.
    pub fn show(&mut self, reply: Reply) {
        self.transcript.syntax = self
            .session
            .as_ref()
            .and_then(|s| s.current_technology())
            .and_then(|tech| self.syntax_for(tech));
        reply.present(&mut self.transcript);
    }

    fn syntax_for(&self, tech: &str) -> Option<String> {
        self.syntaxes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tech))
            .map(|(_, token)| token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::loaded_app;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(InputStyle::Menu);
        assert!(app.is_loading);
        assert!(app.session.is_none());
        assert!(app.transcript.entries.is_empty());
    }

    #[test]
    fn test_attach_shows_welcome() {
        let app = loaded_app();
        assert!(!app.is_loading);
        assert_eq!(app.status_message, "Ready");
        assert_eq!(app.transcript.options.len(), 5);
        assert_eq!(app.transcript.entries[0].speaker, Speaker::Bot);
    }

    #[test]
    fn test_code_entries_take_technology_syntax() {
        let mut app = loaded_app().with_syntaxes(vec![("css3".into(), "css".into())]);
        for input in ["2", "1", "1"] {
            let reply = app.session.as_mut().unwrap().handle_input(input);
            app.show(reply);
        }
        let code: Vec<&Entry> = app.transcript.entries.iter().filter(|e| e.is_code).collect();
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].syntax.as_deref(), Some("css"));
    }

    #[test]
    fn test_user_message_retires_options() {
        let mut transcript = Transcript::new();
        transcript.display_options(&["A".to_string()]);
        transcript.display_message("1", true, false);
        assert!(transcript.options.is_empty());
        transcript.display_options(&["B".to_string()]);
        transcript.clear_display();
        assert!(transcript.entries.is_empty());
        assert!(transcript.options.is_empty());
    }
}
