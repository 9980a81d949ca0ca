//! # Actions
//!
//! Everything that can happen in techchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The catalog fetch finishes? That's `Action::CatalogLoaded(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` for the event loop. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::fmt;

use log::{debug, info, warn};

use crate::core::catalog::{Catalog, LoadError};
use crate::core::navigation::Session;
use crate::core::state::App;

pub enum Action {
    CatalogLoaded(Result<Catalog, LoadError>),
    Submit(String),
    /// Click on a menu option (0-based position in the option list).
    SelectOption(usize),
    Restart,
    Quit,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CatalogLoaded(Ok(c)) => {
                write!(f, "CatalogLoaded(Ok({} technologies))", c.technology_count())
            }
            Action::CatalogLoaded(Err(e)) => write!(f, "CatalogLoaded(Err({e}))"),
            Action::Submit(text) => f.debug_tuple("Submit").field(text).finish(),
            Action::SelectOption(i) => f.debug_tuple("SelectOption").field(i).finish(),
            Action::Restart => f.write_str("Restart"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::CatalogLoaded(result) => {
            match &result {
                Ok(catalog) => info!("Catalog loaded ({} technologies)", catalog.technology_count()),
                Err(e) => warn!("Catalog load failed: {}", e),
            }
            app.attach(Session::from_load(result, app.style));
            Effect::None
        }
        Action::Submit(text) => {
            let Some(session) = app.session.as_mut() else {
                debug!("Ignoring input while the catalog loads");
                return Effect::None;
            };
            let reply = session.handle_input(&text);
            if let Some(rejection) = &reply.rejection {
                app.status_message = rejection.to_string();
            } else if !reply.is_empty() {
                app.status_message = String::from("Ready");
            }
            app.show(reply);
            Effect::None
        }
        Action::SelectOption(position) => {
            let Some(session) = app.session.as_mut() else {
                return Effect::None;
            };
            if position >= app.transcript.options.len() {
                return Effect::None;
            }
            let reply = session.handle_selection(position + 1);
            app.show(reply);
            Effect::None
        }
        Action::Restart => {
            if let Some(session) = app.session.as_mut() {
                let reply = session.restart();
                app.show(reply);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
