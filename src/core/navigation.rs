//! # Navigation State Machine
//!
//! Where the user is in the catalog, and what each command does there.
//!
//! ```text
//!            n                n                 n
//!   Root ────────▶ Technology ────────▶ Category ────────▶ Item ─┐
//!    ▲               │    ▲               │    ▲             │  │ n
//!    └── 0 / retour ─┘    └── 0 / retour ─┘    └─ 0 / retour ┘◀─┘
//!
//!   "menu" from anywhere → Root
//! ```
//!
//! `Position` stores indices into the catalog, so a category can only be
//! selected under a technology. Every command runs to completion and returns a
//! [`Reply`]; a rejected command leaves the position untouched.

use clap::ValueEnum;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::catalog::{Catalog, Category, LoadError};
use crate::core::format::{self, display_name};
use crate::core::messages;
use crate::core::reply::{Rejection, Reply};

/// How free text (anything that is not a number or keyword) is treated.
/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputStyle {
    /// Numbers and keywords only.
    #[default]
    Menu,
    /// Free text searches the selected technology.
    Search,
}

/// Which kind of numeric selection the next input makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Awaiting {
    Technology,
    Category,
    Item,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Root,
    Technology { tech: usize },
    Category { tech: usize, category: usize },
    /// An item's definition is on screen. Numbers keep selecting items.
    Item { tech: usize, category: usize, item: usize },
}

impl Position {
    pub fn parent(self) -> Position {
        match self {
            Position::Root | Position::Technology { .. } => Position::Root,
            Position::Category { tech, .. } => Position::Technology { tech },
            Position::Item { tech, category, .. } => Position::Category { tech, category },
        }
    }

    pub fn awaiting(self) -> Awaiting {
        match self {
            Position::Root => Awaiting::Technology,
            Position::Technology { .. } => Awaiting::Category,
            Position::Category { .. } | Position::Item { .. } => Awaiting::Item,
        }
    }

    fn technology(self) -> Option<usize> {
        match self {
            Position::Root => None,
            Position::Technology { tech }
            | Position::Category { tech, .. }
            | Position::Item { tech, .. } => Some(tech),
        }
    }
}

/// Read-only view of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState<'a> {
    pub current_technology: Option<&'a str>,
    pub current_category: Option<&'a str>,
    pub awaiting: Awaiting,
}

/// A parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ignore,
    Menu,
    Back,
    Select(i64),
    Text(String),
}

impl Command {
    fn parse(raw: &str) -> Command {
        let input = raw.trim();
        if input.is_empty() {
            return Command::Ignore;
        }
        let lowered = input.to_lowercase();
        match lowered.as_str() {
            "menu" => return Command::Menu,
            "retour" | "back" => return Command::Back,
            _ => {}
        }
        match input.parse::<i64>() {
            Ok(n) => Command::Select(n),
            // Digits that overflow are still a number, just never a valid one.
            Err(_) if input.chars().all(|c| c.is_ascii_digit()) => Command::Select(i64::MAX),
            Err(_) => Command::Text(input.to_string()),
        }
    }
}

pub struct Session {
    catalog: Result<Catalog, LoadError>,
    style: InputStyle,
    position: Position,
}

impl Session {
    pub fn new(catalog: Catalog, style: InputStyle) -> Self {
        Self::from_load(Ok(catalog), style)
    }

    /// A session whose catalog failed to load. It only ever reports the error.
    pub fn unavailable(error: LoadError) -> Self {
        Self::from_load(Err(error), InputStyle::default())
    }

    pub fn from_load(catalog: Result<Catalog, LoadError>, style: InputStyle) -> Self {
        Self {
            catalog,
            style,
            position: Position::Root,
        }
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref().ok()
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.catalog.as_ref().err()
    }

    pub fn style(&self) -> InputStyle {
        self.style
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> NavState<'_> {
        let catalog = self.catalog();
        let tech_name = |tech: usize| {
            catalog
                .and_then(|c| c.technology(tech))
                .map(|t| t.name.as_str())
        };
        let category_name = |tech: usize, category: usize| {
            catalog
                .and_then(|c| c.category(tech, category))
                .map(|c| c.name.as_str())
        };
        let (current_technology, current_category) = match self.position {
            Position::Root => (None, None),
            Position::Technology { tech } => (tech_name(tech), None),
            Position::Category { tech, category } | Position::Item { tech, category, .. } => {
                (tech_name(tech), category_name(tech, category))
            }
        };
        NavState {
            current_technology,
            current_category,
            awaiting: self.position.awaiting(),
        }
    }

    /// Name of the technology currently selected, if any.
    pub fn current_technology(&self) -> Option<&str> {
        self.state().current_technology
    }

    /// Welcome message and technology options, from `Root`.
    pub fn start(&mut self) -> Reply {
        self.position = Position::Root;
        let mut reply = Reply::default();
        self.welcome(&mut reply);
        reply
    }

    /// Clear the display and start over.
    pub fn restart(&mut self) -> Reply {
        self.position = Position::Root;
        let mut reply = Reply::default();
        reply.clear();
        self.welcome(&mut reply);
        reply
    }

    /// Process one line of typed input.
    pub fn handle_input(&mut self, raw: &str) -> Reply {
        let command = Command::parse(raw);
        let mut reply = Reply::default();
        if command == Command::Ignore {
            return reply;
        }
        reply.echo(raw.trim());
        self.dispatch(command, &mut reply);
        reply
    }

    /// Process a click on option `index` of the current menu (1-based; 0 is back).
    pub fn handle_selection(&mut self, index: usize) -> Reply {
        let mut reply = Reply::default();
        let label = if index == 0 {
            Some(messages::BACK_LABEL.to_string())
        } else {
            self.option_label(index - 1)
        };
        reply.echo(label.unwrap_or_else(|| index.to_string()));
        let command = if index == 0 {
            Command::Back
        } else {
            Command::Select(i64::try_from(index).unwrap_or(i64::MAX))
        };
        self.dispatch(command, &mut reply);
        reply
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn dispatch(&mut self, command: Command, reply: &mut Reply) {
        if self.catalog.is_err() {
            reply.say(messages::LOAD_FAILED);
            return;
        }
        let before = self.position;
        match command {
            Command::Ignore => {}
            Command::Menu => {
                self.position = Position::Root;
                reply.clear();
                self.welcome(reply);
            }
            Command::Back => self.back(reply),
            Command::Select(0) if self.position != Position::Root => self.back(reply),
            Command::Select(n) => self.select(n, reply),
            Command::Text(term) => match (self.style, self.position.technology(), self.catalog()) {
                (InputStyle::Search, Some(tech), Some(catalog)) => {
                    search(catalog, tech, &term, reply)
                }
                _ => reply.reject(Rejection::InvalidInput),
            },
        }
        if before != self.position {
            debug!("Navigation: {:?} -> {:?}", before, self.position);
        }
        if let Some(rejection) = &reply.rejection {
            debug!("Rejected at {:?}: {:?}", self.position, rejection);
        }
    }

    fn back(&mut self, reply: &mut Reply) {
        if self.position == Position::Root {
            return;
        }
        self.position = self.position.parent();
        match self.position {
            Position::Root => {
                reply.clear();
                self.welcome(reply);
            }
            Position::Technology { .. } => self.show_categories(reply),
            Position::Category { .. } | Position::Item { .. } => self.show_items(reply),
        }
    }

    fn select(&mut self, n: i64, reply: &mut Reply) {
        let Some(catalog) = self.catalog() else {
            return;
        };
        let max = match self.position {
            Position::Root => catalog.technology_count(),
            Position::Technology { tech } => catalog
                .technology(tech)
                .map_or(0, |t| t.categories.len()),
            Position::Category { tech, category } | Position::Item { tech, category, .. } => {
                catalog.category(tech, category).map_or(0, |c| c.items.len())
            }
        };
        let index = match usize::try_from(n) {
            Ok(i) if (1..=max).contains(&i) => i - 1,
            _ => {
                reply.reject(Rejection::InvalidIndex { index: n, max });
                return;
            }
        };

        match self.position {
            Position::Root => {
                self.position = Position::Technology { tech: index };
                self.show_categories(reply);
            }
            Position::Technology { tech } => {
                self.position = Position::Category {
                    tech,
                    category: index,
                };
                self.show_items(reply);
            }
            Position::Category { tech, category } | Position::Item { tech, category, .. } => {
                self.position = Position::Item {
                    tech,
                    category,
                    item: index,
                };
                self.show_item(reply);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Screens
    // ------------------------------------------------------------------------

    fn welcome(&self, reply: &mut Reply) {
        match &self.catalog {
            Ok(catalog) => {
                reply.say(messages::WELCOME);
                reply.say(messages::CHOOSE_TECHNOLOGY);
                reply.options(catalog.technologies().iter().map(|t| t.name.clone()).collect());
            }
            Err(error) => {
                warn!("Session has no catalog: {}", error);
                reply.say(messages::LOAD_FAILED);
            }
        }
    }

    fn show_categories(&self, reply: &mut Reply) {
        let Some(tech) = self
            .position
            .technology()
            .and_then(|t| self.catalog()?.technology(t))
        else {
            return;
        };
        reply.say(messages::technology_selected(&tech.name));
        if tech.categories.is_empty() {
            reply.say(messages::NO_CATEGORIES);
            return;
        }
        if self.style == InputStyle::Search {
            reply.say(messages::SEARCH_HINT);
        }
        reply.options(tech.categories.iter().map(|c| c.name.clone()).collect());
    }

    fn show_items(&self, reply: &mut Reply) {
        let (Position::Category { tech, category } | Position::Item { tech, category, .. }) =
            self.position
        else {
            return;
        };
        let Some(catalog) = self.catalog() else {
            return;
        };
        let (Some(technology), Some(cat)) = (catalog.technology(tech), catalog.category(tech, category))
        else {
            return;
        };
        if cat.items.is_empty() {
            reply.say(messages::EMPTY_CATEGORY);
            reply.say(messages::CATEGORY_HINT);
            return;
        }
        let names = item_names(cat);
        let mut listing = messages::category_listing(&technology.name, &cat.name);
        for (i, name) in names.iter().enumerate() {
            listing.push_str(&format!("{}. {}\n", i + 1, name));
        }
        reply.say(listing);
        reply.say(messages::CHOOSE_ITEM);
        reply.say(messages::CATEGORY_HINT);
        reply.options(names);
    }

    fn show_item(&self, reply: &mut Reply) {
        let Position::Item {
            tech,
            category,
            item,
        } = self.position
        else {
            return;
        };
        let Some(cat) = self.catalog().and_then(|c| c.category(tech, category)) else {
            return;
        };
        let Some(item) = cat.items.get(item) else {
            return;
        };
        let formatted = format::format(item);
        reply.say(messages::item_details(formatted.title.as_deref()));
        reply.code(formatted.body);
        if let Some(example) = formatted.example {
            reply.say(messages::EXAMPLE_HEADER);
            reply.code(example);
        }
        reply.say(messages::ITEM_HINT);
        reply.options(item_names(cat));
    }

    fn option_label(&self, index: usize) -> Option<String> {
        let catalog = self.catalog()?;
        match self.position {
            Position::Root => catalog.technology(index).map(|t| t.name.clone()),
            Position::Technology { tech } => catalog.category(tech, index).map(|c| c.name.clone()),
            Position::Category { tech, category } | Position::Item { tech, category, .. } => catalog
                .item(tech, category, index)
                .and_then(display_name),
        }
    }
}

/// Menu labels for the items of `category`.
fn item_names(category: &Category) -> Vec<String> {
    category
        .items
        .iter()
        .map(|item| display_name(item).unwrap_or_else(|| messages::UNNAMED.to_string()))
        .collect()
}

/// First item (category order, then item order) whose fields contain `term`.
fn search(catalog: &Catalog, tech: usize, term: &str, reply: &mut Reply) {
    let needle = term.to_lowercase();
    let hit = catalog.technology(tech).and_then(|t| {
        t.categories.iter().find_map(|c| {
            c.items
                .iter()
                .find(|item| format::search_text(item).contains(&needle))
                .map(|item| (c, item))
        })
    });
    match hit {
        Some((category, item)) => {
            let formatted = format::format(item);
            reply.say(messages::search_hit(&category.name));
            reply.say(messages::item_details(formatted.title.as_deref()));
            reply.code(formatted.body);
            if let Some(example) = formatted.example {
                reply.say(messages::EXAMPLE_HEADER);
                reply.code(example);
            }
            reply.say(messages::MENU_HINT);
        }
        None => {
            reply.reject(Rejection::NotFound {
                term: term.to_string(),
            });
            reply.say(messages::MENU_HINT);
        }
    }
}
