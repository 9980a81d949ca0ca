//! # Core Application Logic
//!
//! This module contains techchat's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog (store)      │
//!                    │  • Session (navigation) │
//!                    │  • Reply (output)       │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Presenter
//!                     ┌──────────┴──────────┐
//!                     ▼                     ▼
//!              ┌────────────┐        ┌────────────┐
//!              │    TUI     │        │   Tests    │
//!              │  Adapter   │        │ (recorder) │
//!              │ (ratatui)  │        │            │
//!              └────────────┘        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: technologies → categories → items, parsed from JSON
//! - [`format`]: turns an item into title, body and example
//! - [`navigation`]: the `Session` state machine behind every answer
//! - [`reply`]: what a session says back, and the `Presenter` that shows it
//! - [`state`]: the `App` struct holding all application state
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: settings file, env vars and CLI overrides

pub mod action;
pub mod catalog;
pub mod config;
pub mod format;
pub mod messages;
pub mod navigation;
pub mod reply;
pub mod state;
