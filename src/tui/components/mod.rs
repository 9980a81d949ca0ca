//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: Top status bar showing input mode and status
//! - `Message`: One transcript entry (prose or highlighted code)
//! - `OptionsBar`: The current menu as clickable numbered cells
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Single-line text input
//! - `MessageList`: Scrollable transcript with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into the `App`:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! OptionsBar::new(&app.transcript.options, show_back, hovered).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! options_bar.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single entry renderer)
//! ├── message_list.rs  (Scrollable transcript)
//! ├── options_bar.rs   (Clickable menu)
//! └── input_box.rs     (Text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod options_bar;
pub use options_bar::{OptionHit, OptionsBar};
