//! # Replies
//!
//! What the session hands back after each command, and the [`Presenter`]
//! seam a UI implements to show it.
//!
//! ```text
//! Session::handle_input("1")  →  Reply [Message, Message, Options]
//!                                   │
//!                         reply.present(&mut ui)
//!                                   ▼
//!            display_message / display_options / clear_display
//! ```

use std::fmt;

/// Rendering surface for session output.
pub trait Presenter {
    fn display_message(&mut self, text: &str, from_user: bool, is_code: bool);
    /// Replace the clickable options. Option `i` (0-based) selects index `i + 1`.
    fn display_options(&mut self, labels: &[String]);
    fn clear_display(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Message {
        text: String,
        from_user: bool,
        is_code: bool,
    },
    Options(Vec<String>),
    Clear,
}

/// A recoverable problem with the last command. The state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Number outside `[1, max]` for the current menu.
    InvalidIndex { index: i64, max: usize },
    /// Free text where a number was expected.
    InvalidInput,
    /// Search term matched no entry.
    NotFound { term: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::core::messages;
        match self {
            Rejection::InvalidIndex { max: 0, .. } => f.write_str(messages::NOTHING_TO_SELECT),
            Rejection::InvalidIndex { max, .. } => f.write_str(&messages::invalid_index(*max)),
            Rejection::InvalidInput => f.write_str(messages::INVALID_INPUT),
            Rejection::NotFound { term } => f.write_str(&messages::not_found(term)),
        }
    }
}

impl std::error::Error for Rejection {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub outputs: Vec<Output>,
    pub rejection: Option<Rejection>,
}

impl Reply {
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn say(&mut self, text: impl Into<String>) {
        self.outputs.push(Output::Message {
            text: text.into(),
            from_user: false,
            is_code: false,
        });
    }

    pub fn code(&mut self, text: impl Into<String>) {
        self.outputs.push(Output::Message {
            text: text.into(),
            from_user: false,
            is_code: true,
        });
    }

    pub fn echo(&mut self, text: impl Into<String>) {
        self.outputs.push(Output::Message {
            text: text.into(),
            from_user: true,
            is_code: false,
        });
    }

    pub fn options(&mut self, labels: Vec<String>) {
        self.outputs.push(Output::Options(labels));
    }

    pub fn clear(&mut self) {
        self.outputs.push(Output::Clear);
    }

    /// Record a rejection and show its message.
    pub fn reject(&mut self, rejection: Rejection) {
        self.say(rejection.to_string());
        self.rejection = Some(rejection);
    }

    /// Bot messages, in order. Handy for assertions.
    pub fn messages(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .filter_map(|o| match o {
                Output::Message {
                    text,
                    from_user: false,
                    ..
                } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The last option list in this reply, if any.
    pub fn last_options(&self) -> Option<&[String]> {
        self.outputs.iter().rev().find_map(|o| match o {
            Output::Options(labels) => Some(labels.as_slice()),
            _ => None,
        })
    }

    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        for output in &self.outputs {
            match output {
                Output::Message {
                    text,
                    from_user,
                    is_code,
                } => presenter.display_message(text, *from_user, *is_code),
                Output::Options(labels) => presenter.display_options(labels),
                Output::Clear => presenter.clear_display(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Presenter for Recorder {
        fn display_message(&mut self, text: &str, from_user: bool, is_code: bool) {
            self.calls.push(format!("msg({text},{from_user},{is_code})"));
        }
        fn display_options(&mut self, labels: &[String]) {
            self.calls.push(format!("opts({})", labels.join("|")));
        }
        fn clear_display(&mut self) {
            self.calls.push("clear".to_string());
        }
    }

    #[test]
    fn test_present_replays_in_order() {
        let mut reply = Reply::default();
        reply.echo("1");
        reply.clear();
        reply.say("hi");
        reply.code("<div>");
        reply.options(vec!["A".into(), "B".into()]);

        let mut recorder = Recorder::default();
        reply.present(&mut recorder);
        assert_eq!(
            recorder.calls,
            vec![
                "msg(1,true,false)",
                "clear",
                "msg(hi,false,false)",
                "msg(<div>,false,true)",
                "opts(A|B)",
            ]
        );
    }

    #[test]
    fn test_reject_records_and_says() {
        let mut reply = Reply::default();
        reply.reject(Rejection::InvalidIndex { index: 7, max: 5 });
        assert_eq!(
            reply.rejection,
            Some(Rejection::InvalidIndex { index: 7, max: 5 })
        );
        assert_eq!(reply.messages(), vec!["Invalid number. Please choose a number between 1 and 5."]);
    }

    #[test]
    fn test_messages_skip_user_echo() {
        let mut reply = Reply::default();
        reply.echo("menu");
        reply.say("Welcome");
        assert_eq!(reply.messages(), vec!["Welcome"]);
        assert!(reply.last_options().is_none());
    }
}
