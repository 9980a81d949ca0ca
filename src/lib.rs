//! techchat library exports for testing

pub mod core;
pub mod source;
pub mod tui;

#[cfg(test)]
pub mod test_support;
