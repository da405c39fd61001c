//! Command parsing.

mod command;

pub use command::{Command, parse_command};
