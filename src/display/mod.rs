// src/display/mod.rs
//! Console output for emitted sentences

pub mod terminal;

pub use terminal::SentenceEcho;

use std::io::IsTerminal;

/// Color only when stdout is a terminal and `NO_COLOR` is unset
pub fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}
