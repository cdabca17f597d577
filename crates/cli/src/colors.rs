// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for list output.
//!
//! Colors are used only when stdout is a TTY and `NO_COLOR` is unset.

use std::io::IsTerminal;

use trellis_core::TaskStatus;

/// ANSI 256-color codes.
pub mod codes {
    pub const TODO: u8 = 250;
    pub const IN_PROGRESS: u8 = 74;
    pub const REVIEW: u8 = 179;
    pub const DONE: u8 = 108;
    pub const WARNING: u8 = 167;
}

const RESET: &str = "\x1b[0m";

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    !crate::env::no_color() && std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

/// Wrap `text` in the given color when `enabled`.
pub fn paint(text: &str, code: u8, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", fg256(code), text, RESET)
    } else {
        text.to_string()
    }
}

pub fn status_code(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::ToDo => codes::TODO,
        TaskStatus::InProgress => codes::IN_PROGRESS,
        TaskStatus::Review => codes::REVIEW,
        TaskStatus::Done => codes::DONE,
    }
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
