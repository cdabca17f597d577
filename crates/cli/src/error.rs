// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by the `trellis` command line.
///
/// Engine failures pass through unchanged so their hints reach the user.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'trellis init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("no project selected\n  hint: pass --project <id>, set TRELLIS_PROJECT, or run 'trellis project use <id>'")]
    NoProject,

    #[error("cannot link {dependent} to {prerequisite}: tasks and milestones have separate graphs")]
    MixedKinds {
        dependent: String,
        prerequisite: String,
    },

    #[error("unrecognized item id: '{0}'\n  hint: task ids start with 'task-', milestone ids with 'ms-'")]
    UnknownItemKind(String),

    #[error("invalid date: '{0}'\n  hint: use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("dependency cycle found: {}", .0.join(" -> "))]
    CycleFound(Vec<String>),

    #[error("dependency not found: {dependent} -> {prerequisite}")]
    DependencyNotFound {
        dependent: String,
        prerequisite: String,
    },

    #[error("nothing to update\n  hint: pass at least one field flag")]
    NothingToUpdate,

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] trellis_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
