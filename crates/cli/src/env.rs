// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are named in [`vars`]
//! and read through the typed accessors below.

use std::path::PathBuf;

/// Environment variable names.
pub mod vars {
    /// Overrides the database location from `.trellis/config.toml`.
    pub const TRELLIS_DB: &str = "TRELLIS_DB";
    /// `tracing` filter directives, e.g. `trellis_core=debug`.
    pub const TRELLIS_LOG: &str = "TRELLIS_LOG";
    /// Selects the project when neither `--project` nor a default is set.
    pub const TRELLIS_PROJECT: &str = "TRELLIS_PROJECT";
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Returns the value of `TRELLIS_DB` if set and non-empty.
pub fn database() -> Option<PathBuf> {
    non_empty(std::env::var(vars::TRELLIS_DB).ok()).map(PathBuf::from)
}

/// Returns the value of `TRELLIS_PROJECT` if set and non-empty.
pub fn project() -> Option<String> {
    non_empty(std::env::var(vars::TRELLIS_PROJECT).ok())
}

/// Returns `true` if `NO_COLOR` is set to anything other than the empty string.
pub fn no_color() -> bool {
    non_empty(std::env::var(vars::NO_COLOR).ok()).is_some()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
