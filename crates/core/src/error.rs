// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for trellis-core operations.

use thiserror::Error;

/// Coarse classification of an [`Error`], used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced project, item, or edge does not exist.
    NotFound,
    /// Malformed input the caller can fix; never retried.
    Validation,
    /// The request conflicts with current graph state.
    Conflict,
    /// The backing store failed.
    Storage,
}

/// All possible errors that can occur in trellis-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("milestone not found: {0}")]
    MilestoneNotFound(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: ToDo, InProgress, Review, Done")]
    InvalidStatus(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: Low, Medium, High, Critical")]
    InvalidPriority(String),

    #[error(
        "invalid dependency type: '{0}'\n  hint: valid types are: Blocks, DependsOn, RelatedTo"
    )]
    InvalidDependencyType(String),

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("{field} is too long ({actual} characters, max {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("due date {0} is in the past")]
    DueDateInPast(chrono::NaiveDate),

    #[error("milestone requires a due date")]
    MissingDueDate,

    #[error("{field} must be a non-negative number, got {value}")]
    NegativeHours { field: &'static str, value: f64 },

    #[error("cannot create self-dependency: {0}\n  hint: an item cannot depend on itself")]
    SelfDependency(String),

    #[error("cannot link {dependent} to {prerequisite}: items belong to different projects")]
    CrossProjectEdge {
        dependent: String,
        prerequisite: String,
    },

    #[error("dependency already exists: {dependent} -> {prerequisite}")]
    DuplicateEdge {
        dependent: String,
        prerequisite: String,
    },

    #[error(
        "would create a dependency cycle: {prerequisite} already depends on {dependent}\n  hint: this would create a circular dependency chain"
    )]
    CycleDetected {
        dependent: String,
        prerequisite: String,
    },

    #[error("dependency graph is busy after {attempts} attempts\n  hint: retry the operation")]
    ConcurrencyConflict { attempts: u32 },

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Returns the category this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ProjectNotFound(_) | Error::TaskNotFound(_) | Error::MilestoneNotFound(_) => {
                ErrorKind::NotFound
            }
            Error::InvalidStatus(_)
            | Error::InvalidPriority(_)
            | Error::InvalidDependencyType(_)
            | Error::FieldEmpty { .. }
            | Error::FieldTooLong { .. }
            | Error::DueDateInPast(_)
            | Error::MissingDueDate
            | Error::NegativeHours { .. }
            | Error::SelfDependency(_)
            | Error::CrossProjectEdge { .. }
            | Error::InvalidInput(_) => ErrorKind::Validation,
            Error::DuplicateEdge { .. }
            | Error::CycleDetected { .. }
            | Error::ConcurrencyConflict { .. } => ErrorKind::Conflict,
            Error::Database(_) | Error::Io(_) | Error::Json(_) | Error::CorruptedData(_) => {
                ErrorKind::Storage
            }
        }
    }

    /// Returns true for caller-fixable input errors.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns true for errors reporting a conflict with existing state.
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

/// A specialized Result type for trellis-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
