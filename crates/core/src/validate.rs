// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Field validation shared by project, task, and milestone writes.

use chrono::NaiveDate;

use crate::error::{Error, Result};

// Input length limits
pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 1_000_000;
pub const MAX_ASSIGNEE_LENGTH: usize = 100;

/// Validate a title or name, returning it trimmed.
pub fn validate_name(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldEmpty { field });
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(Error::FieldTooLong {
            field,
            actual: len,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Validate that a description is within length limits
pub fn validate_description(description: &str) -> Result<()> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(Error::FieldTooLong {
            field: "Description",
            actual: description.len(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(())
}

/// Validate that an assignee is valid (non-empty after trimming, within length limits)
pub fn validate_assignee(assignee: &str) -> Result<String> {
    let trimmed = assignee.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldEmpty { field: "Assignee" });
    }
    if trimmed.len() > MAX_ASSIGNEE_LENGTH {
        return Err(Error::FieldTooLong {
            field: "Assignee",
            actual: trimmed.len(),
            max: MAX_ASSIGNEE_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Reject due dates earlier than `today`.
pub fn validate_due_date(due: NaiveDate, today: NaiveDate) -> Result<()> {
    if due < today {
        return Err(Error::DueDateInPast(due));
    }
    Ok(())
}

/// Validate an hours field (finite and non-negative).
pub fn validate_hours(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::NegativeHours { field, value });
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
