// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle state machines for work items.
//!
//! Status values are written directly (any task status may follow any
//! other), but the timestamps they imply are derived here and nowhere else:
//!
//! | Transition              | Effect                              |
//! |-------------------------|-------------------------------------|
//! | `ToDo -> InProgress`    | `started_at = now` if unset         |
//! | non-Done `-> Done`      | `completed_at = now`                |
//! | `Done ->` non-Done      | `completed_at` cleared              |
//! | milestone `false->true` | `completed_at = now`                |
//! | milestone `true->false` | `completed_at` cleared              |
//!
//! Writing the current state again has no effect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::milestone::Milestone;
use crate::task::{Task, TaskStatus};

/// What a transition does to one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampChange {
    Keep,
    /// Set to now, unless a value is already present.
    SetIfUnset,
    /// Set to now, replacing any previous value.
    Set,
    Clear,
}

impl StampChange {
    fn apply(self, current: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            StampChange::Keep => current,
            StampChange::SetIfUnset => current.or(Some(now)),
            StampChange::Set => Some(now),
            StampChange::Clear => None,
        }
    }
}

/// The timestamp side effects of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampEffect {
    pub started_at: StampChange,
    pub completed_at: StampChange,
}

impl TimestampEffect {
    pub const NONE: TimestampEffect = TimestampEffect {
        started_at: StampChange::Keep,
        completed_at: StampChange::Keep,
    };

    /// Returns true if the transition leaves both timestamps alone.
    pub fn is_none(&self) -> bool {
        *self == TimestampEffect::NONE
    }
}

/// Lifecycle timestamps carried by a work item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    /// Applies `effect` as of `now`.
    pub fn apply(self, effect: TimestampEffect, now: DateTime<Utc>) -> Timestamps {
        Timestamps {
            started_at: effect.started_at.apply(self.started_at, now),
            completed_at: effect.completed_at.apply(self.completed_at, now),
        }
    }
}

/// Kind-specific status semantics.
pub trait Lifecycle {
    /// The value a caller writes: a [`TaskStatus`] for tasks, the completion
    /// flag for milestones.
    type State: Copy + PartialEq + std::fmt::Debug;

    /// Timestamp effects of moving from `from` to `to`.
    fn effect(from: Self::State, to: Self::State) -> TimestampEffect;

    /// Derives the timestamps that follow from a transition.
    fn transition(
        from: Self::State,
        to: Self::State,
        stamps: Timestamps,
        now: DateTime<Utc>,
    ) -> Timestamps {
        stamps.apply(Self::effect(from, to), now)
    }
}

impl Lifecycle for Task {
    type State = TaskStatus;

    fn effect(from: TaskStatus, to: TaskStatus) -> TimestampEffect {
        if from == to {
            return TimestampEffect::NONE;
        }
        match (from, to) {
            (TaskStatus::ToDo, TaskStatus::InProgress) => TimestampEffect {
                started_at: StampChange::SetIfUnset,
                completed_at: StampChange::Keep,
            },
            (_, TaskStatus::Done) => TimestampEffect {
                started_at: StampChange::Keep,
                completed_at: StampChange::Set,
            },
            (TaskStatus::Done, _) => TimestampEffect {
                started_at: StampChange::Keep,
                completed_at: StampChange::Clear,
            },
            _ => TimestampEffect::NONE,
        }
    }
}

impl Lifecycle for Milestone {
    type State = bool;

    fn effect(from: bool, to: bool) -> TimestampEffect {
        match (from, to) {
            (false, true) => TimestampEffect {
                started_at: StampChange::Keep,
                completed_at: StampChange::Set,
            },
            (true, false) => TimestampEffect {
                started_at: StampChange::Keep,
                completed_at: StampChange::Clear,
            },
            _ => TimestampEffect::NONE,
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
