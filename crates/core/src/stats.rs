// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate figures computed on demand from current item state.
//!
//! Nothing here is persisted; every call is a single O(n) pass over the
//! items handed in, so results always match the state that was read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::milestone::Milestone;
use crate::task::{Task, TaskStatus};

/// Completion figures for a project's tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub review: usize,
    pub todo: usize,
    /// Not done and due before today.
    pub overdue: usize,
    /// `completed / total * 100`, or 0 for an empty project.
    pub completion_percentage: f64,
    /// Mean `completed_at - started_at` in hours over done tasks that have
    /// both timestamps.
    pub average_completion_time_hours: Option<f64>,
}

/// Completion figures for a project's milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStatistics {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Not completed and due today or later.
    pub upcoming: usize,
    pub completion_percentage: f64,
    /// Mean days from creation to completion over completed milestones.
    pub average_completion_time_days: Option<f64>,
}

/// Task and milestone statistics for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatistics {
    pub project_id: String,
    /// The date overdue/upcoming were judged against.
    pub as_of: NaiveDate,
    pub tasks: TaskStatistics,
    pub milestones: MilestoneStatistics,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Computes task statistics as of `today`.
pub fn task_statistics(tasks: &[Task], today: NaiveDate) -> TaskStatistics {
    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

    let completed = count(TaskStatus::Done);

    // Done tasks that never passed through InProgress have no started_at and
    // are left out rather than counted as zero.
    let durations: Vec<f64> = tasks
        .iter()
        .filter(|t| t.status.is_done())
        .filter_map(|t| match (t.started_at, t.completed_at) {
            (Some(started), Some(completed)) => {
                Some((completed - started).num_milliseconds() as f64 / 3_600_000.0)
            }
            _ => None,
        })
        .collect();

    TaskStatistics {
        total: tasks.len(),
        completed,
        in_progress: count(TaskStatus::InProgress),
        review: count(TaskStatus::Review),
        todo: count(TaskStatus::ToDo),
        overdue: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        completion_percentage: percentage(completed, tasks.len()),
        average_completion_time_hours: mean(&durations),
    }
}

/// Computes milestone statistics as of `today`.
pub fn milestone_statistics(milestones: &[Milestone], today: NaiveDate) -> MilestoneStatistics {
    let completed = milestones.iter().filter(|m| m.is_completed).count();

    let durations: Vec<f64> = milestones
        .iter()
        .filter(|m| m.is_completed)
        .filter_map(|m| {
            m.completed_at
                .map(|done| (done.date_naive() - m.created_at.date_naive()).num_days() as f64)
        })
        .collect();

    MilestoneStatistics {
        total: milestones.len(),
        completed,
        overdue: milestones.iter().filter(|m| m.is_overdue(today)).count(),
        upcoming: milestones.iter().filter(|m| m.is_upcoming(today)).count(),
        completion_percentage: percentage(completed, milestones.len()),
        average_completion_time_days: mean(&durations),
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
