// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt::Write;

use chrono::NaiveDate;
use trellis_core::{DependencyEdge, Milestone, Project, ProjectStatistics, Task};

use crate::colors::{self, codes};

/// Format a task for one-line list output.
pub fn format_task_line(task: &Task, color: bool) -> String {
    let status = colors::paint(task.status.as_str(), colors::status_code(task.status), color);
    let detail = match &task.assignee {
        Some(assignee) => format!("{}, @{}", task.priority, assignee),
        None => task.priority.to_string(),
    };
    format!("- [{}] ({}) {}: {}", status, detail, task.id, task.title)
}

/// Format a milestone for one-line list output.
pub fn format_milestone_line(milestone: &Milestone, today: NaiveDate, color: bool) -> String {
    let state = if milestone.is_completed {
        colors::paint("done", codes::DONE, color)
    } else if milestone.is_overdue(today) {
        colors::paint("overdue", codes::WARNING, color)
    } else {
        "open".to_string()
    };
    format!(
        "- [{}] (due {}) {}: {}",
        state, milestone.due_date, milestone.id, milestone.name
    )
}

pub fn format_project_line(project: &Project, is_default: bool) -> String {
    let marker = if is_default { "* " } else { "  " };
    format!("{}{}: {}", marker, project.id, project.name)
}

fn push_edges(out: &mut String, heading: &str, edges: &[String]) {
    if edges.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}:", heading);
    for edge in edges {
        let _ = writeln!(out, "  - {}", edge);
    }
}

fn prerequisite_lines(edges: &[DependencyEdge], typed: bool) -> Vec<String> {
    edges
        .iter()
        .map(|e| {
            if typed {
                format!("{} ({})", e.prerequisite_id, e.dependency_type)
            } else {
                e.prerequisite_id.clone()
            }
        })
        .collect()
}

fn dependent_lines(edges: &[DependencyEdge], typed: bool) -> Vec<String> {
    edges
        .iter()
        .map(|e| {
            if typed {
                format!("{} ({})", e.dependent_id, e.dependency_type)
            } else {
                e.dependent_id.clone()
            }
        })
        .collect()
}

/// Format task details for the show command.
pub fn format_task_details(
    task: &Task,
    prerequisites: &[DependencyEdge],
    dependents: &[DependencyEdge],
    blocked: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", task.id, task.title);
    let _ = writeln!(out, "Status: {}{}", task.status, if blocked { " (blocked)" } else { "" });
    let _ = writeln!(out, "Priority: {}", task.priority);
    if let Some(assignee) = &task.assignee {
        let _ = writeln!(out, "Assignee: {}", assignee);
    }
    let _ = writeln!(
        out,
        "Hours: {:.1} estimated, {:.1} actual",
        task.estimated_hours, task.actual_hours
    );
    if let Some(due) = task.due_date {
        let _ = writeln!(out, "Due: {}", due);
    }
    let _ = writeln!(out, "Created: {}", task.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(started) = task.started_at {
        let _ = writeln!(out, "Started: {}", started.format("%Y-%m-%d %H:%M"));
    }
    if let Some(completed) = task.completed_at {
        let _ = writeln!(out, "Completed: {}", completed.format("%Y-%m-%d %H:%M"));
    }
    if let Some(description) = &task.description {
        let _ = writeln!(out, "\nDescription:\n  {}", description);
    }
    push_edges(&mut out, "Depends on", &prerequisite_lines(prerequisites, true));
    push_edges(&mut out, "Required by", &dependent_lines(dependents, true));
    out.trim_end().to_string()
}

/// Format milestone details for the show command.
pub fn format_milestone_details(
    milestone: &Milestone,
    prerequisites: &[DependencyEdge],
    dependents: &[DependencyEdge],
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", milestone.id, milestone.name);
    let state = if milestone.is_completed {
        "completed"
    } else if milestone.is_overdue(today) {
        "overdue"
    } else {
        "open"
    };
    let _ = writeln!(out, "Status: {}", state);
    let _ = writeln!(out, "Due: {}", milestone.due_date);
    if let Some(completed) = milestone.completed_at {
        let _ = writeln!(out, "Completed: {}", completed.format("%Y-%m-%d %H:%M"));
    }
    if let Some(description) = &milestone.description {
        let _ = writeln!(out, "\nDescription:\n  {}", description);
    }
    push_edges(&mut out, "Depends on", &prerequisite_lines(prerequisites, false));
    push_edges(&mut out, "Required by", &dependent_lines(dependents, false));
    out.trim_end().to_string()
}

/// Format statistics for the stats command.
pub fn format_statistics(stats: &ProjectStatistics) -> String {
    let t = &stats.tasks;
    let m = &stats.milestones;
    let mut out = String::new();
    let _ = writeln!(out, "Project {} as of {}", stats.project_id, stats.as_of);
    let _ = writeln!(out, "\nTasks: {} total, {:.1}% complete", t.total, t.completion_percentage);
    let _ = writeln!(
        out,
        "  todo {}, in progress {}, review {}, done {}",
        t.todo, t.in_progress, t.review, t.completed
    );
    let _ = writeln!(out, "  overdue {}", t.overdue);
    if let Some(hours) = t.average_completion_time_hours {
        let _ = writeln!(out, "  average completion {:.1}h", hours);
    }
    let _ = writeln!(
        out,
        "\nMilestones: {} total, {:.1}% complete",
        m.total, m.completion_percentage
    );
    let _ = writeln!(
        out,
        "  completed {}, upcoming {}, overdue {}",
        m.completed, m.upcoming, m.overdue
    );
    if let Some(days) = m.average_completion_time_days {
        let _ = writeln!(out, "  average completion {:.1}d", days);
    }
    out.trim_end().to_string()
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
