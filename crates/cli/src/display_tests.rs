// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::{DateTime, TimeZone, Utc};
use trellis_core::{
    DependencyType, MilestoneStatistics, Priority, TaskStatistics, TaskStatus,
};

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task() -> Task {
    Task {
        id: "task-1a2b3c4d".into(),
        project_id: "proj-00000000".into(),
        title: "Write docs".into(),
        description: None,
        assignee: None,
        status: TaskStatus::InProgress,
        priority: Priority::High,
        estimated_hours: 3.0,
        actual_hours: 1.5,
        due_date: None,
        started_at: Some(at()),
        completed_at: None,
        created_at: at(),
        updated_at: at(),
    }
}

fn milestone() -> Milestone {
    Milestone {
        id: "ms-1a2b3c4d".into(),
        project_id: "proj-00000000".into(),
        name: "Beta".into(),
        description: None,
        due_date: date(2026, 6, 1),
        is_completed: false,
        completed_at: None,
        created_at: at(),
        updated_at: at(),
    }
}

fn edge(dependent: &str, prerequisite: &str, ty: DependencyType) -> DependencyEdge {
    DependencyEdge {
        dependent_id: dependent.into(),
        prerequisite_id: prerequisite.into(),
        dependency_type: ty,
        created_at: at(),
    }
}

#[test]
fn test_format_task_line() {
    assert_eq!(
        format_task_line(&task(), false),
        "- [InProgress] (High) task-1a2b3c4d: Write docs"
    );
}

#[test]
fn test_format_task_line_with_assignee() {
    let mut t = task();
    t.assignee = Some("alice".into());
    assert_eq!(
        format_task_line(&t, false),
        "- [InProgress] (High, @alice) task-1a2b3c4d: Write docs"
    );
}

#[test]
fn test_format_milestone_line_states() {
    let mut ms = milestone();
    assert_eq!(
        format_milestone_line(&ms, date(2026, 5, 4), false),
        "- [open] (due 2026-06-01) ms-1a2b3c4d: Beta"
    );
    assert!(format_milestone_line(&ms, date(2026, 6, 2), false).starts_with("- [overdue]"));

    ms.is_completed = true;
    assert!(format_milestone_line(&ms, date(2026, 6, 2), false).starts_with("- [done]"));
}

#[test]
fn test_format_task_details_lists_edges() {
    let t = task();
    let prereqs = [edge(&t.id, "task-aaaaaaaa", DependencyType::DependsOn)];
    let dependents = [edge("task-bbbbbbbb", &t.id, DependencyType::Blocks)];
    let out = format_task_details(&t, &prereqs, &dependents, true);

    assert!(out.starts_with("[task-1a2b3c4d] Write docs\nStatus: InProgress (blocked)"));
    assert!(out.contains("Hours: 3.0 estimated, 1.5 actual"));
    assert!(out.contains("Started: 2026-05-04 09:30"));
    assert!(out.contains("Depends on:\n  - task-aaaaaaaa (DependsOn)"));
    assert!(out.contains("Required by:\n  - task-bbbbbbbb (Blocks)"));
}

#[test]
fn test_format_milestone_details_omits_empty_sections() {
    let out = format_milestone_details(&milestone(), &[], &[], date(2026, 5, 4));
    assert_eq!(out, "[ms-1a2b3c4d] Beta\nStatus: open\nDue: 2026-06-01");
}

#[test]
fn test_format_project_line_marks_default() {
    let project = Project {
        id: "proj-1".into(),
        name: "Apollo".into(),
        description: None,
        created_at: at(),
        updated_at: at(),
    };
    assert_eq!(format_project_line(&project, true), "* proj-1: Apollo");
    assert_eq!(format_project_line(&project, false), "  proj-1: Apollo");
}

#[test]
fn test_format_statistics() {
    let stats = ProjectStatistics {
        project_id: "proj-1".into(),
        as_of: date(2026, 5, 6),
        tasks: TaskStatistics {
            total: 4,
            completed: 2,
            in_progress: 1,
            review: 0,
            todo: 1,
            overdue: 1,
            completion_percentage: 50.0,
            average_completion_time_hours: Some(4.0),
        },
        milestones: MilestoneStatistics {
            total: 0,
            completed: 0,
            overdue: 0,
            upcoming: 0,
            completion_percentage: 0.0,
            average_completion_time_days: None,
        },
    };
    let out = format_statistics(&stats);
    assert!(out.contains("Tasks: 4 total, 50.0% complete"));
    assert!(out.contains("todo 1, in progress 1, review 0, done 2"));
    assert!(out.contains("average completion 4.0h"));
    assert!(out.contains("Milestones: 0 total, 0.0% complete"));
    assert!(!out.contains("average completion 0"));
}
