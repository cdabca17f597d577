// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::db::test_helpers::{day, t0, Fixture};
use crate::task::Priority;
use crate::ErrorKind;
use chrono::Duration;
use yare::parameterized;

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn create_task_defaults() {
    let mut f = Fixture::new();
    let task = f
        .db
        .create_task(&NewTask::new(f.project.clone(), "  Write docs "), &[])
        .unwrap();

    assert!(task.id.starts_with("task-"));
    assert_eq!(task.project_id, f.project);
    assert_eq!(task.title, "Write docs");
    assert_eq!(task.status, TaskStatus::ToDo);
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.estimated_hours, 0.0);
    assert_eq!(task.actual_hours, 0.0);
    assert!(task.started_at.is_none());
    assert!(task.completed_at.is_none());
    assert_eq!(task.created_at, t0());
    assert_eq!(task.updated_at, t0());

    assert_eq!(f.db.get_task(&task.id).unwrap(), task);
    assert!(f.db.task_exists(&task.id).unwrap());
}

#[test]
fn create_task_with_all_fields() {
    let mut f = Fixture::new();
    let new = NewTask::new(f.project.clone(), "Migrate")
        .with_description("Move the data")
        .with_assignee(" sam ")
        .with_priority(Priority::Critical)
        .with_estimated_hours(6.5)
        .with_due_date(day(7));
    let task = f.db.create_task(&new, &[]).unwrap();

    assert_eq!(task.description.as_deref(), Some("Move the data"));
    assert_eq!(task.assignee.as_deref(), Some("sam"));
    assert_eq!(task.priority, Priority::Critical);
    assert_eq!(task.estimated_hours, 6.5);
    assert_eq!(task.due_date, Some(day(7)));
}

#[parameterized(
    empty_title = { NewTask { title: "  ".into(), ..NewTask::default() } },
    long_title = { NewTask { title: "t".repeat(256), ..NewTask::default() } },
    negative_estimate = { NewTask { title: "t".into(), estimated_hours: Some(-1.0), ..NewTask::default() } },
    past_due = { NewTask { title: "t".into(), due_date: Some(day(-1)), ..NewTask::default() } },
    blank_assignee = { NewTask { title: "t".into(), assignee: Some(" ".into()), ..NewTask::default() } },
)]
fn create_task_rejects_invalid_fields(new: NewTask) {
    let mut new = new;
    let mut f = Fixture::new();
    new.project_id = f.project.clone();

    let err = f.db.create_task(&new, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation, "{err}");
    assert_eq!(f.count("tasks"), 0);
}

#[test]
fn due_today_is_allowed() {
    let mut f = Fixture::new();
    let new = NewTask::new(f.project.clone(), "Today").with_due_date(day(0));
    assert!(f.db.create_task(&new, &[]).is_ok());
}

#[test]
fn create_task_in_unknown_project() {
    let mut f = Fixture::new();
    let err = f
        .db
        .create_task(&NewTask::new("proj-missing", "Orphan"), &[])
        .unwrap_err();
    assert!(matches!(err, Error::ProjectNotFound(_)));
}

#[test]
fn status_transitions_derive_timestamps() {
    let mut f = Fixture::new();
    let id = f.task("Ship");

    f.advance(Duration::hours(1));
    let t1 = t0() + Duration::hours(1);
    let started = f.db.update_task_status(&id, TaskStatus::InProgress).unwrap();
    assert_eq!(started.status, TaskStatus::InProgress);
    assert_eq!(started.started_at, Some(t1));
    assert!(started.completed_at.is_none());
    assert_eq!(started.updated_at, t1);

    f.advance(Duration::hours(2));
    let t2 = t1 + Duration::hours(2);
    let done = f.db.update_task_status(&id, TaskStatus::Done).unwrap();
    assert_eq!(done.started_at, Some(t1));
    assert_eq!(done.completed_at, Some(t2));

    f.advance(Duration::hours(1));
    let reopened = f.db.update_task_status(&id, TaskStatus::InProgress).unwrap();
    assert_eq!(reopened.started_at, Some(t1));
    assert!(reopened.completed_at.is_none());
}

#[test]
fn same_status_write_changes_nothing() {
    let mut f = Fixture::new();
    let id = f.task("Idle");
    f.advance(Duration::hours(1));
    f.db.update_task_status(&id, TaskStatus::Review).unwrap();
    let before = f.db.get_task(&id).unwrap();

    f.advance(Duration::hours(1));
    let after = f.db.update_task_status(&id, TaskStatus::Review).unwrap();
    assert_eq!(after, before);
}

#[test]
fn restart_keeps_first_started_at() {
    let mut f = Fixture::new();
    let id = f.task("Flaky");

    f.db.update_task_status(&id, TaskStatus::InProgress).unwrap();
    f.advance(Duration::hours(1));
    f.db.update_task_status(&id, TaskStatus::ToDo).unwrap();
    f.advance(Duration::hours(1));
    let again = f.db.update_task_status(&id, TaskStatus::InProgress).unwrap();
    assert_eq!(again.started_at, Some(t0()));
}

#[test]
fn straight_to_done_has_no_started_at() {
    let mut f = Fixture::new();
    let id = f.task("Trivial");
    let done = f.db.update_task_status(&id, TaskStatus::Done).unwrap();
    assert!(done.started_at.is_none());
    assert_eq!(done.completed_at, Some(t0()));
}

#[test]
fn status_of_unknown_task() {
    let mut f = Fixture::new();
    let err = f
        .db
        .update_task_status("task-missing", TaskStatus::Done)
        .unwrap_err();
    assert!(matches!(err, Error::TaskNotFound(_)));
}

#[test]
fn update_task_edits_fields_only() {
    let mut f = Fixture::new();
    let id = f.task("Draft");
    f.db.update_task_status(&id, TaskStatus::InProgress).unwrap();

    f.advance(Duration::minutes(5));
    let update = TaskUpdate {
        title: Some("Final".into()),
        priority: Some(Priority::High),
        actual_hours: Some(2.0),
        due_date: Some(day(3)),
        ..TaskUpdate::default()
    };
    let task = f.db.update_task(&id, &update).unwrap();

    assert_eq!(task.title, "Final");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.actual_hours, 2.0);
    assert_eq!(task.due_date, Some(day(3)));
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.started_at, Some(t0()));
    assert_eq!(task.updated_at, t0() + Duration::minutes(5));
}

#[test]
fn empty_update_returns_current_task() {
    let mut f = Fixture::new();
    let id = f.task("Same");
    f.advance(Duration::hours(1));
    let task = f.db.update_task(&id, &TaskUpdate::default()).unwrap();
    assert_eq!(task.updated_at, t0());
}

#[parameterized(
    past_due = { TaskUpdate { due_date: Some(day(-3)), ..TaskUpdate::default() } },
    negative_actual = { TaskUpdate { actual_hours: Some(-0.5), ..TaskUpdate::default() } },
    empty_title = { TaskUpdate { title: Some(String::new()), ..TaskUpdate::default() } },
)]
fn update_task_rejects_invalid_fields(update: TaskUpdate) {
    let mut f = Fixture::new();
    let id = f.task("Keep");
    let err = f.db.update_task(&id, &update).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(f.db.get_task(&id).unwrap().title, "Keep");
}

#[test]
fn delete_task_and_unknown() {
    let mut f = Fixture::new();
    let id = f.task("Gone");
    f.db.delete_task(&id).unwrap();
    assert!(!f.db.task_exists(&id).unwrap());
    assert!(matches!(f.db.delete_task(&id), Err(Error::TaskNotFound(_))));
}

#[test]
fn list_tasks_by_status() {
    let mut f = Fixture::new();
    let a = f.task("A");
    let b = f.task("B");
    f.db.update_task_status(&b, TaskStatus::Done).unwrap();

    assert_eq!(ids(&f.db.list_tasks(&f.project, None).unwrap()), vec![a.as_str(), b.as_str()]);
    assert_eq!(
        ids(&f.db.list_tasks(&f.project, Some(TaskStatus::Done)).unwrap()),
        vec![b.as_str()]
    );
    assert!(matches!(
        f.db.list_tasks("proj-missing", None),
        Err(Error::ProjectNotFound(_))
    ));
}

#[test]
fn filter_tasks_combines_conditions() {
    let mut f = Fixture::new();
    let urgent = f
        .db
        .create_task(
            &NewTask::new(f.project.clone(), "Urgent")
                .with_priority(Priority::High)
                .with_assignee("kim")
                .with_due_date(day(1)),
            &[],
        )
        .unwrap()
        .id;
    let later = f
        .db
        .create_task(
            &NewTask::new(f.project.clone(), "Later")
                .with_priority(Priority::High)
                .with_due_date(day(20)),
            &[],
        )
        .unwrap()
        .id;
    let plain = f.task("Plain");
    f.db.add_dependency::<Task>(&plain, &urgent, DependencyType::Blocks)
        .unwrap();

    let high = TaskFilter {
        priority: Some(Priority::High),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&f.db.filter_tasks(&f.project, &high).unwrap()), vec![urgent.as_str(), later.as_str()]);

    let kim = TaskFilter {
        assignee: Some("kim".to_string()),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&f.db.filter_tasks(&f.project, &kim).unwrap()), vec![urgent.as_str()]);

    let window = TaskFilter {
        due_from: Some(day(0)),
        due_to: Some(day(10)),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&f.db.filter_tasks(&f.project, &window).unwrap()), vec![urgent.as_str()]);

    let with_prereqs = TaskFilter {
        has_prerequisites: Some(true),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&f.db.filter_tasks(&f.project, &with_prereqs).unwrap()), vec![plain.as_str()]);

    let without_prereqs = TaskFilter {
        has_prerequisites: Some(false),
        ..TaskFilter::default()
    };
    assert_eq!(f.db.filter_tasks(&f.project, &without_prereqs).unwrap().len(), 2);

    let limited = TaskFilter {
        limit: Some(1),
        ..TaskFilter::default()
    };
    assert_eq!(ids(&f.db.filter_tasks(&f.project, &limited).unwrap()), vec![urgent.as_str()]);
}

#[test]
fn overdue_filter_uses_database_clock() {
    let mut f = Fixture::new();
    let soon = f
        .db
        .create_task(
            &NewTask::new(f.project.clone(), "Soon").with_due_date(day(1)),
            &[],
        )
        .unwrap()
        .id;
    let finished = f
        .db
        .create_task(
            &NewTask::new(f.project.clone(), "Finished").with_due_date(day(1)),
            &[],
        )
        .unwrap()
        .id;
    f.db.update_task_status(&finished, TaskStatus::Done).unwrap();
    let undated = f.task("Undated");

    let overdue = TaskFilter {
        overdue: Some(true),
        ..TaskFilter::default()
    };
    assert!(f.db.filter_tasks(&f.project, &overdue).unwrap().is_empty());

    f.advance(Duration::days(3));
    assert_eq!(ids(&f.db.filter_tasks(&f.project, &overdue).unwrap()), vec![soon.as_str()]);

    let on_track = TaskFilter {
        overdue: Some(false),
        ..TaskFilter::default()
    };
    assert_eq!(
        ids(&f.db.filter_tasks(&f.project, &on_track).unwrap()),
        vec![finished.as_str(), undated.as_str()]
    );
}

#[test]
fn search_is_case_insensitive_over_title_and_description() {
    let mut f = Fixture::new();
    let login = f.task("Fix LOGIN page");
    let other = f
        .db
        .create_task(
            &NewTask::new(f.project.clone(), "Session work")
                .with_description("Touches the login flow"),
            &[],
        )
        .unwrap()
        .id;
    f.task("Unrelated");
    f.task("Reach 100% coverage");

    let found = f.db.search_tasks(&f.project, "Login", None).unwrap();
    assert_eq!(ids(&found), vec![login.as_str(), other.as_str()]);

    let limited = f.db.search_tasks(&f.project, "login", Some(1)).unwrap();
    assert_eq!(limited.len(), 1);

    assert_eq!(f.db.search_tasks(&f.project, "100%", None).unwrap().len(), 1);
    assert!(f.db.search_tasks(&f.project, "0% c", None).unwrap().len() == 1);
    assert!(f.db.search_tasks(&f.project, "_", None).unwrap().is_empty());
}

#[parameterized(
    lowercase_query = { "école" },
    uppercase_query = { "ÉCOLE" },
    description = { "größe" },
)]
fn search_folds_non_ascii_case(query: &str) {
    let mut f = Fixture::new();
    let id = f
        .db
        .create_task(
            &NewTask::new(f.project.clone(), "École rollout")
                .with_description("Check GRÖSSE and Größe labels"),
            &[],
        )
        .unwrap()
        .id;
    f.task("Ecole without accent");

    let found = f.db.search_tasks(&f.project, query, None).unwrap();
    assert_eq!(ids(&found), vec![id.as_str()]);
}

#[test]
fn sorted_tasks_by_priority_and_due_date() {
    let mut f = Fixture::new();
    let low = f
        .db
        .create_task(
            &NewTask::new(f.project.clone(), "low")
                .with_priority(Priority::Low)
                .with_due_date(day(9)),
            &[],
        )
        .unwrap()
        .id;
    let critical = f
        .db
        .create_task(
            &NewTask::new(f.project.clone(), "critical")
                .with_priority(Priority::Critical)
                .with_due_date(day(2)),
            &[],
        )
        .unwrap()
        .id;
    let undated = f.task("medium");

    let by_priority = f
        .db
        .sorted_tasks(&f.project, SortField::Priority, SortOrder::Desc, None)
        .unwrap();
    assert_eq!(ids(&by_priority), vec![critical.as_str(), undated.as_str(), low.as_str()]);

    for order in [SortOrder::Asc, SortOrder::Desc] {
        let by_due = f
            .db
            .sorted_tasks(&f.project, SortField::DueDate, order, None)
            .unwrap();
        assert_eq!(by_due.last().unwrap().id, undated, "{order:?}");
    }

    let by_title = f
        .db
        .sorted_tasks(&f.project, SortField::Title, SortOrder::Asc, Some(2))
        .unwrap();
    assert_eq!(ids(&by_title), vec![critical.as_str(), low.as_str()]);
}

#[test]
fn ready_tasks_wait_on_gating_prerequisites() {
    let mut f = Fixture::new();
    let design = f.task("Design");
    let build = f.task("Build");
    let notes = f.task("Notes");
    f.db.add_dependency::<Task>(&build, &design, DependencyType::Blocks)
        .unwrap();
    f.db.add_dependency::<Task>(&notes, &build, DependencyType::RelatedTo)
        .unwrap();

    assert_eq!(
        ids(&f.db.ready_tasks(&f.project).unwrap()),
        vec![design.as_str(), notes.as_str()]
    );
    assert!(f.db.is_task_blocked(&build).unwrap());
    assert!(!f.db.is_task_blocked(&notes).unwrap());

    f.db.update_task_status(&design, TaskStatus::Done).unwrap();
    assert_eq!(
        ids(&f.db.ready_tasks(&f.project).unwrap()),
        vec![build.as_str(), notes.as_str()]
    );
    assert!(!f.db.is_task_blocked(&build).unwrap());
    assert!(matches!(
        f.db.is_task_blocked("task-missing"),
        Err(Error::TaskNotFound(_))
    ));
}
