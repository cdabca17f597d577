// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{day, TestContext};
use chrono::Duration;

#[test]
fn test_edit_impl_requires_a_field() {
    let mut ctx = TestContext::new();
    let id = ctx.create_milestone("Beta", 10);
    assert!(matches!(
        edit_impl(&mut ctx.db, &id, &MilestoneUpdate::default()),
        Err(Error::NothingToUpdate)
    ));

    let update = MilestoneUpdate {
        due_date: Some(day(20)),
        ..MilestoneUpdate::default()
    };
    assert_eq!(edit_impl(&mut ctx.db, &id, &update).unwrap().due_date, day(20));
}

#[test]
fn test_edit_impl_surfaces_past_due_date() {
    let mut ctx = TestContext::new();
    let id = ctx.create_milestone("Beta", 10);
    let update = MilestoneUpdate {
        due_date: Some(day(-1)),
        ..MilestoneUpdate::default()
    };
    assert!(matches!(
        edit_impl(&mut ctx.db, &id, &update),
        Err(Error::Core(trellis_core::Error::DueDateInPast(_)))
    ));
}

#[test]
fn test_set_completed_impl_toggles() {
    let mut ctx = TestContext::new();
    let a = ctx.create_milestone("A", 5);
    let b = ctx.create_milestone("B", 6);

    ctx.clock.advance(Duration::days(1));
    let done = set_completed_impl(&mut ctx.db, &[a.clone(), b.clone()], true).unwrap();
    assert!(done.iter().all(|m| m.is_completed && m.completed_at.is_some()));

    let reopened = set_completed_impl(&mut ctx.db, &[a], false).unwrap();
    assert!(!reopened[0].is_completed);
    assert!(reopened[0].completed_at.is_none());
}

#[test]
fn test_set_completed_impl_checks_all_ids_first() {
    let mut ctx = TestContext::new();
    let a = ctx.create_milestone("A", 5);
    let result = set_completed_impl(&mut ctx.db, &[a.clone(), "ms-missing".into()], true);
    assert!(result.is_err());
    assert!(!ctx.db.get_milestone(&a).unwrap().is_completed);
}
