// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for database tests.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use crate::clock::ManualClock;
use crate::milestone::NewMilestone;
use crate::task::NewTask;

use super::Database;

/// Fixed starting time for database tests.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap()
}

pub fn day(offset: i64) -> NaiveDate {
    t0().date_naive() + Duration::days(offset)
}

/// An in-memory database on a manual clock with one project created.
pub struct Fixture {
    pub db: Database,
    pub clock: Arc<ManualClock>,
    pub project: String,
}

impl Fixture {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(t0()));
        let mut db = Database::open_in_memory_with_clock(clock.clone()).unwrap();
        let project = db.create_project("Apollo", None).unwrap().id;
        Fixture {
            db,
            clock,
            project,
        }
    }

    /// Creates another project and returns its id.
    pub fn project(&mut self, name: &str) -> String {
        self.db.create_project(name, None).unwrap().id
    }

    /// Creates a task in the fixture project and returns its id.
    pub fn task(&mut self, title: &str) -> String {
        let new = NewTask::new(self.project.clone(), title);
        self.db.create_task(&new, &[]).unwrap().id
    }

    /// Creates a milestone due in 30 days and returns its id.
    pub fn milestone(&mut self, name: &str) -> String {
        let new = NewMilestone::new(self.project.clone(), name, day(30));
        self.db.create_milestone(&new, &[]).unwrap().id
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    pub fn count(&self, table: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        self.db.conn.query_row(&sql, [], |row| row.get(0)).unwrap()
    }
}
