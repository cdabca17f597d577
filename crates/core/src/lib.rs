// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! trellis-core: dependency graph and lifecycle engine for project work items
//!
//! This crate provides the data model, SQLite store, dependency graph rules,
//! status lifecycle, and statistics used by the trellis CLI.

pub mod clock;
pub mod db;
pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod kind;
pub mod lifecycle;
pub mod milestone;
pub mod project;
pub mod query;
pub mod stats;
pub mod task;
pub mod validate;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use db::Database;
pub use edge::{DependencyEdge, DependencyType};
pub use error::{Error, ErrorKind, Result};
pub use graph::DependencyGraph;
pub use kind::WorkItemKind;
pub use lifecycle::{Lifecycle, StampChange, TimestampEffect, Timestamps};
pub use milestone::{Milestone, MilestoneUpdate, NewMilestone};
pub use project::Project;
pub use query::{SortField, SortOrder, TaskFilter};
pub use stats::{MilestoneStatistics, ProjectStatistics, TaskStatistics};
pub use task::{NewTask, Priority, Task, TaskStatus, TaskUpdate};
