// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The [`WorkItemKind`] trait: what the graph and lifecycle code needs to
//! know about tasks versus milestones.
//!
//! The dependency graph manager is written once against this trait and
//! instantiated for [`Task`] and [`Milestone`]. Each kind has its own item
//! table and edge table, so the two graphs never share edges.

use crate::error::Error;
use crate::milestone::Milestone;
use crate::task::Task;

/// A kind of work item that can take part in a dependency graph.
pub trait WorkItemKind {
    /// Human-readable singular name, used in logs.
    const LABEL: &'static str;
    /// Prefix for generated identifiers.
    const ID_PREFIX: &'static str;
    /// Table holding the items.
    const ITEM_TABLE: &'static str;
    /// Table holding `dependent_id -> prerequisite_id` edges.
    const EDGE_TABLE: &'static str;
    /// Whether edges of this kind store a [`DependencyType`](crate::DependencyType).
    const TYPED_EDGES: bool;

    /// The error reported when an item of this kind does not exist.
    fn not_found(id: &str) -> Error;
}

impl WorkItemKind for Task {
    const LABEL: &'static str = "task";
    const ID_PREFIX: &'static str = "task";
    const ITEM_TABLE: &'static str = "tasks";
    const EDGE_TABLE: &'static str = "task_dependencies";
    const TYPED_EDGES: bool = true;

    fn not_found(id: &str) -> Error {
        Error::TaskNotFound(id.to_string())
    }
}

impl WorkItemKind for Milestone {
    const LABEL: &'static str = "milestone";
    const ID_PREFIX: &'static str = "ms";
    const ITEM_TABLE: &'static str = "milestones";
    const EDGE_TABLE: &'static str = "milestone_dependencies";
    const TYPED_EDGES: bool = false;

    fn not_found(id: &str) -> Error {
        Error::MilestoneNotFound(id.to_string())
    }
}
