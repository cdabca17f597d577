// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency edges between work items of the same kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// How a dependent relates to its prerequisite.
///
/// Every type participates in cycle detection; only `Blocks` and `DependsOn`
/// hold a task back from being ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DependencyType {
    /// The prerequisite must be done before the dependent can proceed.
    #[default]
    Blocks,
    /// The dependent builds on the prerequisite's output.
    DependsOn,
    /// Informational link; never gates readiness.
    RelatedTo,
}

impl DependencyType {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::Blocks => "Blocks",
            DependencyType::DependsOn => "DependsOn",
            DependencyType::RelatedTo => "RelatedTo",
        }
    }

    /// Returns true if an unfinished prerequisite of this type keeps the
    /// dependent from being ready.
    pub fn gates_readiness(&self) -> bool {
        matches!(self, DependencyType::Blocks | DependencyType::DependsOn)
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DependencyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "blocks" => Ok(DependencyType::Blocks),
            "dependson" => Ok(DependencyType::DependsOn),
            "relatedto" => Ok(DependencyType::RelatedTo),
            _ => Err(Error::InvalidDependencyType(s.to_string())),
        }
    }
}

/// A directed `dependent -> prerequisite` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// The item that waits.
    pub dependent_id: String,
    /// The item waited on.
    pub prerequisite_id: String,
    /// Always `Blocks` for milestone edges.
    pub dependency_type: DependencyType,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "edge_tests.rs"]
mod tests;
