// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency edges, written once for every [`WorkItemKind`].
//!
//! Edge validation order: both endpoints exist, kind accepts the type, no
//! self loop, same project, no duplicate pair, no cycle. The cycle check is
//! a recursive query over the whole edge table, run in the same IMMEDIATE
//! transaction as the insert.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::edge::{DependencyEdge, DependencyType};
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::kind::WorkItemKind;

use super::projects::ensure_project;
use super::{format_timestamp, parse_db, parse_timestamp, Database};

/// Column expression for the edge type; untyped edge tables report `Blocks`.
fn type_column<K: WorkItemKind>() -> &'static str {
    if K::TYPED_EDGES {
        "dependency_type"
    } else {
        "'Blocks'"
    }
}

fn edge_from_row(row: &Row<'_>) -> rusqlite::Result<DependencyEdge> {
    let type_str: String = row.get(2)?;
    let created_str: String = row.get(3)?;
    Ok(DependencyEdge {
        dependent_id: row.get(0)?,
        prerequisite_id: row.get(1)?,
        dependency_type: parse_db(&type_str, "dependency_type")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

/// Returns the project owning an item, or the kind's not-found error.
pub(crate) fn item_project<K: WorkItemKind>(conn: &Connection, id: &str) -> Result<String> {
    let sql = format!("SELECT project_id FROM {} WHERE id = ?1", K::ITEM_TABLE);
    conn.query_row(&sql, params![id], |row| row.get(0))
        .optional()?
        .ok_or_else(|| K::not_found(id))
}

fn edge_exists<K: WorkItemKind>(
    conn: &Connection,
    dependent: &str,
    prerequisite: &str,
) -> Result<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE dependent_id = ?1 AND prerequisite_id = ?2)",
        K::EDGE_TABLE
    );
    Ok(conn.query_row(&sql, params![dependent, prerequisite], |row| row.get(0))?)
}

/// Returns true if `target` is reachable from `from` along
/// dependent -> prerequisite edges.
pub(crate) fn reaches<K: WorkItemKind>(conn: &Connection, from: &str, target: &str) -> Result<bool> {
    let sql = format!(
        "WITH RECURSIVE reach(id) AS (
            SELECT prerequisite_id FROM {edges} WHERE dependent_id = ?1
            UNION
            SELECT e.prerequisite_id FROM {edges} e JOIN reach r ON e.dependent_id = r.id
        )
        SELECT EXISTS(SELECT 1 FROM reach WHERE id = ?2)",
        edges = K::EDGE_TABLE
    );
    Ok(conn.query_row(&sql, params![from, target], |row| row.get(0))?)
}

/// Validates and inserts one edge using `conn`, which must be inside a write
/// transaction.
pub(crate) fn insert_edge<K: WorkItemKind>(
    conn: &Connection,
    dependent: &str,
    prerequisite: &str,
    dependency_type: DependencyType,
    now: DateTime<Utc>,
) -> Result<DependencyEdge> {
    let dependent_project = item_project::<K>(conn, dependent)?;
    let prerequisite_project = item_project::<K>(conn, prerequisite)?;

    if !K::TYPED_EDGES && dependency_type != DependencyType::Blocks {
        return Err(Error::InvalidDependencyType(format!(
            "{dependency_type} (only Blocks is allowed between {}s)",
            K::LABEL
        )));
    }

    if dependent == prerequisite {
        return Err(Error::SelfDependency(dependent.to_string()));
    }

    if dependent_project != prerequisite_project {
        return Err(Error::CrossProjectEdge {
            dependent: dependent.to_string(),
            prerequisite: prerequisite.to_string(),
        });
    }

    if edge_exists::<K>(conn, dependent, prerequisite)? {
        return Err(Error::DuplicateEdge {
            dependent: dependent.to_string(),
            prerequisite: prerequisite.to_string(),
        });
    }

    if reaches::<K>(conn, prerequisite, dependent)? {
        debug!(kind = K::LABEL, dependent, prerequisite, "rejected edge closing a cycle");
        return Err(Error::CycleDetected {
            dependent: dependent.to_string(),
            prerequisite: prerequisite.to_string(),
        });
    }

    let created_at = format_timestamp(&now);
    if K::TYPED_EDGES {
        let sql = format!(
            "INSERT INTO {} (dependent_id, prerequisite_id, dependency_type, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            K::EDGE_TABLE
        );
        conn.execute(
            &sql,
            params![dependent, prerequisite, dependency_type.as_str(), created_at],
        )?;
    } else {
        let sql = format!(
            "INSERT INTO {} (dependent_id, prerequisite_id, created_at) VALUES (?1, ?2, ?3)",
            K::EDGE_TABLE
        );
        conn.execute(&sql, params![dependent, prerequisite, created_at])?;
    }

    Ok(DependencyEdge {
        dependent_id: dependent.to_string(),
        prerequisite_id: prerequisite.to_string(),
        dependency_type,
        created_at: parse_timestamp(&created_at, "created_at")?,
    })
}

/// Lists edges where `column` equals `id`, oldest first.
fn edges_where<K: WorkItemKind>(conn: &Connection, column: &str, id: &str) -> Result<Vec<DependencyEdge>> {
    let sql = format!(
        "SELECT dependent_id, prerequisite_id, {ty}, created_at FROM {edges}
         WHERE {column} = ?1 ORDER BY created_at, rowid",
        ty = type_column::<K>(),
        edges = K::EDGE_TABLE,
    );
    let mut stmt = conn.prepare(&sql)?;
    let edges = stmt
        .query_map(params![id], edge_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(edges)
}

impl Database {
    /// Add a `dependent -> prerequisite` edge between items of kind `K`.
    pub fn add_dependency<K: WorkItemKind>(
        &mut self,
        dependent: &str,
        prerequisite: &str,
        dependency_type: DependencyType,
    ) -> Result<DependencyEdge> {
        let edge = self.write(|tx, now| {
            insert_edge::<K>(tx, dependent, prerequisite, dependency_type, now)
        })?;
        info!(
            kind = K::LABEL,
            dependent,
            prerequisite,
            dependency_type = %dependency_type,
            "added dependency"
        );
        Ok(edge)
    }

    /// Remove exactly the `dependent -> prerequisite` edge.
    ///
    /// Returns false if no such edge existed.
    pub fn remove_dependency<K: WorkItemKind>(
        &mut self,
        dependent: &str,
        prerequisite: &str,
    ) -> Result<bool> {
        let removed = self.write(|tx, _| {
            let sql = format!(
                "DELETE FROM {} WHERE dependent_id = ?1 AND prerequisite_id = ?2",
                K::EDGE_TABLE
            );
            Ok(tx.execute(&sql, params![dependent, prerequisite])? > 0)
        })?;
        if removed {
            info!(kind = K::LABEL, dependent, prerequisite, "removed dependency");
        }
        Ok(removed)
    }

    /// Edges from `item` to its direct prerequisites, oldest first.
    pub fn list_dependencies<K: WorkItemKind>(&self, item: &str) -> Result<Vec<DependencyEdge>> {
        item_project::<K>(&self.conn, item)?;
        edges_where::<K>(&self.conn, "dependent_id", item)
    }

    /// Edges from the items that depend directly on `item`, oldest first.
    pub fn list_dependents<K: WorkItemKind>(&self, item: &str) -> Result<Vec<DependencyEdge>> {
        item_project::<K>(&self.conn, item)?;
        edges_where::<K>(&self.conn, "prerequisite_id", item)
    }

    /// Every item reachable from `item` along prerequisite edges, sorted by id.
    pub fn transitive_prerequisites<K: WorkItemKind>(&self, item: &str) -> Result<Vec<String>> {
        item_project::<K>(&self.conn, item)?;
        let sql = format!(
            "WITH RECURSIVE reach(id) AS (
                SELECT prerequisite_id FROM {edges} WHERE dependent_id = ?1
                UNION
                SELECT e.prerequisite_id FROM {edges} e JOIN reach r ON e.dependent_id = r.id
            )
            SELECT id FROM reach WHERE id != ?1 ORDER BY id",
            edges = K::EDGE_TABLE
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params![item], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(ids)
    }

    /// Loads a project's items and edges of kind `K` into memory.
    pub fn dependency_graph<K: WorkItemKind>(&self, project_id: &str) -> Result<DependencyGraph> {
        ensure_project(&self.conn, project_id)?;

        let nodes_sql = format!("SELECT id FROM {} WHERE project_id = ?1", K::ITEM_TABLE);
        let mut stmt = self.conn.prepare(&nodes_sql)?;
        let nodes = stmt
            .query_map(params![project_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let edges_sql = format!(
            "SELECT e.dependent_id, e.prerequisite_id FROM {edges} e
             JOIN {items} i ON i.id = e.dependent_id
             WHERE i.project_id = ?1",
            edges = K::EDGE_TABLE,
            items = K::ITEM_TABLE,
        );
        let mut stmt = self.conn.prepare(&edges_sql)?;
        let edges = stmt
            .query_map(params![project_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(DependencyGraph::from_parts(nodes, edges))
    }

    /// Returns one dependency cycle among a project's items of kind `K`.
    ///
    /// Edges are checked on insert, so this only finds cycles in data
    /// written by something other than this engine.
    pub fn find_cycle<K: WorkItemKind>(&self, project_id: &str) -> Result<Option<Vec<String>>> {
        let cycle = self.dependency_graph::<K>(project_id)?.find_cycle();
        if let Some(path) = &cycle {
            debug!(kind = K::LABEL, project = project_id, cycle = ?path, "found cycle");
        }
        Ok(cycle)
    }

    /// A project's items of kind `K`, each after all of its prerequisites.
    pub fn topological_order<K: WorkItemKind>(&self, project_id: &str) -> Result<Vec<String>> {
        let graph = self.dependency_graph::<K>(project_id)?;
        match graph.topological_order() {
            Some(order) => Ok(order),
            None => {
                let cycle = graph.find_cycle().unwrap_or_default();
                Err(Error::CycleDetected {
                    dependent: cycle.first().cloned().unwrap_or_default(),
                    prerequisite: cycle.get(1).cloned().unwrap_or_default(),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "deps_tests.rs"]
mod tests;
