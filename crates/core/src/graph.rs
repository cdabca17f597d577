// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory view of one project's dependency graph.
//!
//! The database is the source of truth and performs the acyclicity check on
//! insert (see [`crate::Database::add_dependency`]). This module holds the
//! algorithms that need the whole graph at once: auditing for cycles left by
//! older data, and ordering items prerequisites-first.
//!
//! Edges point from dependent to prerequisite.

use std::collections::{BTreeMap, BTreeSet, HashMap};

static NO_EDGES: BTreeSet<String> = BTreeSet::new();

/// Adjacency from each item to its direct prerequisites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    prerequisites: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph::default()
    }

    /// Builds a graph from item ids and `(dependent, prerequisite)` pairs.
    pub fn from_parts<N, E, S>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut graph = DependencyGraph::new();
        for node in nodes {
            graph.add_node(node);
        }
        for (dependent, prerequisite) in edges {
            graph.add_edge(dependent, prerequisite);
        }
        graph
    }

    pub fn add_node(&mut self, id: impl Into<String>) {
        self.prerequisites.entry(id.into()).or_default();
    }

    /// Records an edge without validation; both endpoints become nodes.
    pub fn add_edge(&mut self, dependent: impl Into<String>, prerequisite: impl Into<String>) {
        let prerequisite = prerequisite.into();
        self.add_node(prerequisite.clone());
        self.prerequisites
            .entry(dependent.into())
            .or_default()
            .insert(prerequisite);
    }

    fn prerequisites_of(&self, id: &str) -> &BTreeSet<String> {
        self.prerequisites.get(id).unwrap_or(&NO_EDGES)
    }

    /// Finds one directed cycle, returned as a path whose first and last
    /// elements are the same item.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            OnPath,
            Finished,
        }

        let mut marks: HashMap<&str, Mark> = HashMap::new();

        for root in self.prerequisites.keys() {
            if marks.contains_key(root.as_str()) {
                continue;
            }
            marks.insert(root.as_str(), Mark::OnPath);
            let mut path: Vec<&str> = vec![root.as_str()];
            let mut cursors = vec![self.prerequisites_of(root).iter()];

            loop {
                let Some(cursor) = cursors.last_mut() else {
                    break;
                };
                match cursor.next() {
                    Some(next) => match marks.get(next.as_str()) {
                        Some(Mark::OnPath) => {
                            let start = path.iter().position(|id| *id == next.as_str())?;
                            let mut cycle: Vec<String> =
                                path[start..].iter().map(|id| id.to_string()).collect();
                            cycle.push(next.clone());
                            return Some(cycle);
                        }
                        Some(Mark::Finished) => {}
                        None => {
                            marks.insert(next.as_str(), Mark::OnPath);
                            path.push(next.as_str());
                            cursors.push(self.prerequisites_of(next).iter());
                        }
                    },
                    None => {
                        cursors.pop();
                        if let Some(finished) = path.pop() {
                            marks.insert(finished, Mark::Finished);
                        }
                    }
                }
            }
        }
        None
    }

    /// Kahn's algorithm: every item appears after all of its prerequisites.
    ///
    /// Ties are broken by id so the order is stable. Returns `None` if the
    /// graph has a cycle.
    pub fn topological_order(&self) -> Option<Vec<String>> {
        let mut waiting: BTreeMap<&str, usize> = BTreeMap::new();
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (dependent, prerequisites) in &self.prerequisites {
            waiting.insert(dependent.as_str(), prerequisites.len());
            for prerequisite in prerequisites {
                dependents
                    .entry(prerequisite.as_str())
                    .or_default()
                    .push(dependent.as_str());
            }
        }

        let mut ready: BTreeSet<&str> = waiting
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(self.prerequisites.len());

        while let Some(id) = ready.pop_first() {
            order.push(id.to_string());
            for dependent in dependents.get(id).into_iter().flatten() {
                if let Some(count) = waiting.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        (order.len() == self.prerequisites.len()).then_some(order)
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
