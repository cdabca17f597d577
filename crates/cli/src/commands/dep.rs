// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use trellis_core::{Database, DependencyEdge, DependencyType, Milestone, Task, WorkItemKind};

use crate::cli::{DepCommand, OutputFormat};
use crate::error::{Error, Result};

use super::{open_db, print_json};

/// Which dependency graph an id belongs to, judged by its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemKind {
    Task,
    Milestone,
}

impl ItemKind {
    pub(crate) fn of(id: &str) -> Result<Self> {
        if has_prefix::<Task>(id) {
            Ok(ItemKind::Task)
        } else if has_prefix::<Milestone>(id) {
            Ok(ItemKind::Milestone)
        } else {
            Err(Error::UnknownItemKind(id.to_string()))
        }
    }

    /// The shared kind of both ends of an edge.
    pub(crate) fn of_pair(dependent: &str, prerequisite: &str) -> Result<Self> {
        let kind = ItemKind::of(dependent)?;
        if ItemKind::of(prerequisite)? != kind {
            return Err(Error::MixedKinds {
                dependent: dependent.to_string(),
                prerequisite: prerequisite.to_string(),
            });
        }
        Ok(kind)
    }
}

fn has_prefix<K: WorkItemKind>(id: &str) -> bool {
    id.strip_prefix(K::ID_PREFIX)
        .is_some_and(|rest| rest.starts_with('-'))
}

#[derive(Serialize)]
struct DepListJson<'a> {
    id: &'a str,
    depends_on: &'a [DependencyEdge],
    required_by: &'a [DependencyEdge],
}

pub fn run(command: DepCommand) -> Result<()> {
    let (mut db, _, _) = open_db()?;
    match command {
        DepCommand::Add {
            dependent,
            prerequisite,
            dependency_type,
        } => {
            let edge = add_impl(&mut db, &dependent, &prerequisite, &dependency_type)?;
            println!(
                "{} depends on {} ({})",
                edge.dependent_id, edge.prerequisite_id, edge.dependency_type
            );
            Ok(())
        }
        DepCommand::Remove {
            dependent,
            prerequisite,
        } => {
            remove_impl(&mut db, &dependent, &prerequisite)?;
            println!("Removed: {} -> {}", dependent, prerequisite);
            Ok(())
        }
        DepCommand::List { id, output } => {
            let (prerequisites, dependents) = list_impl(&db, &id)?;
            match output.output {
                OutputFormat::Json => print_json(&DepListJson {
                    id: &id,
                    depends_on: &prerequisites,
                    required_by: &dependents,
                })?,
                OutputFormat::Id => {
                    for edge in &prerequisites {
                        println!("{}", edge.prerequisite_id);
                    }
                }
                OutputFormat::Text => {
                    for edge in &prerequisites {
                        println!("{} -> {} ({})", id, edge.prerequisite_id, edge.dependency_type);
                    }
                    for edge in &dependents {
                        println!("{} -> {} ({})", edge.dependent_id, id, edge.dependency_type);
                    }
                }
            }
            Ok(())
        }
        DepCommand::Tree { id, flat } => {
            let lines = if flat {
                flat_impl(&db, &id)?
            } else {
                tree_impl(&db, &id)?
            };
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

pub(crate) fn add_impl(
    db: &mut Database,
    dependent: &str,
    prerequisite: &str,
    dependency_type: &str,
) -> Result<DependencyEdge> {
    let dependency_type: DependencyType = dependency_type.parse()?;
    let edge = match ItemKind::of_pair(dependent, prerequisite)? {
        ItemKind::Task => db.add_dependency::<Task>(dependent, prerequisite, dependency_type)?,
        ItemKind::Milestone => {
            db.add_dependency::<Milestone>(dependent, prerequisite, dependency_type)?
        }
    };
    Ok(edge)
}

pub(crate) fn remove_impl(db: &mut Database, dependent: &str, prerequisite: &str) -> Result<()> {
    let removed = match ItemKind::of_pair(dependent, prerequisite)? {
        ItemKind::Task => db.remove_dependency::<Task>(dependent, prerequisite)?,
        ItemKind::Milestone => db.remove_dependency::<Milestone>(dependent, prerequisite)?,
    };
    if !removed {
        return Err(Error::DependencyNotFound {
            dependent: dependent.to_string(),
            prerequisite: prerequisite.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn list_impl(
    db: &Database,
    id: &str,
) -> Result<(Vec<DependencyEdge>, Vec<DependencyEdge>)> {
    Ok(match ItemKind::of(id)? {
        ItemKind::Task => (
            db.list_dependencies::<Task>(id)?,
            db.list_dependents::<Task>(id)?,
        ),
        ItemKind::Milestone => (
            db.list_dependencies::<Milestone>(id)?,
            db.list_dependents::<Milestone>(id)?,
        ),
    })
}

fn label(db: &Database, kind: ItemKind, id: &str) -> Result<String> {
    Ok(match kind {
        ItemKind::Task => {
            let task = db.get_task(id)?;
            format!("{}: {} [{}]", task.id, task.title, task.status)
        }
        ItemKind::Milestone => {
            let ms = db.get_milestone(id)?;
            let state = if ms.is_completed { "done" } else { "open" };
            format!("{}: {} [{}, due {}]", ms.id, ms.name, state, ms.due_date)
        }
    })
}

fn prerequisites_of(db: &Database, kind: ItemKind, id: &str) -> Result<Vec<String>> {
    let edges = match kind {
        ItemKind::Task => db.list_dependencies::<Task>(id)?,
        ItemKind::Milestone => db.list_dependencies::<Milestone>(id)?,
    };
    Ok(edges.into_iter().map(|e| e.prerequisite_id).collect())
}

fn transitive_prerequisites(db: &Database, kind: ItemKind, id: &str) -> Result<Vec<String>> {
    Ok(match kind {
        ItemKind::Task => db.transitive_prerequisites::<Task>(id)?,
        ItemKind::Milestone => db.transitive_prerequisites::<Milestone>(id)?,
    })
}

/// One label per item `id` transitively depends on, sorted by id.
pub(crate) fn flat_impl(db: &Database, id: &str) -> Result<Vec<String>> {
    let kind = ItemKind::of(id)?;
    transitive_prerequisites(db, kind, id)?
        .iter()
        .map(|pre| label(db, kind, pre))
        .collect()
}

/// Renders everything `id` transitively depends on as an indented tree.
///
/// A node reached a second time is printed once more but not expanded.
pub(crate) fn tree_impl(db: &Database, id: &str) -> Result<Vec<String>> {
    let kind = ItemKind::of(id)?;
    let mut labels = HashMap::new();
    for node in std::iter::once(id.to_string()).chain(transitive_prerequisites(db, kind, id)?) {
        let text = label(db, kind, &node)?;
        labels.insert(node, text);
    }

    let mut tree = TreeWriter {
        db,
        kind,
        labels: &labels,
        expanded: HashSet::from([id.to_string()]),
        lines: vec![labels.get(id).cloned().unwrap_or_default()],
    };
    tree.push_children(id, "")?;
    Ok(tree.lines)
}

struct TreeWriter<'a> {
    db: &'a Database,
    kind: ItemKind,
    labels: &'a HashMap<String, String>,
    expanded: HashSet<String>,
    lines: Vec<String>,
}

impl TreeWriter<'_> {
    fn push_children(&mut self, id: &str, prefix: &str) -> Result<()> {
        let children = prerequisites_of(self.db, self.kind, id)?;
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            let branch = if is_last { "└── " } else { "├── " };
            let seen = !self.expanded.insert(child.clone());
            let suffix = if seen { " (see above)" } else { "" };
            let text = self.labels.get(child).map(String::as_str).unwrap_or(child.as_str());
            self.lines.push(format!("{}{}{}{}", prefix, branch, text, suffix));
            if !seen {
                let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                self.push_children(child, &child_prefix)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "dep_tests.rs"]
mod tests;
