// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-graph commands: `check` and `order`.

use trellis_core::{Database, Milestone, Task, WorkItemKind};

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

use super::{open_db, resolve_project};

pub fn check(project: Option<&str>) -> Result<()> {
    let (db, config, _) = open_db()?;
    let project = resolve_project(project, &config)?;
    check_impl(&db, &project)?;
    println!("ok: task and milestone graphs of {} are acyclic", project);
    Ok(())
}

/// Fails with the first cycle found in either graph.
///
/// Insertion keeps both graphs acyclic, so a cycle here means rows were
/// written around the engine.
pub(crate) fn check_impl(db: &Database, project: &str) -> Result<()> {
    check_kind::<Task>(db, project)?;
    check_kind::<Milestone>(db, project)
}

fn check_kind<K: WorkItemKind>(db: &Database, project: &str) -> Result<()> {
    match db.find_cycle::<K>(project)? {
        Some(cycle) => {
            tracing::warn!(kind = K::LABEL, cycle = %cycle.join(" -> "), "dependency cycle in store");
            Err(Error::CycleFound(cycle))
        }
        None => Ok(()),
    }
}

pub fn order(project: Option<&str>, milestones: bool, output: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let project = resolve_project(project, &config)?;
    let lines = if milestones {
        order_impl::<Milestone>(&db, &project, output)?
    } else {
        order_impl::<Task>(&db, &project, output)?
    };
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn order_impl<K: WorkItemKind>(
    db: &Database,
    project: &str,
    output: OutputFormat,
) -> Result<Vec<String>> {
    let ids = db.topological_order::<K>(project)?;
    Ok(match output {
        OutputFormat::Json => vec![serde_json::to_string_pretty(&ids)?],
        OutputFormat::Id => ids,
        OutputFormat::Text => ids
            .iter()
            .enumerate()
            .map(|(i, id)| format!("{:>3}. {}", i + 1, id))
            .collect(),
    })
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
