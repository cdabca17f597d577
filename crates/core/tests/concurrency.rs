// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;

use tempfile::tempdir;
use trellis_core::{Database, DependencyType, Error, NewTask, Result, Task};

fn add_after_barrier(
    path: PathBuf,
    barrier: Arc<Barrier>,
    dependent: String,
    prerequisite: String,
) -> thread::JoinHandle<Result<()>> {
    thread::spawn(move || {
        let mut db = Database::open(&path)?;
        barrier.wait();
        db.add_dependency::<Task>(&dependent, &prerequisite, DependencyType::Blocks)
            .map(|_| ())
    })
}

#[test]
fn opposing_edges_from_two_connections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trellis.db");

    let mut setup = Database::open(&path).unwrap();
    let project = setup.create_project("Race", None).unwrap().id;

    for round in 0..8 {
        let a = setup
            .create_task(&NewTask::new(project.clone(), format!("a{round}")), &[])
            .unwrap()
            .id;
        let b = setup
            .create_task(&NewTask::new(project.clone(), format!("b{round}")), &[])
            .unwrap()
            .id;

        let barrier = Arc::new(Barrier::new(2));
        let forward = add_after_barrier(path.clone(), barrier.clone(), a.clone(), b.clone());
        let backward = add_after_barrier(path.clone(), barrier, b.clone(), a.clone());

        let results = [forward.join().unwrap(), backward.join().unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "round {round}: {results:?}");

        for result in &results {
            if let Err(err) = result {
                assert!(
                    matches!(
                        err,
                        Error::CycleDetected { .. } | Error::ConcurrencyConflict { .. }
                    ),
                    "round {round}: {err:?}"
                );
            }
        }

        let forward_edges = setup.list_dependencies::<Task>(&a).unwrap().len();
        let backward_edges = setup.list_dependencies::<Task>(&b).unwrap().len();
        assert_eq!(forward_edges + backward_edges, 1, "round {round}");
    }

    assert!(setup.find_cycle::<Task>(&project).unwrap().is_none());
}
