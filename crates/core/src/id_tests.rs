// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::Error;
use chrono::TimeZone;

#[test]
fn generate_id_has_prefix_and_hash() {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    let id = generate_id("task", "Write docs", &created_at);
    assert!(id.starts_with("task-"));
    assert_eq!(id.len(), 13); // task- + 8 hex chars
}

#[test]
fn generate_id_is_deterministic() {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    assert_eq!(
        generate_id("ms", "Beta", &created_at),
        generate_id("ms", "Beta", &created_at)
    );
    assert_ne!(
        generate_id("ms", "Beta", &created_at),
        generate_id("ms", "Gamma", &created_at)
    );
}

#[test]
fn unique_id_without_collision_is_base_id() {
    let created_at = Utc::now();
    let base_id = generate_id("task", "Test", &created_at);
    let id = generate_unique_id("task", "Test", &created_at, |_| Ok(false)).unwrap();
    assert_eq!(id, base_id);
}

#[test]
fn unique_id_appends_suffix_on_collisions() {
    let created_at = Utc::now();
    let base_id = generate_id("task", "Test", &created_at);
    let taken = [base_id.clone(), format!("{}-2", base_id)];

    let id = generate_unique_id("task", "Test", &created_at, |id| {
        Ok(taken.iter().any(|t| t == id))
    })
    .unwrap();

    assert_eq!(id, format!("{}-3", base_id));
}

#[test]
fn unique_id_propagates_lookup_errors() {
    let created_at = Utc::now();
    let result = generate_unique_id("task", "Test", &created_at, |_| {
        Err(Error::CorruptedData("lookup failed".into()))
    });
    assert!(matches!(result, Err(Error::CorruptedData(_))));
}
