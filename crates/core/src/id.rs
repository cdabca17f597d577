// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque identifiers for projects and work items.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Prefix for project identifiers.
pub const PROJECT_PREFIX: &str = "proj";

/// Generate an ID from prefix, name, and timestamp.
/// Format: {prefix}-{hash} where hash is first 8 hex chars of SHA256(name + timestamp)
pub fn generate_id(prefix: &str, name: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!("{}{}", name, created_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]);
    format!("{}-{}", prefix, short_hash)
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
///
/// `exists` is consulted for every candidate; lookup failures are propagated.
pub fn generate_unique_id<F>(
    prefix: &str,
    name: &str,
    created_at: &DateTime<Utc>,
    mut exists: F,
) -> Result<String>
where
    F: FnMut(&str) -> Result<bool>,
{
    let base_id = generate_id(prefix, name, created_at);

    if !exists(&base_id)? {
        return Ok(base_id);
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id)? {
            return Ok(id);
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
