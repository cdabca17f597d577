// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

/// SQL schema for the project graph database
pub const SCHEMA: &str = include_str!("schema.sql");

/// Value written to `PRAGMA user_version` once migrations have run.
pub const SCHEMA_VERSION: i64 = 1;
