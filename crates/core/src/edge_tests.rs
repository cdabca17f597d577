// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    blocks = { "Blocks", DependencyType::Blocks },
    blocks_lower = { "blocks", DependencyType::Blocks },
    depends_on = { "DependsOn", DependencyType::DependsOn },
    depends_on_kebab = { "depends-on", DependencyType::DependsOn },
    related_snake = { "related_to", DependencyType::RelatedTo },
)]
fn dependency_type_from_str_valid(input: &str, expected: DependencyType) {
    assert_eq!(input.parse::<DependencyType>().unwrap(), expected);
}

#[parameterized(
    tracks = { "tracks" },
    empty = { "" },
)]
fn dependency_type_from_str_invalid(input: &str) {
    assert!(matches!(
        input.parse::<DependencyType>(),
        Err(Error::InvalidDependencyType(_))
    ));
}

#[parameterized(
    blocks = { DependencyType::Blocks, true },
    depends_on = { DependencyType::DependsOn, true },
    related_to = { DependencyType::RelatedTo, false },
)]
fn dependency_type_gates_readiness(ty: DependencyType, expected: bool) {
    assert_eq!(ty.gates_readiness(), expected);
}

#[test]
fn default_dependency_type_is_blocks() {
    assert_eq!(DependencyType::default(), DependencyType::Blocks);
}
