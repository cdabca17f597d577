// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::OutputFormat;
use crate::display::format_statistics;
use crate::error::Result;

use super::{open_db, print_json, resolve_project};

pub fn run(project: Option<&str>, output: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let project = resolve_project(project, &config)?;
    let stats = db.project_statistics(&project)?;
    match output {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Id => println!("{}", stats.project_id),
        OutputFormat::Text => println!("{}", format_statistics(&stats)),
    }
    Ok(())
}
