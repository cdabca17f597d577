// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! trellis - command-line driver for the trellis-core planning engine.
//!
//! A workspace is a `.trellis/` directory holding `config.toml`; the
//! database it points at stores any number of projects. Commands resolve
//! the project from `--project`, `TRELLIS_PROJECT`, or the configured
//! default.
//!
//! ```rust,ignore
//! use trellis::config::{find_work_dir, get_db_path, Config};
//! use trellis_core::Database;
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let db = Database::open(&get_db_path(&work_dir, &config))?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;

pub mod config;
pub mod env;
pub mod error;

pub use cli::{
    Cli, Command, DepCommand, MilestoneCommand, OutputArgs, OutputFormat, ProjectCommand,
    TaskCommand, TaskListArgs,
};
pub use config::Config;
pub use error::{Error, Result};

/// Runs a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)?;
    }
    let project = cli.project.as_deref();

    match cli.command {
        Command::Init {
            name,
            description,
            database,
        } => commands::init::run(name, description, database),
        Command::Project(command) => commands::project::run(project, command),
        Command::Task(command) => commands::task::run(project, command),
        Command::Milestone(command) => commands::milestone::run(project, command),
        Command::Dep(command) => commands::dep::run(command),
        Command::Stats { output } => commands::stats::run(project, output.output),
        Command::Check => commands::graph::check(project),
        Command::Order { milestones, output } => {
            commands::graph::order(project, milestones, output.output)
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
