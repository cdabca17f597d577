// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[value(alias = "ids")]
    Id,
}

/// Shared `--output` flag.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct OutputArgs {
    /// Output format (text, json, id)
    #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Parser)]
#[command(name = "trellis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Plan projects as dependency graphs of tasks and milestones")]
#[command(
    long_about = "Plan projects as dependency graphs of tasks and milestones.\n\n\
    Dependencies are kept acyclic, status changes stamp their own timestamps, \
    and statistics are computed from the current state."
)]
pub struct Cli {
    /// Run as if trellis was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    /// Project to operate on (defaults to TRELLIS_PROJECT, then the configured default)
    #[arg(short = 'P', long = "project", global = true, value_name = "id")]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a workspace in the current directory
    Init {
        /// Create a first project with this name and make it the default
        #[arg(long, value_parser = non_empty_string)]
        name: Option<String>,

        /// Description for the first project
        #[arg(long, short, requires = "name")]
        description: Option<String>,

        /// Database location (relative to the workspace root or absolute)
        #[arg(long, value_name = "path")]
        database: Option<String>,
    },

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage milestones
    #[command(subcommand, visible_alias = "ms")]
    Milestone(MilestoneCommand),

    /// Manage dependencies between tasks or between milestones
    #[command(subcommand)]
    Dep(DepCommand),

    /// Show task and milestone statistics for the project
    Stats {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Verify both dependency graphs of the project are acyclic
    Check,

    /// Print the project's items in dependency order (prerequisites first)
    Order {
        /// Order milestones instead of tasks
        #[arg(long)]
        milestones: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Create a project
    Create {
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Project description
        #[arg(long, short)]
        description: Option<String>,

        /// Make the new project the workspace default
        #[arg(long = "use")]
        make_default: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List projects
    List {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a project (defaults to the selected project)
    Show {
        id: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Make a project the workspace default
    Use { id: String },

    /// Delete a project with all of its tasks, milestones, and dependencies
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Create a task
    New {
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Task description
        #[arg(long, short)]
        description: Option<String>,

        /// Assign the task to someone
        #[arg(long, short)]
        assignee: Option<String>,

        /// Priority (low, medium, high, critical)
        #[arg(long, short)]
        priority: Option<String>,

        /// Estimated effort in hours
        #[arg(long, value_name = "hours")]
        estimate: Option<f64>,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "date")]
        due: Option<String>,

        /// Prerequisite task ids (comma-separated or repeated)
        #[arg(long, value_name = "IDS", value_delimiter = ',')]
        after: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a task with its dependencies
    Show {
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List tasks
    List(TaskListArgs),

    /// List tasks sorted by a field
    Sort {
        /// Field (title, status, priority, due_date, created_at, updated_at, estimated_hours)
        field: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Maximum number of tasks to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Search task titles and descriptions
    Search {
        #[arg(value_parser = non_empty_string)]
        query: String,

        /// Maximum number of tasks to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show tasks with no unfinished blocking prerequisites
    Ready {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Edit a task's fields
    Edit {
        id: String,

        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        #[arg(long, short)]
        assignee: Option<String>,

        #[arg(long, short)]
        priority: Option<String>,

        #[arg(long, value_name = "hours")]
        estimate: Option<f64>,

        #[arg(long, value_name = "hours")]
        actual: Option<f64>,

        #[arg(long, value_name = "date")]
        due: Option<String>,
    },

    /// Set a task's status (todo, in_progress, review, done)
    Status { id: String, status: String },

    /// Move task(s) to InProgress
    #[command(arg_required_else_help = true)]
    Start { ids: Vec<String> },

    /// Move task(s) to Review
    #[command(arg_required_else_help = true)]
    Review { ids: Vec<String> },

    /// Move task(s) to Done
    #[command(arg_required_else_help = true)]
    Done { ids: Vec<String> },

    /// Return task(s) to ToDo
    #[command(arg_required_else_help = true)]
    Reopen { ids: Vec<String> },

    /// Delete a task and its dependencies
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
pub struct TaskListArgs {
    /// Filter by status
    #[arg(long, short)]
    pub status: Option<String>,

    /// Filter by priority
    #[arg(long, short)]
    pub priority: Option<String>,

    /// Filter by assignee
    #[arg(long, short)]
    pub assignee: Option<String>,

    /// Only tasks due on or after this date
    #[arg(long, value_name = "date")]
    pub due_from: Option<String>,

    /// Only tasks due on or before this date
    #[arg(long, value_name = "date")]
    pub due_to: Option<String>,

    /// Only overdue tasks
    #[arg(long)]
    pub overdue: bool,

    /// Only tasks with at least one prerequisite
    #[arg(long, conflicts_with = "independent")]
    pub dependent: bool,

    /// Only tasks without prerequisites
    #[arg(long)]
    pub independent: bool,

    /// Maximum number of tasks to show
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Subcommand)]
pub enum MilestoneCommand {
    /// Create a milestone
    New {
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "date")]
        due: String,

        /// Milestone description
        #[arg(long, short)]
        description: Option<String>,

        /// Prerequisite milestone ids (comma-separated or repeated)
        #[arg(long, value_name = "IDS", value_delimiter = ',')]
        after: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a milestone with its dependencies
    Show {
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List milestones by due date
    List {
        /// Only milestones not yet completed
        #[arg(long, conflicts_with = "completed")]
        open: bool,

        /// Only completed milestones
        #[arg(long)]
        completed: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Edit a milestone's fields
    Edit {
        id: String,

        #[arg(long, value_parser = non_empty_string)]
        name: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        #[arg(long, value_name = "date")]
        due: Option<String>,
    },

    /// Mark milestone(s) completed
    #[command(arg_required_else_help = true)]
    Complete { ids: Vec<String> },

    /// Mark milestone(s) not completed
    #[command(arg_required_else_help = true)]
    Reopen { ids: Vec<String> },

    /// Delete a milestone and its dependencies
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum DepCommand {
    /// Make <dependent> depend on <prerequisite>
    Add {
        dependent: String,
        prerequisite: String,

        /// Dependency type for tasks (blocks, depends_on, related_to)
        #[arg(long = "type", short = 't', default_value = "blocks")]
        dependency_type: String,
    },

    /// Remove the <dependent> -> <prerequisite> edge
    Remove {
        dependent: String,
        prerequisite: String,
    },

    /// List an item's direct prerequisites and dependents
    List {
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show everything an item transitively depends on
    Tree {
        id: String,

        /// List each prerequisite once, sorted by id, instead of a tree
        #[arg(long)]
        flat: bool,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
