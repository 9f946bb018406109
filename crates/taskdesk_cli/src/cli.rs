//! Command-line surface.
//!
//! # Responsibility
//! - Parse process arguments into runtime options and one core `Command`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskdesk_core::{Command, NewTask};

const DEFAULT_DB_PATH: &str = "tasks_db.db";

#[derive(Parser, Debug)]
#[command(name = "taskdesk", version, about = "Local task lists grouped by category")]
pub struct Cli {
    /// SQLite file holding categories and tasks; created when absent
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Write rolling log files into this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level used with --log-dir (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Answer yes to delete confirmations
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: TopLevel,
}

#[derive(Subcommand, Debug)]
pub enum TopLevel {
    /// List all categories
    Categories,
    /// Manage one category
    #[command(subcommand)]
    Category(CategoryCommand),
    /// List tasks, optionally in one category
    Tasks {
        /// Only show tasks of this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Manage one task
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Create a category
    Add { title: String },
    /// Delete a category together with all of its tasks
    Delete { title: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Create a pending task
    Add(AddTask),
    /// Show title, category, status and description
    Show { title: String },
    /// Mark a task as done
    Done { title: String },
    /// Mark a task as pending again
    Undone { title: String },
    /// Delete a task
    Delete { title: String },
}

#[derive(Args, Debug)]
pub struct AddTask {
    pub title: String,
    /// Category the task belongs to
    #[arg(short, long)]
    pub category: String,
    /// Free-form description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

impl TopLevel {
    pub fn into_command(self) -> Command {
        match self {
            Self::Categories => Command::ListCategories,
            Self::Category(CategoryCommand::Add { title }) => Command::CreateCategory { title },
            Self::Category(CategoryCommand::Delete { title }) => Command::DeleteCategory { title },
            Self::Tasks { category } => Command::ListTasks { category },
            Self::Task(TaskCommand::Add(task)) => {
                Command::CreateTask(NewTask::new(task.title, task.description, task.category))
            }
            Self::Task(TaskCommand::Show { title }) => Command::ShowTask { title },
            Self::Task(TaskCommand::Done { title }) => Command::SetTaskDone { title, done: true },
            Self::Task(TaskCommand::Undone { title }) => Command::SetTaskDone {
                title,
                done: false,
            },
            Self::Task(TaskCommand::Delete { title }) => Command::DeleteTask { title },
        }
    }
}
