//! CLI entry point for tidytask.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use config::AppConfig;
use tidytask_app::UserService;
use tidytask_store_json::JsonStore;

mod commands;
mod config;
mod view;

/// A to-do list with categories, pinning and shareable task links.
#[derive(Parser, Debug)]
#[command(
    name = "tidytask",
    version,
    about = "tidytask: tasks, categories and shareable task links"
)]
struct Cli {
    /// Path of the JSON state file (defaults to the platform data dir).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Path of the config file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new task.
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Card color as #RRGGBB (defaults to the first palette entry).
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        /// Deadline as an RFC 3339 timestamp.
        #[arg(long)]
        deadline: Option<String>,
        /// Create the task pinned.
        #[arg(long)]
        pinned: bool,
        #[arg(short = 'c', long = "category")]
        categories: Vec<String>,
    },

    /// List tasks: pinned first, then open, then done when the
    /// done-to-bottom setting is on.
    Ls {
        /// Case-insensitive name/description search.
        #[arg(long)]
        search: Option<String>,
        /// Keep only tasks carrying this category id.
        #[arg(long)]
        category: Option<String>,
        /// Emit JSON instead of the table.
        #[arg(long)]
        json: bool,
    },

    /// Toggle a task's done flag.
    Done { task: String },

    /// Toggle a task's pinned flag.
    Pin { task: String },

    /// Delete a task.
    Rm { task: String },

    /// Edit fields of a task. Omitted flags leave the field untouched.
    Edit {
        task: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
        /// Remove the existing deadline.
        #[arg(long, conflicts_with = "deadline")]
        clear_deadline: bool,
        /// Replacement category set (repeatable).
        #[arg(long = "category")]
        categories: Option<Vec<String>>,
    },

    /// Manage categories.
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Print a shareable link for a task.
    Share { task: String },

    /// Decode a share link; add --accept to import the task.
    Import {
        url: String,
        #[arg(long)]
        accept: bool,
    },

    /// Delete completed tasks, or every task with --all.
    Purge {
        #[arg(long)]
        all: bool,
    },

    /// Completion statistics.
    Stats,

    /// Show or change behavior switches.
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Show, set or clear the profile name.
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    /// Create a category.
    Add {
        name: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
    },

    /// List categories.
    Ls,

    /// Edit fields of a category.
    Edit {
        category: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
    },

    /// Delete a category and detach it from every task.
    Rm { category: String },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print the current switches.
    Show,

    /// Change one or more switches.
    Set {
        /// Carry category data in shares and filters.
        #[arg(long)]
        enable_categories: Option<bool>,
        /// Move completed tasks below open ones when listing.
        #[arg(long)]
        done_to_bottom: Option<bool>,
        /// Reserved for front ends that surface an app badge.
        #[arg(long)]
        app_badge: Option<bool>,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Print the profile name.
    Show,

    /// Set the profile name (at most 14 characters).
    Set { name: String },

    /// Clear the profile name.
    Clear,
}

fn main() -> Result<()> {
    install_tracing();

    let Cli { data, config, cmd } = Cli::parse();
    let config = AppConfig::load(config.as_deref())?;
    let store = JsonStore::open(config.data_file(data.as_deref()));
    let service = UserService::new(store);
    commands::run(cmd, &service, config.share_origin())
}

fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "tidytask",
            "add",
            "Water plants",
            "--description",
            "balcony only",
            "--pinned",
            "--category",
            "8f14e45f-ea4c-4f62-b1a9-04f7e0b1a001",
        ]);

        match cli.cmd {
            Command::Add {
                name,
                description,
                pinned,
                categories,
                ..
            } => {
                assert_eq!(name, "Water plants");
                assert_eq!(description.as_deref(), Some("balcony only"));
                assert!(pinned);
                assert_eq!(categories.len(), 1);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn parse_ls_with_filters() {
        let cli = Cli::parse_from(["tidytask", "ls", "--search", "plants", "--json"]);
        match cli.cmd {
            Command::Ls { search, category, json } => {
                assert_eq!(search.as_deref(), Some("plants"));
                assert!(category.is_none());
                assert!(json);
            }
            _ => panic!("expected ls command"),
        }
    }

    #[test]
    fn parse_edit_clear_deadline() {
        let cli = Cli::parse_from([
            "tidytask",
            "edit",
            "8f14e45f-ea4c-4f62-b1a9-04f7e0b1a001",
            "--clear-deadline",
        ]);
        match cli.cmd {
            Command::Edit { clear_deadline, deadline, .. } => {
                assert!(clear_deadline);
                assert!(deadline.is_none());
            }
            _ => panic!("expected edit command"),
        }
    }

    #[test]
    fn clear_deadline_conflicts_with_a_new_deadline() {
        let result = Cli::try_parse_from([
            "tidytask",
            "edit",
            "8f14e45f-ea4c-4f62-b1a9-04f7e0b1a001",
            "--deadline",
            "2026-09-15T17:00:00Z",
            "--clear-deadline",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_settings_set() {
        let cli = Cli::parse_from(["tidytask", "settings", "set", "--done-to-bottom", "true"]);
        match cli.cmd {
            Command::Settings(SettingsCommand::Set { done_to_bottom, .. }) => {
                assert_eq!(done_to_bottom, Some(true));
            }
            _ => panic!("expected settings set command"),
        }
    }

    #[test]
    fn parse_import_accept() {
        let cli = Cli::parse_from([
            "tidytask",
            "import",
            "https://tidytask.app/share?task=%7B%7D&userName=ana",
            "--accept",
        ]);
        match cli.cmd {
            Command::Import { accept, .. } => assert!(accept),
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn parse_data_override() {
        let cli = Cli::parse_from(["tidytask", "--data", "/tmp/state.json", "ls"]);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/state.json")));
    }
}
