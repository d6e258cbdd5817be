use std::str::FromStr;

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use tidytask_app::{NewTask, TaskStats, TaskUpdate, UserService, UserStore};
use tidytask_core::{AppSettings, CategoryId, HexColor, IncomingShare, TaskId};

use crate::view::{category_line, task_line};
use crate::{CategoryCommand, Command, ProfileCommand, SettingsCommand};

#[allow(clippy::too_many_lines)]
pub fn run<S: UserStore>(command: Command, service: &UserService<S>, origin: &str) -> Result<()> {
    match command {
        Command::Add {
            name,
            description,
            color,
            emoji,
            deadline,
            pinned,
            categories,
        } => {
            let task = service.add_task(NewTask {
                name,
                description,
                color: parse_color(color)?,
                emoji,
                deadline: parse_deadline(deadline)?,
                pinned,
                categories: parse_category_ids(&categories)?,
            })?;
            println!("created task: {} ({})", task.name, task.id);
        }
        Command::Ls { search, category, json } => {
            let category = category.as_deref().map(parse_category_id).transpose()?;
            let tasks = service.list(search.as_deref(), category)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
                return Ok(());
            }
            if tasks.is_empty() {
                if search.is_none() && category.is_none() {
                    println!("No tasks found");
                } else {
                    println!("No tasks matched the provided filters");
                }
                return Ok(());
            }
            let now = OffsetDateTime::now_utc();
            for task in &tasks {
                println!("{}", task_line(task, now));
            }
        }
        Command::Done { task } => {
            let task = service.toggle_done(parse_task_id(&task)?)?;
            let state = if task.done { "done" } else { "not done" };
            println!("{}: {state}", task.name);
        }
        Command::Pin { task } => {
            let task = service.toggle_pin(parse_task_id(&task)?)?;
            let state = if task.pinned { "pinned" } else { "unpinned" };
            println!("{}: {state}", task.name);
        }
        Command::Rm { task } => {
            let removed = service.delete_task(parse_task_id(&task)?)?;
            println!("deleted task: {} ({})", removed.name, removed.id);
        }
        Command::Edit {
            task,
            name,
            description,
            color,
            emoji,
            deadline,
            clear_deadline,
            categories,
        } => {
            let update = TaskUpdate {
                name,
                description,
                color: parse_color(color)?,
                emoji,
                deadline: parse_deadline(deadline)?,
                clear_deadline,
                categories: categories
                    .map(|raw| parse_category_ids(&raw))
                    .transpose()?,
            };
            let task = service.edit_task(parse_task_id(&task)?, update)?;
            println!("updated task: {} ({})", task.name, task.id);
        }
        Command::Category(command) => run_category(command, service)?,
        Command::Share { task } => {
            let url = service.share_task(parse_task_id(&task)?, origin)?;
            println!("{url}");
        }
        Command::Import { url, accept } => {
            let share = IncomingShare::from_url(&url)?;
            if accept {
                let task = service.import_shared(share)?;
                println!("imported task: {} ({})", task.name, task.id);
            } else {
                let from = share.shared_by;
                let task = share.task;
                println!("task \"{}\" shared by {from}", task.name);
                if let Some(description) = &task.description {
                    println!("  {description}");
                }
                for category in task.categories() {
                    println!("  category: {}", category.name);
                }
                println!("run again with --accept to add it");
            }
        }
        Command::Purge { all } => {
            let removed = if all {
                service.purge_all()?
            } else {
                service.purge_done()?
            };
            println!("removed {removed} task(s)");
        }
        Command::Stats => {
            let tasks = service.user()?.tasks;
            let stats = TaskStats::for_tasks(&tasks);
            println!("{}/{} done ({}%)", stats.done, stats.total, stats.percentage);
            println!("{}", stats.message());
        }
        Command::Settings(command) => run_settings(command, service)?,
        Command::Profile(command) => run_profile(command, service)?,
    }

    Ok(())
}

fn run_category<S: UserStore>(command: CategoryCommand, service: &UserService<S>) -> Result<()> {
    match command {
        CategoryCommand::Add { name, color, emoji } => {
            let color = parse_color(color)?.unwrap_or_default();
            let category = service.add_category(name, color, emoji)?;
            println!("created category: {} ({})", category.name, category.id);
        }
        CategoryCommand::Ls => {
            let categories = service.user()?.categories;
            if categories.is_empty() {
                println!("No categories found");
                return Ok(());
            }
            for category in &categories {
                println!("{}", category_line(category));
            }
        }
        CategoryCommand::Edit {
            category,
            name,
            color,
            emoji,
        } => {
            let id = parse_category_id(&category)?;
            let category = service.edit_category(id, name, parse_color(color)?, emoji)?;
            println!("updated category: {} ({})", category.name, category.id);
        }
        CategoryCommand::Rm { category } => {
            let removed = service.delete_category(parse_category_id(&category)?)?;
            println!("deleted category: {} ({})", removed.name, removed.id);
        }
    }
    Ok(())
}

fn run_settings<S: UserStore>(command: SettingsCommand, service: &UserService<S>) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = service.settings()?;
            println!("enable-categories: {}", settings.enable_categories);
            println!("done-to-bottom: {}", settings.done_to_bottom);
            println!("app-badge: {}", settings.app_badge);
        }
        SettingsCommand::Set {
            enable_categories,
            done_to_bottom,
            app_badge,
        } => {
            let current = service.settings()?;
            service.update_settings(AppSettings {
                enable_categories: enable_categories.unwrap_or(current.enable_categories),
                done_to_bottom: done_to_bottom.unwrap_or(current.done_to_bottom),
                app_badge: app_badge.unwrap_or(current.app_badge),
            })?;
            println!("settings updated");
        }
    }
    Ok(())
}

fn run_profile<S: UserStore>(command: ProfileCommand, service: &UserService<S>) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            let user = service.user()?;
            println!("name: {}", user.name.as_deref().unwrap_or("-"));
        }
        ProfileCommand::Set { name } => {
            service.set_name(Some(name))?;
            println!("profile updated");
        }
        ProfileCommand::Clear => {
            service.set_name(None)?;
            println!("profile cleared");
        }
    }
    Ok(())
}

fn parse_task_id(raw: &str) -> Result<TaskId> {
    TaskId::from_str(raw).with_context(|| format!("Invalid task id: {raw}"))
}

fn parse_category_id(raw: &str) -> Result<CategoryId> {
    CategoryId::from_str(raw).with_context(|| format!("Invalid category id: {raw}"))
}

fn parse_category_ids(raw: &[String]) -> Result<Vec<CategoryId>> {
    raw.iter().map(|value| parse_category_id(value)).collect()
}

fn parse_color(raw: Option<String>) -> Result<Option<HexColor>> {
    raw.map(|value| {
        value
            .parse()
            .with_context(|| format!("Invalid color: {value}"))
    })
    .transpose()
}

fn parse_deadline(raw: Option<String>) -> Result<Option<OffsetDateTime>> {
    raw.map(|value| {
        OffsetDateTime::parse(&value, &Rfc3339)
            .with_context(|| format!("Invalid deadline (expected RFC 3339): {value}"))
    })
    .transpose()
}
