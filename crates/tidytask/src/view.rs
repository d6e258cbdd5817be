//! Plain-text rendering of tasks and categories.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use tidytask_core::{Category, Task};

/// One task as a table row: flags, name, categories, age.
pub fn task_line(task: &Task, now: OffsetDateTime) -> String {
    let check = if task.done { "x" } else { " " };
    let pin = if task.pinned { "*" } else { " " };
    let categories = task
        .categories()
        .map(|category| category.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let categories = if categories.is_empty() {
        "-".to_owned()
    } else {
        categories
    };
    let attribution = task
        .shared_by
        .as_deref()
        .map(|name| format!(" (shared by {name})"))
        .unwrap_or_default();

    format!(
        "[{check}]{pin} {} | {} | {} | {} | {}{attribution}",
        task.id,
        task.name,
        task.color,
        categories,
        time_ago(task.date, now)
    )
}

/// One category as a table row.
pub fn category_line(category: &Category) -> String {
    let emoji = category.emoji.as_deref().unwrap_or("-");
    format!("{} | {} | {} | {}", category.id, category.name, category.color, emoji)
}

/// Human-friendly age of a timestamp. Future timestamps render as RFC 3339.
pub fn time_ago(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = now - then;
    let seconds = elapsed.whole_seconds();
    if seconds < 0 {
        return then
            .format(&Rfc3339)
            .unwrap_or_else(|_| then.to_string());
    }
    if seconds < 60 {
        return "just now".to_owned();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(hours / 24, "day")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
