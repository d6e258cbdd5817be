use crate::color::HexColor;
use crate::id::{CategoryId, TaskId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A user-defined label attachable to tasks for grouping and filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier of the category.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Badge color.
    pub color: HexColor,
    /// Optional emoji code shown next to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Category {
    /// Create a category with a freshly minted identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, color: HexColor) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color,
            emoji: None,
        }
    }
}

/// A single to-do item.
///
/// Field names and the wire shape mirror the JSON the application keeps in
/// its persistent state and embeds in share links: camelCase keys, RFC 3339
/// timestamps and full category definitions embedded rather than bare ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier of the task.
    pub id: TaskId,
    /// Whether the task is completed.
    pub done: bool,
    /// Pinned tasks always render ahead of unpinned ones.
    pub pinned: bool,
    /// Display name.
    pub name: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional emoji code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Card color.
    pub color: HexColor,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Optional deadline.
    #[serde(
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<OffsetDateTime>,
    /// Timestamp of the most recent edit.
    #[serde(
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_save: Option<OffsetDateTime>,
    /// Categories attached to this task, embedded by value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<Category>>,
    /// Display name of the user who shared this task, if it was imported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_by: Option<String>,
}

impl Task {
    /// Create a not-done, unpinned task with a freshly minted identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, color: HexColor, date: OffsetDateTime) -> Self {
        Self {
            id: TaskId::new(),
            done: false,
            pinned: false,
            name: name.into(),
            description: None,
            emoji: None,
            color,
            date,
            deadline: None,
            last_save: None,
            category: None,
            shared_by: None,
        }
    }

    /// Whether this task carries the given category.
    #[must_use]
    pub fn references_category(&self, id: CategoryId) -> bool {
        self.category
            .as_ref()
            .is_some_and(|cats| cats.iter().any(|cat| cat.id == id))
    }

    /// Iterate over the attached categories, if any.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.category.iter().flatten()
    }
}
