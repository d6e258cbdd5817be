//! Service façade that owns every mutation of the user state.
//!
//! Each operation loads the current state from the store, applies exactly
//! one change, persists the result and returns the outcome. Nothing here is
//! concurrent: there is a single writer per state file.

use anyhow::Result;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use tidytask_core::limits::{
    CATEGORY_NAME_MAX_LENGTH, DESCRIPTION_MAX_LENGTH, MAX_CATEGORIES_IN_TASK,
    TASK_NAME_MAX_LENGTH, USER_NAME_MAX_LENGTH,
};
use tidytask_core::{
    AppSettings, Category, CategoryId, HexColor, IncomingShare, Task, TaskId, TaskQuery, User,
    reorder_tasks, share_url,
};

use crate::store::UserStore;

/// Validation and lookup failures raised by [`UserService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No task with the given identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// No category with the given identifier.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),
    /// Task name exceeds the allowed length.
    #[error("task name is too long: {len} characters (limit {TASK_NAME_MAX_LENGTH})")]
    TaskNameTooLong {
        /// Length of the rejected name.
        len: usize,
    },
    /// Task description exceeds the allowed length.
    #[error("description is too long: {len} characters (limit {DESCRIPTION_MAX_LENGTH})")]
    DescriptionTooLong {
        /// Length of the rejected description.
        len: usize,
    },
    /// Category name exceeds the allowed length.
    #[error("category name is too long: {len} characters (limit {CATEGORY_NAME_MAX_LENGTH})")]
    CategoryNameTooLong {
        /// Length of the rejected name.
        len: usize,
    },
    /// Profile name exceeds the allowed length.
    #[error("user name is too long: {len} characters (limit {USER_NAME_MAX_LENGTH})")]
    UserNameTooLong {
        /// Length of the rejected name.
        len: usize,
    },
    /// Too many categories attached to one task.
    #[error("a task may carry at most {MAX_CATEGORIES_IN_TASK} categories (got {got})")]
    TooManyCategories {
        /// Number of categories requested.
        got: usize,
    },
}

/// Fields accepted when creating a task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    /// Display name (required, length-checked).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Card color; defaults to the first palette entry when absent.
    pub color: Option<HexColor>,
    /// Optional emoji code.
    pub emoji: Option<String>,
    /// Optional deadline.
    pub deadline: Option<OffsetDateTime>,
    /// Create the task pinned.
    pub pinned: bool,
    /// Categories to attach, by id.
    pub categories: Vec<CategoryId>,
}

/// Fields accepted when editing a task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New description (`Some` replaces, including with an empty string).
    pub description: Option<String>,
    /// New card color.
    pub color: Option<HexColor>,
    /// New emoji code.
    pub emoji: Option<String>,
    /// New deadline.
    pub deadline: Option<OffsetDateTime>,
    /// Remove the existing deadline. Takes precedence over `deadline`.
    pub clear_deadline: bool,
    /// Replacement category set, by id.
    pub categories: Option<Vec<CategoryId>>,
}

/// High-level operations over one user's task and category collections.
pub struct UserService<S> {
    store: S,
}

impl<S: UserStore> UserService<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the full current state.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn user(&self) -> Result<User> {
        self.store.load().map_err(Into::into)
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut User) -> Result<T>) -> Result<T> {
        let mut user = self.store.load().map_err(Into::into)?;
        let outcome = apply(&mut user)?;
        self.store.save(&user).map_err(Into::into)?;
        Ok(outcome)
    }

    /// The ordered/filtered task view for the given inputs, using the
    /// stored done-to-bottom preference.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn list(&self, search: Option<&str>, category: Option<CategoryId>) -> Result<Vec<Task>> {
        let user = self.user()?;
        let query = TaskQuery::new()
            .with_search(search)
            .with_category(category)
            .with_done_to_bottom(user.settings.done_to_bottom);
        Ok(reorder_tasks(&user.tasks, &query).into_iter().cloned().collect())
    }

    /// Create a task.
    ///
    /// # Errors
    /// Fails on length-limit violations, unknown category ids, or store
    /// failures.
    pub fn add_task(&self, new: NewTask) -> Result<Task> {
        self.mutate(|user| {
            check_task_text(&new.name, new.description.as_deref())?;
            let categories = resolve_categories(user, &new.categories)?;

            let color = new
                .color
                .or_else(|| user.color_list.first().cloned())
                .unwrap_or_default();
            let mut task = Task::new(new.name.clone(), color, OffsetDateTime::now_utc());
            task.description = new.description.clone();
            task.emoji = new.emoji.clone();
            task.deadline = new.deadline;
            task.pinned = new.pinned;
            task.category = (!categories.is_empty()).then_some(categories);

            info!(task = %task.id, name = %task.name, "task created");
            user.tasks.push(task.clone());
            Ok(task)
        })
    }

    /// Toggle the done flag.
    ///
    /// # Errors
    /// Fails when the task does not exist or the store fails.
    pub fn toggle_done(&self, id: TaskId) -> Result<Task> {
        self.mutate(|user| {
            let task = find_task_mut(user, id)?;
            task.done = !task.done;
            task.last_save = Some(OffsetDateTime::now_utc());
            Ok(task.clone())
        })
    }

    /// Toggle the pinned flag.
    ///
    /// # Errors
    /// Fails when the task does not exist or the store fails.
    pub fn toggle_pin(&self, id: TaskId) -> Result<Task> {
        self.mutate(|user| {
            let task = find_task_mut(user, id)?;
            task.pinned = !task.pinned;
            task.last_save = Some(OffsetDateTime::now_utc());
            Ok(task.clone())
        })
    }

    /// Apply a partial edit and stamp the last-save time.
    ///
    /// # Errors
    /// Fails on length-limit violations, unknown task or category ids, or
    /// store failures.
    pub fn edit_task(&self, id: TaskId, update: TaskUpdate) -> Result<Task> {
        self.mutate(|user| {
            let categories = update
                .categories
                .as_ref()
                .map(|ids| resolve_categories(user, ids))
                .transpose()?;

            let task = find_task_mut(user, id)?;
            let name = update.name.as_deref().unwrap_or(&task.name);
            let description = update.description.as_deref().or(task.description.as_deref());
            check_task_text(name, description)?;

            if let Some(name) = update.name {
                task.name = name;
            }
            if let Some(description) = update.description {
                task.description = (!description.is_empty()).then_some(description);
            }
            if let Some(color) = update.color {
                task.color = color;
            }
            if let Some(emoji) = update.emoji {
                task.emoji = (!emoji.is_empty()).then_some(emoji);
            }
            if update.clear_deadline {
                task.deadline = None;
            } else if update.deadline.is_some() {
                task.deadline = update.deadline;
            }
            if let Some(categories) = categories {
                task.category = (!categories.is_empty()).then_some(categories);
            }
            task.last_save = Some(OffsetDateTime::now_utc());
            Ok(task.clone())
        })
    }

    /// Delete a task.
    ///
    /// # Errors
    /// Fails when the task does not exist or the store fails.
    pub fn delete_task(&self, id: TaskId) -> Result<Task> {
        self.mutate(|user| {
            let index = user
                .tasks
                .iter()
                .position(|task| task.id == id)
                .ok_or(ServiceError::TaskNotFound(id))?;
            let removed = user.tasks.remove(index);
            info!(task = %id, "task deleted");
            Ok(removed)
        })
    }

    /// Delete every completed task, returning how many were removed.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn purge_done(&self) -> Result<usize> {
        self.mutate(|user| {
            let before = user.tasks.len();
            user.tasks.retain(|task| !task.done);
            Ok(before - user.tasks.len())
        })
    }

    /// Delete every task, returning how many were removed.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn purge_all(&self) -> Result<usize> {
        self.mutate(|user| {
            let removed = user.tasks.len();
            user.tasks.clear();
            Ok(removed)
        })
    }

    /// Create a category.
    ///
    /// # Errors
    /// Fails on a name-length violation or store failure.
    pub fn add_category(
        &self,
        name: String,
        color: HexColor,
        emoji: Option<String>,
    ) -> Result<Category> {
        self.mutate(|user| {
            let len = name.chars().count();
            if len > CATEGORY_NAME_MAX_LENGTH {
                return Err(ServiceError::CategoryNameTooLong { len }.into());
            }
            let mut category = Category::new(name, color);
            category.emoji = emoji;
            user.categories.push(category.clone());
            Ok(category)
        })
    }

    /// Edit a category and rewrite the copies embedded in tasks, keeping the
    /// collections consistent.
    ///
    /// # Errors
    /// Fails when the category does not exist, on a name-length violation,
    /// or on store failure.
    pub fn edit_category(
        &self,
        id: CategoryId,
        name: Option<String>,
        color: Option<HexColor>,
        emoji: Option<String>,
    ) -> Result<Category> {
        self.mutate(|user| {
            let category = user
                .categories
                .iter_mut()
                .find(|category| category.id == id)
                .ok_or(ServiceError::CategoryNotFound(id))?;
            if let Some(name) = name {
                let len = name.chars().count();
                if len > CATEGORY_NAME_MAX_LENGTH {
                    return Err(ServiceError::CategoryNameTooLong { len }.into());
                }
                category.name = name;
            }
            if let Some(color) = color {
                category.color = color;
            }
            if let Some(emoji) = emoji {
                category.emoji = (!emoji.is_empty()).then_some(emoji);
            }
            let updated = category.clone();

            for task in &mut user.tasks {
                if let Some(categories) = &mut task.category {
                    for embedded in categories.iter_mut().filter(|cat| cat.id == id) {
                        *embedded = updated.clone();
                    }
                }
            }
            Ok(updated)
        })
    }

    /// Delete a category and strip it from every task that carries it.
    ///
    /// # Errors
    /// Fails when the category does not exist or the store fails.
    pub fn delete_category(&self, id: CategoryId) -> Result<Category> {
        self.mutate(|user| {
            let index = user
                .categories
                .iter()
                .position(|category| category.id == id)
                .ok_or(ServiceError::CategoryNotFound(id))?;
            let removed = user.categories.remove(index);

            for task in &mut user.tasks {
                if let Some(categories) = &mut task.category {
                    categories.retain(|category| category.id != id);
                    if categories.is_empty() {
                        task.category = None;
                    }
                }
            }
            info!(category = %id, name = %removed.name, "category deleted");
            Ok(removed)
        })
    }

    /// Build a shareable link for a task. Category data is carried only
    /// when the sharer has categories enabled.
    ///
    /// # Errors
    /// Fails when the task does not exist, the payload cannot be encoded,
    /// or the store fails.
    pub fn share_task(&self, id: TaskId, origin: &str) -> Result<String> {
        let user = self.user()?;
        let task = user.task(id).ok_or(ServiceError::TaskNotFound(id))?;
        let sharer = user.name.as_deref().unwrap_or("User");
        Ok(share_url(task, sharer, origin, user.settings.enable_categories)?)
    }

    /// Accept a decoded share: merge the categories it carries into the
    /// category collection (overwrite on id match, append otherwise), then
    /// append the task itself with a freshly minted identifier and the
    /// sharer recorded as attribution.
    ///
    /// No deduplication is attempted; accepting the same share twice
    /// produces two tasks with distinct identifiers.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn import_shared(&self, share: IncomingShare) -> Result<Task> {
        self.mutate(|user| {
            let IncomingShare { mut task, shared_by } = share;

            for incoming in task.categories().cloned().collect::<Vec<_>>() {
                match user.categories.iter_mut().find(|cat| cat.id == incoming.id) {
                    Some(existing) => *existing = incoming,
                    None => user.categories.push(incoming),
                }
            }

            task.id = TaskId::new();
            info!(task = %task.id, from = %shared_by, "shared task imported");
            task.shared_by = Some(shared_by);
            user.tasks.push(task.clone());
            Ok(task)
        })
    }

    /// Current behavior switches.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn settings(&self) -> Result<AppSettings> {
        Ok(self.user()?.settings)
    }

    /// Replace the behavior switches.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn update_settings(&self, settings: AppSettings) -> Result<()> {
        self.mutate(|user| {
            user.settings = settings;
            Ok(())
        })
    }

    /// Set or clear the profile display name.
    ///
    /// # Errors
    /// Fails on a length violation or store failure.
    pub fn set_name(&self, name: Option<String>) -> Result<()> {
        self.mutate(|user| {
            if let Some(name) = &name {
                let len = name.chars().count();
                if len > USER_NAME_MAX_LENGTH {
                    return Err(ServiceError::UserNameTooLong { len }.into());
                }
            }
            user.name = name.filter(|name| !name.is_empty());
            Ok(())
        })
    }
}

fn find_task_mut(user: &mut User, id: TaskId) -> Result<&mut Task, ServiceError> {
    user.tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or(ServiceError::TaskNotFound(id))
}

fn check_task_text(name: &str, description: Option<&str>) -> Result<(), ServiceError> {
    let len = name.chars().count();
    if len > TASK_NAME_MAX_LENGTH {
        return Err(ServiceError::TaskNameTooLong { len });
    }
    if let Some(description) = description {
        let len = description.chars().count();
        if len > DESCRIPTION_MAX_LENGTH {
            return Err(ServiceError::DescriptionTooLong { len });
        }
    }
    Ok(())
}

fn resolve_categories(user: &User, ids: &[CategoryId]) -> Result<Vec<Category>, ServiceError> {
    if ids.len() > MAX_CATEGORIES_IN_TASK {
        return Err(ServiceError::TooManyCategories { got: ids.len() });
    }
    ids.iter()
        .map(|&id| {
            user.category(id)
                .cloned()
                .ok_or(ServiceError::CategoryNotFound(id))
        })
        .collect()
}
