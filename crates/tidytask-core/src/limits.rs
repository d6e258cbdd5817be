//! Input length limits shared by every surface that accepts user text.

/// Maximum length of the profile display name, in characters.
pub const USER_NAME_MAX_LENGTH: usize = 14;

/// Maximum length of a task name, in characters.
pub const TASK_NAME_MAX_LENGTH: usize = 40;

/// Maximum length of a task description, in characters.
pub const DESCRIPTION_MAX_LENGTH: usize = 350;

/// Maximum length of a category name, in characters.
pub const CATEGORY_NAME_MAX_LENGTH: usize = 20;

/// Maximum number of categories attachable to a single task.
pub const MAX_CATEGORIES_IN_TASK: usize = 3;
