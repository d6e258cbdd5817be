//! Domain types and pure logic for tidytask.
//!
//! Everything here is synchronous, side-effect free and ignorant of where
//! state lives: the task/category model, the ordered/filtered task view,
//! and the shareable-link codec.

/// Color value type.
pub mod color;
/// Identifier types.
pub mod id;
/// Input length limits.
pub mod limits;
/// The ordered/filtered task view.
pub mod reorder;
/// Shareable task link codec.
pub mod share;
/// Task and category records.
pub mod task;
/// Case-insensitive task text search.
pub mod text_matcher;
/// User profile, settings and collections.
pub mod user;

pub use color::{ColorError, HexColor};
pub use id::{CategoryId, TaskId};
pub use reorder::{TaskQuery, reorder_tasks};
pub use share::{IncomingShare, ShareError, share_url};
pub use task::{Category, Task};
pub use text_matcher::TextMatcher;
pub use user::{AppSettings, DarkMode, EmojiStyle, User};
