use crate::color::HexColor;
use crate::task::{Category, Task};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Rendering style for emoji codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiStyle {
    /// Apple emoji set.
    #[default]
    Apple,
    /// Google emoji set.
    Google,
    /// Twitter emoji set.
    Twitter,
    /// Facebook emoji set.
    Facebook,
    /// Platform-native rendering.
    Native,
}

/// Dark mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the system preference.
    System,
    /// Derive from the active theme's colors.
    #[default]
    Auto,
}

/// User-tunable behavior switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Whether categories are shown and carried in share links.
    pub enable_categories: bool,
    /// Sort completed tasks after incomplete ones (unpinned block only).
    pub done_to_bottom: bool,
    /// Surface the count of open tasks as an application badge.
    pub app_badge: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            enable_categories: true,
            done_to_bottom: false,
            app_badge: false,
        }
    }
}

/// The whole persisted application state for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Profile display name.
    pub name: Option<String>,
    /// When the profile was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Emoji rendering style.
    pub emojis_style: EmojiStyle,
    /// Selected theme name.
    pub theme: String,
    /// Dark mode preference.
    pub darkmode: DarkMode,
    /// Color palette offered when creating tasks and categories.
    pub color_list: Vec<HexColor>,
    /// Behavior switches.
    pub settings: AppSettings,
    /// The user's category collection.
    pub categories: Vec<Category>,
    /// The user's task collection.
    pub tasks: Vec<Task>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            name: None,
            created_at: OffsetDateTime::now_utc(),
            emojis_style: EmojiStyle::default(),
            theme: "system".to_owned(),
            darkmode: DarkMode::default(),
            color_list: default_color_list(),
            settings: AppSettings::default(),
            categories: default_categories(),
            tasks: Vec::new(),
        }
    }
}

impl User {
    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: crate::id::CategoryId) -> Option<&Category> {
        self.categories.iter().find(|cat| cat.id == id)
    }

    /// Look up a task by id.
    #[must_use]
    pub fn task(&self, id: crate::id::TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}

// Built-in palette and categories. The literals are validated by the unit
// tests below; anything malformed is silently skipped at runtime.
fn default_color_list() -> Vec<HexColor> {
    [
        "#FF69B4", "#FB34FF", "#b624ff", "#7ACCFA", "#4898F4", "#5061FF", "#50FF9F",
        "#3AE836", "#FFEA28", "#F9BE26", "#FF9518", "#FF5018", "#FF2F2F",
    ]
    .into_iter()
    .filter_map(|value| value.parse().ok())
    .collect()
}

fn default_categories() -> Vec<Category> {
    [
        ("Home", "#1fff44", "1f3e0"),
        ("Work", "#248eff", "1f4bc"),
        ("Personal", "#e843fe", "1f464"),
        ("Health/Fitness", "#ffdf3d", "1f4aa"),
        ("Education", "#ff8e24", "1f4da"),
    ]
    .into_iter()
    .filter_map(|(name, color, emoji)| {
        let mut category = Category::new(name, color.parse().ok()?);
        category.emoji = Some(emoji.to_owned());
        Some(category)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_has_builtin_categories_and_palette() {
        let user = User::default();
        assert_eq!(user.categories.len(), 5);
        assert!(user.tasks.is_empty());
        assert!(user.settings.enable_categories);
        assert!(!user.settings.done_to_bottom);
        assert!(!user.color_list.is_empty());
    }

    #[test]
    fn builtin_literals_all_parse() {
        // filter_map drops malformed entries, so the counts catch typos.
        assert_eq!(default_color_list().len(), 13);
        assert_eq!(default_categories().len(), 5);
    }

    #[test]
    fn settings_wire_names_are_camel_case() {
        let json = serde_json::to_value(AppSettings::default()).expect("serialize settings");
        assert_eq!(json["enableCategories"], true);
        assert_eq!(json["doneToBottom"], false);
    }

    #[test]
    fn user_deserialization_fills_missing_fields_with_defaults() {
        let user: User = serde_json::from_str("{\"tasks\":[]}").expect("deserialize sparse user");
        assert_eq!(user.theme, "system");
        assert_eq!(user.darkmode, DarkMode::Auto);
        assert!(user.settings.enable_categories);
    }
}
