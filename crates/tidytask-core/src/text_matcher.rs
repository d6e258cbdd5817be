use crate::task::Task;

/// Case-insensitive substring matcher for task fields.
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Normalize a query string into a matcher. Returns `None` for blank inputs.
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Whether the task's name or description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.name)
            || task
                .description
                .as_deref()
                .is_some_and(|description| self.matches_field(description))
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn task(name: &str, description: Option<&str>) -> Task {
        let mut task = Task::new(
            name,
            "#b624ff".parse().expect("valid test color"),
            datetime!(2024-01-01 00:00 UTC),
        );
        task.description = description.map(str::to_owned);
        task
    }

    #[test]
    fn matcher_skips_blank_queries() {
        assert!(TextMatcher::new("").is_none());
        assert!(TextMatcher::new("   ").is_none());
        assert!(TextMatcher::new("\n").is_none());
    }

    #[test]
    fn matcher_is_case_insensitive() {
        let groceries = task("Buy Groceries", None);

        let matcher = TextMatcher::new("groceries")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&groceries));

        let matcher = TextMatcher::new("GROCERIES")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&groceries));

        let missing = TextMatcher::new("laundry")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(!missing.matches(&groceries));
    }

    #[test]
    fn matcher_also_searches_the_description() {
        let described = task("errand", Some("pick up the DRY cleaning"));

        let matcher = TextMatcher::new("dry clean")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&described));

        let bare = task("errand", None);
        assert!(!matcher.matches(&bare));
    }
}
