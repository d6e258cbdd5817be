//! The ordered/filtered view over a task collection.
//!
//! Given the full task set and the transient view inputs (search text,
//! selected category, done-to-bottom preference) this produces the exact
//! sequence to display. The function is pure and every step is stable:
//! ties keep their original collection order.

use crate::id::CategoryId;
use crate::task::Task;
use crate::text_matcher::TextMatcher;

/// View inputs for [`reorder_tasks`].
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    search: Option<String>,
    category: Option<CategoryId>,
    done_to_bottom: bool,
}

impl TaskQuery {
    /// Create an empty query: no filters, no regrouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text (whitespace-only inputs become no filter).
    #[must_use]
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search.and_then(|raw| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        });
        self
    }

    /// Restrict to tasks carrying the given category.
    #[must_use]
    pub const fn with_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    /// Sort completed tasks after incomplete ones within the unpinned block.
    #[must_use]
    pub const fn with_done_to_bottom(mut self, enabled: bool) -> Self {
        self.done_to_bottom = enabled;
        self
    }
}

/// Produce the ordered sequence of tasks to display.
///
/// Pinned tasks always come first as a block in their original relative
/// order. The category and search filters apply to both blocks; the
/// done-to-bottom regrouping applies to the unpinned block only.
#[must_use]
pub fn reorder_tasks<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<&'a Task> {
    let matcher = query.search.as_deref().and_then(TextMatcher::new);
    let visible = |task: &Task| {
        query
            .category
            .is_none_or(|category| task.references_category(category))
            && matcher.as_ref().is_none_or(|matcher| matcher.matches(task))
    };

    let (pinned, unpinned): (Vec<&Task>, Vec<&Task>) =
        tasks.iter().filter(|task| visible(task)).partition(|task| task.pinned);

    let mut ordered = pinned;
    if query.done_to_bottom {
        let (not_done, done): (Vec<&Task>, Vec<&Task>) =
            unpinned.into_iter().partition(|task| !task.done);
        ordered.extend(not_done);
        ordered.extend(done);
    } else {
        ordered.extend(unpinned);
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Category;
    use time::macros::datetime;

    struct Row<'a> {
        name: &'a str,
        pinned: bool,
        done: bool,
    }

    fn build(rows: &[Row<'_>]) -> Vec<Task> {
        rows.iter()
            .map(|row| {
                let mut task = Task::new(
                    row.name,
                    "#b624ff".parse().expect("valid test color"),
                    datetime!(2024-01-01 00:00 UTC),
                );
                task.pinned = row.pinned;
                task.done = row.done;
                task
            })
            .collect()
    }

    fn names(ordered: &[&Task]) -> Vec<String> {
        ordered.iter().map(|task| task.name.clone()).collect()
    }

    #[test]
    fn empty_collection_yields_empty_view() {
        let ordered = reorder_tasks(&[], &TaskQuery::new());
        assert!(ordered.is_empty());
    }

    #[test]
    fn no_filters_is_a_stable_pinned_partition() {
        let tasks = build(&[
            Row { name: "a", pinned: false, done: false },
            Row { name: "b", pinned: true, done: true },
            Row { name: "c", pinned: false, done: true },
            Row { name: "d", pinned: true, done: false },
        ]);

        let ordered = reorder_tasks(&tasks, &TaskQuery::new());
        assert_eq!(names(&ordered), ["b", "d", "a", "c"]);
    }

    #[test]
    fn done_to_bottom_regroups_only_the_unpinned_block() {
        let tasks = build(&[
            Row { name: "pinned done", pinned: true, done: true },
            Row { name: "first done", pinned: false, done: true },
            Row { name: "pinned open", pinned: true, done: false },
            Row { name: "open", pinned: false, done: false },
            Row { name: "second done", pinned: false, done: true },
        ]);

        let ordered = reorder_tasks(&tasks, &TaskQuery::new().with_done_to_bottom(true));
        assert_eq!(
            names(&ordered),
            ["pinned done", "pinned open", "open", "first done", "second done"]
        );
    }

    #[test]
    fn documented_example_orders_one_three_two() {
        // tasks [{1, pinned, open, "A"}, {2, unpinned, done, "B"},
        //        {3, unpinned, open, "C"}] with done-to-bottom -> [1, 3, 2]
        let tasks = build(&[
            Row { name: "A", pinned: true, done: false },
            Row { name: "B", pinned: false, done: true },
            Row { name: "C", pinned: false, done: false },
        ]);

        let ordered = reorder_tasks(&tasks, &TaskQuery::new().with_done_to_bottom(true));
        assert_eq!(names(&ordered), ["A", "C", "B"]);
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let mut tasks = build(&[
            Row { name: "Email Bob", pinned: false, done: false },
            Row { name: "errand", pinned: false, done: false },
            Row { name: "unrelated", pinned: false, done: false },
        ]);
        tasks[1].description = Some("send EMAIL to the plumber".to_owned());

        let ordered = reorder_tasks(&tasks, &TaskQuery::new().with_search(Some("email")));
        assert_eq!(names(&ordered), ["Email Bob", "errand"]);
    }

    #[test]
    fn search_with_no_matches_yields_empty_view() {
        let tasks = build(&[Row { name: "a", pinned: true, done: false }]);
        let ordered = reorder_tasks(&tasks, &TaskQuery::new().with_search(Some("zzz")));
        assert!(ordered.is_empty());
    }

    #[test]
    fn category_filter_applies_to_both_blocks() {
        let category = Category::new("Work", "#248eff".parse().expect("valid test color"));
        let mut tasks = build(&[
            Row { name: "pinned work", pinned: true, done: false },
            Row { name: "pinned other", pinned: true, done: false },
            Row { name: "work", pinned: false, done: false },
            Row { name: "other", pinned: false, done: false },
        ]);
        tasks[0].category = Some(vec![category.clone()]);
        tasks[2].category = Some(vec![category.clone()]);

        let ordered = reorder_tasks(&tasks, &TaskQuery::new().with_category(Some(category.id)));
        assert_eq!(names(&ordered), ["pinned work", "work"]);
    }

    #[test]
    fn category_no_task_holds_yields_empty_not_error() {
        let tasks = build(&[Row { name: "a", pinned: false, done: false }]);
        let ordered =
            reorder_tasks(&tasks, &TaskQuery::new().with_category(Some(CategoryId::new())));
        assert!(ordered.is_empty());
    }

    #[test]
    fn category_every_task_holds_is_a_no_op() {
        let category = Category::new("All", "#1fff44".parse().expect("valid test color"));
        let mut tasks = build(&[
            Row { name: "a", pinned: false, done: false },
            Row { name: "b", pinned: false, done: false },
        ]);
        for task in &mut tasks {
            task.category = Some(vec![category.clone()]);
        }

        let unfiltered = reorder_tasks(&tasks, &TaskQuery::new());
        let filtered = reorder_tasks(&tasks, &TaskQuery::new().with_category(Some(category.id)));
        assert_eq!(names(&unfiltered), names(&filtered));
    }

    #[test]
    fn reorder_is_idempotent() {
        let tasks = build(&[
            Row { name: "a", pinned: false, done: true },
            Row { name: "b", pinned: true, done: false },
            Row { name: "c", pinned: false, done: false },
        ]);
        let query = TaskQuery::new().with_done_to_bottom(true);

        let once: Vec<Task> = reorder_tasks(&tasks, &query).into_iter().cloned().collect();
        let twice = reorder_tasks(&once, &query);
        assert_eq!(names(&twice), once.iter().map(|t| t.name.clone()).collect::<Vec<_>>());
    }
}
