//! Completion statistics over a task collection.

use tidytask_core::Task;

/// Summary of how far along the task list is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Total number of tasks.
    pub total: usize,
    /// Number of completed tasks.
    pub done: usize,
    /// Completion percentage, 0-100 (0 when there are no tasks).
    pub percentage: u32,
}

impl TaskStats {
    /// Compute statistics for a task collection.
    #[must_use]
    pub fn for_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let done = tasks.iter().filter(|task| task.done).count();
        let percentage = if total == 0 {
            0
        } else {
            u32::try_from(done * 100 / total).unwrap_or(0)
        };
        Self { total, done, percentage }
    }

    /// An encouragement line matching the completion percentage.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self.percentage {
            0 => "You haven't completed any tasks yet. Keep going!",
            100 => "Congratulations! All tasks completed!",
            75..=99 => "Almost there! Keep it up.",
            50..=74 => "You're halfway there. Keep going!",
            25..=49 => "You're making good progress. Keep working!",
            _ => "You're just getting started. Keep moving!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidytask_core::HexColor;
    use time::OffsetDateTime;

    fn tasks(done_flags: &[bool]) -> Vec<Task> {
        done_flags
            .iter()
            .map(|&done| {
                let mut task = Task::new("t", HexColor::default(), OffsetDateTime::now_utc());
                task.done = done;
                task
            })
            .collect()
    }

    #[test]
    fn empty_collection_is_zero_percent() {
        let stats = TaskStats::for_tasks(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, 0);
        assert!(stats.message().contains("haven't completed"));
    }

    #[test]
    fn all_done_is_one_hundred_percent() {
        let stats = TaskStats::for_tasks(&tasks(&[true, true]));
        assert_eq!(stats.percentage, 100);
        assert!(stats.message().contains("Congratulations"));
    }

    #[test]
    fn message_tiers_follow_the_percentage() {
        assert_eq!(TaskStats::for_tasks(&tasks(&[true, false, false, false])).percentage, 25);
        assert!(
            TaskStats::for_tasks(&tasks(&[true, false, false, false]))
                .message()
                .contains("good progress")
        );
        assert!(
            TaskStats::for_tasks(&tasks(&[true, true, false, false]))
                .message()
                .contains("halfway")
        );
        assert!(
            TaskStats::for_tasks(&tasks(&[true, true, true, false]))
                .message()
                .contains("Almost there")
        );
    }
}
