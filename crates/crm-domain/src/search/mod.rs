//! Task search functionality.
//!
//! Used by the kanban toolbar and the gantt title filter.

use crate::Task;

/// Trait for searching tasks by various criteria.
pub trait TaskSearcher {
    /// Returns true if the task matches the search criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Search tasks by title (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct TitleSearcher {
    query: String,
}

impl TitleSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}

impl TaskSearcher for TitleSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_all() {
        let searcher = TitleSearcher::new("");
        assert!(searcher.matches(&Task::new(1, "Anything", "To Do")));
    }

    #[test]
    fn test_title_search_is_case_insensitive() {
        let searcher = TitleSearcher::new("LAUNCH");
        assert!(searcher.matches(&Task::new(1, "Product launch", "To Do")));
        assert!(!searcher.matches(&Task::new(2, "Team Training", "To Do")));
    }
}
