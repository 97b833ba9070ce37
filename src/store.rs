// In-memory task list store with derived filtered views

use crate::filter::Filter;
use crate::models::{Counts, Task, now_ms};
use tracing::debug;
use uuid::Uuid;

/// Owner of all task list state for one session
///
/// Holds the ordered task list (insertion order, new tasks append at the
/// end) and the current visibility filter. Single-threaded by design: the
/// store is owned by whatever event loop drives it, every operation runs
/// to completion, and the derived views are recomputed on each query.
///
/// Nothing here touches the filesystem; the list is discarded on drop.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: Filter,
}

impl TaskStore {
    /// Create an empty store with the default filter (`All`)
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a task from raw user input
    ///
    /// The text is trimmed first. If nothing remains, the call is a no-op
    /// and returns `None` — empty input is tolerated, not an error.
    /// Otherwise the new task is appended to the end of the list with a
    /// fresh UUIDv7 id, `completed = false` and the current timestamp,
    /// and its id is returned.
    pub fn add(&mut self, raw_text: &str) -> Option<String> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("add: text empty after trim, ignoring");
            return None;
        }

        let task = Task {
            id: Uuid::now_v7().to_string(),
            text: text.to_string(),
            completed: false,
            created_at: now_ms(),
        };
        let id = task.id.clone();
        debug!(id = %id, text, "add: appended task");
        self.tasks.push(task);

        Some(id)
    }

    /// Flip the completion flag of the task with the given id
    ///
    /// Unknown ids are a silent no-op (a delete may have raced the
    /// caller's view); returns whether a task was found. No other task
    /// is touched and the list order is unchanged.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!(id, completed = task.completed, "toggle: flipped task");
                true
            }
            None => {
                debug!(id, "toggle: no task with this id");
                false
            }
        }
    }

    /// Remove the task with the given id, if present
    ///
    /// The relative order of all remaining tasks is preserved. Unknown
    /// ids are a silent no-op; returns whether a task was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() < before;
        debug!(id, removed, "delete");
        removed
    }

    /// Set the current visibility filter
    pub fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "set_filter");
        self.filter = filter;
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// The current visibility filter
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// The subsequence of the task list visible under the current filter
    ///
    /// Pure query; insertion order is preserved.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| self.filter.matches(t)).collect()
    }

    /// Tallies over the full list, independent of the current filter
    pub fn counts(&self) -> Counts {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        Counts {
            total,
            completed,
            active: total - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = TaskStore::new();

        let id1 = store.add("Buy milk").unwrap();
        let id2 = store.add("Walk dog").unwrap();
        assert_ne!(id1, id2);

        let visible = store.visible_tasks();
        assert_eq!(texts(&visible), vec!["Buy milk", "Walk dog"]);
        assert!(visible.iter().all(|t| !t.completed));
        assert!(visible.iter().all(|t| t.created_at > 0));
    }

    #[test]
    fn test_add_trims_text() {
        let mut store = TaskStore::new();

        store.add("  Buy milk  \n").unwrap();

        let visible = store.visible_tasks();
        assert_eq!(visible[0].text, "Buy milk");
    }

    #[test]
    fn test_add_empty_is_noop() {
        let mut store = TaskStore::new();

        assert!(store.add("").is_none());
        assert!(store.add("   ").is_none());
        assert!(store.add("\t\n").is_none());
        assert_eq!(store.counts().total, 0);
    }

    #[test]
    fn test_add_ids_are_distinct() {
        let mut store = TaskStore::new();

        // Same-tick creations must still get distinct ids
        let ids: Vec<String> = (0..100).map(|i| store.add(&format!("task {}", i)).unwrap()).collect();

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
        assert_eq!(store.counts().total, 100);
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let mut store = TaskStore::new();
        let id1 = store.add("Buy milk").unwrap();
        let _id2 = store.add("Walk dog").unwrap();

        assert!(store.toggle(&id1));

        let visible = store.visible_tasks();
        assert!(visible[0].completed);
        assert!(!visible[1].completed);
    }

    #[test]
    fn test_toggle_twice_is_involution() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk").unwrap();

        assert!(store.toggle(&id));
        assert!(store.toggle(&id));

        assert!(!store.visible_tasks()[0].completed);
        assert_eq!(store.counts().completed, 0);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut store = TaskStore::new();
        store.add("Buy milk").unwrap();

        assert!(!store.toggle("no-such-id"));
        assert_eq!(store.counts().completed, 0);
        assert_eq!(store.counts().total, 1);
    }

    #[test]
    fn test_toggle_preserves_order() {
        let mut store = TaskStore::new();
        store.add("one").unwrap();
        let id = store.add("two").unwrap();
        store.add("three").unwrap();

        store.toggle(&id);

        assert_eq!(texts(&store.visible_tasks()), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = TaskStore::new();
        store.add("one").unwrap();
        let id = store.add("two").unwrap();
        store.add("three").unwrap();

        assert!(store.delete(&id));

        assert_eq!(texts(&store.visible_tasks()), vec!["one", "three"]);
        assert_eq!(store.counts().total, 2);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = TaskStore::new();
        store.add("one").unwrap();

        assert!(!store.delete("no-such-id"));
        assert_eq!(store.counts().total, 1);
    }

    #[test]
    fn test_delete_is_permanent() {
        let mut store = TaskStore::new();
        let id = store.add("one").unwrap();

        assert!(store.delete(&id));
        assert!(!store.delete(&id));
        assert!(!store.toggle(&id));
        assert_eq!(store.counts().total, 0);
    }

    #[test]
    fn test_visible_tasks_under_each_filter() {
        let mut store = TaskStore::new();
        let id1 = store.add("one").unwrap();
        store.add("two").unwrap();
        let id3 = store.add("three").unwrap();
        store.toggle(&id1);
        store.toggle(&id3);

        assert_eq!(store.filter(), Filter::All);
        assert_eq!(texts(&store.visible_tasks()), vec!["one", "two", "three"]);

        store.set_filter(Filter::Active);
        assert_eq!(texts(&store.visible_tasks()), vec!["two"]);

        store.set_filter(Filter::Completed);
        assert_eq!(texts(&store.visible_tasks()), vec!["one", "three"]);
    }

    #[test]
    fn test_filter_does_not_reorder_or_mutate() {
        let mut store = TaskStore::new();
        store.add("one").unwrap();
        let id = store.add("two").unwrap();
        store.toggle(&id);

        store.set_filter(Filter::Completed);
        store.set_filter(Filter::All);

        assert_eq!(texts(&store.visible_tasks()), vec!["one", "two"]);
        assert_eq!(store.counts().completed, 1);
    }

    #[test]
    fn test_counts_are_filter_independent() {
        let mut store = TaskStore::new();
        let id = store.add("one").unwrap();
        store.add("two").unwrap();
        store.toggle(&id);

        let all = store.counts();
        store.set_filter(Filter::Active);
        assert_eq!(store.counts(), all);
        store.set_filter(Filter::Completed);
        assert_eq!(store.counts(), all);
    }

    #[test]
    fn test_counts_always_balance() {
        let mut store = TaskStore::new();

        let mut ids = Vec::new();
        for i in 0..10 {
            ids.push(store.add(&format!("task {}", i)).unwrap());
        }
        for id in ids.iter().step_by(2) {
            store.toggle(id);
        }
        store.delete(&ids[3]);
        store.toggle(&ids[4]);

        let counts = store.counts();
        assert_eq!(counts.total, counts.completed + counts.active);
        assert_eq!(counts.total, 9);
    }

    #[test]
    fn test_scenario_buy_milk_walk_dog() {
        let mut store = TaskStore::new();

        let milk = store.add("Buy milk").unwrap();
        let dog = store.add("Walk dog").unwrap();
        assert_eq!(
            store.counts(),
            Counts {
                total: 2,
                completed: 0,
                active: 2
            }
        );

        store.toggle(&milk);
        assert_eq!(
            store.counts(),
            Counts {
                total: 2,
                completed: 1,
                active: 1
            }
        );

        store.set_filter(Filter::Completed);
        assert_eq!(texts(&store.visible_tasks()), vec!["Buy milk"]);

        store.set_filter(Filter::Active);
        assert_eq!(texts(&store.visible_tasks()), vec!["Walk dog"]);

        store.delete(&dog);
        assert_eq!(
            store.counts(),
            Counts {
                total: 1,
                completed: 1,
                active: 0
            }
        );
    }
}
