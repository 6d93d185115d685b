use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::model::filter::Filter;
use crate::model::task::Task;
use crate::repository::SnapshotStore;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("task text required")]
pub struct ValidationError;

/// What a mutation wants the user to hear about. Returned to the caller
/// instead of being pushed into any particular notification surface; the
/// presentation layer decides whether to show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    TaskAdded,
    TaskCompleted,
    TaskDeleted,
}

/// Owns the canonical task collection and the display preference for one
/// session. Every mutation pushes the full snapshot to the store before
/// returning; a failed write is logged and the in-memory state stays the
/// source of truth for the rest of the session.
pub struct TaskEngine<S: SnapshotStore> {
    store: S,
    tasks: Vec<Task>,
    dark_mode: bool,
    filter: Filter,
}

impl<S: SnapshotStore> TaskEngine<S> {
    /// Restore state from the store. A missing snapshot is simply an empty
    /// collection; a corrupt one is logged and treated the same way, so
    /// construction never fails on bad cached data.
    pub fn load(store: S) -> Self {
        let tasks = match store.load_tasks() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, "could not restore tasks, starting empty");
                Vec::new()
            }
        };
        let dark_mode = match store.load_dark_mode() {
            Ok(on) => on,
            Err(e) => {
                warn!(error = %e, "could not restore display preference, defaulting to light");
                false
            }
        };
        Self {
            store,
            tasks,
            dark_mode,
            filter: Filter::default(),
        }
    }

    /// Trims the input and prepends a new task, newest first. Whitespace-only
    /// input is rejected without touching the collection.
    pub fn add_task(&mut self, raw_text: &str) -> Result<Notice, ValidationError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(ValidationError);
        }
        self.tasks.insert(0, Task::new(text.to_string()));
        self.persist_tasks();
        Ok(Notice::TaskAdded)
    }

    /// Flips completion for the given id. An unknown id is a silent no-op so
    /// stale references (a double event racing a re-render) stay harmless.
    /// Only the active→completed transition carries a notice.
    pub fn toggle_task(&mut self, id: Uuid) -> Option<Notice> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        let notice = task.completed.then_some(Notice::TaskCompleted);
        self.persist_tasks();
        notice
    }

    /// Removes the task with the given id. Unknown ids are a silent no-op.
    pub fn delete_task(&mut self, id: Uuid) -> Option<Notice> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        self.tasks.remove(pos);
        self.persist_tasks();
        Some(Notice::TaskDeleted)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Flips the display preference and persists it, independently of the
    /// task snapshot. Returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        if let Err(e) = self.store.save_dark_mode(self.dark_mode) {
            warn!(error = %e, "could not persist display preference");
        }
        self.dark_mode
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// The view for the currently selected filter, in collection order.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks_matching(self.filter)
    }

    pub fn tasks_matching(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    fn persist_tasks(&self) {
        if let Err(e) = self.store.save_tasks(&self.tasks) {
            warn!(error = %e, "could not persist tasks, keeping in-memory state");
        }
    }
}
