use crate::error::{PersistenceError, Result, TodoError};
use crate::persistence;
use crate::task_store::{FilterView, TaskStore};
use crate::types::{Task, TaskFilter, TaskStats};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File-backed task list with a current view filter. Every successful
/// mutation rewrites the whole file.
#[derive(Debug)]
pub struct TodoApp {
    store: TaskStore,
    data_file: PathBuf,
    current_filter: TaskFilter,
}

impl TodoApp {
    /// Loads `data_file`. A corrupt or unreadable file yields an empty list
    /// and the error, for the caller to show as a warning.
    pub fn open(data_file: impl Into<PathBuf>) -> (Self, Option<PersistenceError>) {
        let data_file = data_file.into();
        let (tasks, problem) = match persistence::load(&data_file) {
            Ok(tasks) => (tasks, None),
            Err(err) => {
                warn!("starting with an empty list: {err}");
                (Vec::new(), Some(err))
            }
        };
        info!(path = %data_file.display(), count = tasks.len(), "task list opened");
        let app = Self {
            store: TaskStore::from_tasks(tasks),
            data_file,
            current_filter: TaskFilter::All,
        };
        (app, problem)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn current_filter(&self) -> TaskFilter {
        self.current_filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.current_filter = filter;
    }

    /// Rows for the current filter, each with its index in the full list.
    pub fn visible_tasks(&self) -> FilterView<'_> {
        self.store.filter(self.current_filter)
    }

    pub fn add_task(&mut self, description: &str) -> Result<&Task> {
        let index = self.store.len();
        self.store.add(description)?;
        self.persist()?;
        Ok(&self.store.tasks()[index])
    }

    pub fn toggle_task(&mut self, index: usize) -> Result<&Task> {
        self.store.toggle(index)?;
        self.persist()?;
        Ok(&self.store.tasks()[index])
    }

    pub fn delete_task(&mut self, index: usize) -> Result<Task> {
        let removed = self.store.delete(index)?;
        self.persist()?;
        Ok(removed)
    }

    pub fn clear_completed(&mut self) -> Result<usize> {
        let removed = self.store.clear_completed();
        self.persist()?;
        Ok(removed)
    }

    pub fn stats(&self) -> TaskStats {
        self.store.stats()
    }

    pub fn remaining_label(&self) -> String {
        format!("{} tasks remaining", self.store.active_count())
    }

    fn persist(&self) -> Result<()> {
        persistence::save(self.store.tasks(), &self.data_file).map_err(|err| {
            warn!("task list kept in memory only: {err}");
            TodoError::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn every_mutation_is_written_through() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let (mut app, problem) = TodoApp::open(&path);
        assert!(problem.is_none());
        assert!(!path.exists());

        app.add_task("Buy milk").unwrap();
        app.add_task("Walk dog").unwrap();
        assert_eq!(persistence::load(&path).unwrap().len(), 2);

        app.toggle_task(0).unwrap();
        assert!(persistence::load(&path).unwrap()[0].completed());

        assert_eq!(app.clear_completed().unwrap(), 1);
        let on_disk = persistence::load(&path).unwrap();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].description(), "Walk dog");

        app.delete_task(0).unwrap();
        assert!(persistence::load(&path).unwrap().is_empty());
    }

    #[test]
    fn rejected_operations_do_not_touch_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let (mut app, _) = TodoApp::open(&path);
        assert!(matches!(app.add_task("  "), Err(TodoError::Validation(_))));
        assert!(matches!(app.toggle_task(0), Err(TodoError::Index { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_falls_back_to_empty_list() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        fs::write(&path, "[{\"description\": \"half").unwrap();
        let (app, problem) = TodoApp::open(&path);
        assert!(app.store().is_empty());
        assert!(matches!(problem, Some(PersistenceError::Malformed { .. })));
    }

    #[test]
    fn reopening_restores_saved_state() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let (mut app, _) = TodoApp::open(&path);
        app.add_task("Buy milk").unwrap();
        app.add_task("Walk dog").unwrap();
        app.toggle_task(1).unwrap();

        let (reopened, problem) = TodoApp::open(&path);
        assert!(problem.is_none());
        assert_eq!(reopened.store(), app.store());
        assert_eq!(reopened.remaining_label(), "1 tasks remaining");
    }

    #[test]
    fn filtered_rows_address_the_true_index() {
        let tmp = TempDir::new().unwrap();
        let (mut app, _) = TodoApp::open(tmp.path().join("tasks.json"));
        for description in ["Buy milk", "Buy milk", "Walk dog"] {
            app.add_task(description).unwrap();
        }
        app.toggle_task(0).unwrap();
        app.set_filter(TaskFilter::Active);

        let first_visible = app.visible_tasks().iter().next().map(|(index, _)| index);
        assert_eq!(first_visible, Some(1));
        app.toggle_task(1).unwrap();
        assert!(app.store().get(0).unwrap().completed());
        assert!(app.store().get(1).unwrap().completed());
        assert_eq!(app.visible_tasks().count(), 1);
        assert_eq!(app.remaining_label(), "1 tasks remaining");
    }

    #[test]
    fn failed_save_keeps_the_change_in_memory() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let (mut app, problem) = TodoApp::open(blocker.join("tasks.json"));
        assert!(problem.is_none() || matches!(problem, Some(PersistenceError::Read { .. })));

        let err = app.add_task("Buy milk").unwrap_err();
        assert!(matches!(err, TodoError::Persistence(PersistenceError::Write { .. })));
        assert_eq!(app.store().len(), 1);
    }
}
