use crate::error::{Result, TodoError};
use crate::types::{Task, TaskFilter, TaskStats};
use tracing::debug;

/// Ordered task list. Insertion order is the only order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, description: &str) -> Result<&Task> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TodoError::validation("task description cannot be empty"));
        }
        self.tasks.push(Task::new(description.to_string()));
        debug!(index = self.tasks.len() - 1, description, "task added");
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn set_completed(&mut self, index: usize, value: bool) -> Result<&Task> {
        let task = self.task_mut(index)?;
        task.set_completed(value);
        debug!(index, completed = value, "task completion set");
        Ok(&*task)
    }

    pub fn mark_completed(&mut self, index: usize) -> Result<&Task> {
        self.set_completed(index, true)
    }

    pub fn mark_active(&mut self, index: usize) -> Result<&Task> {
        self.set_completed(index, false)
    }

    pub fn toggle(&mut self, index: usize) -> Result<&Task> {
        let task = self.task_mut(index)?;
        let value = !task.completed();
        task.set_completed(value);
        debug!(index, completed = value, "task toggled");
        Ok(&*task)
    }

    /// Removes the task at `index`; later tasks shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        debug!(index, description = removed.description(), "task deleted");
        Ok(removed)
    }

    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed());
        let removed = before - self.tasks.len();
        debug!(removed, remaining = self.tasks.len(), "completed tasks cleared");
        removed
    }

    pub fn filter(&self, filter: TaskFilter) -> FilterView<'_> {
        FilterView {
            tasks: &self.tasks,
            filter,
        }
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed()).count()
    }

    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = total - self.active_count();
        TaskStats {
            total,
            completed,
            active: total - completed,
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TodoError::Index {
                index,
                len: self.tasks.len(),
            })
        }
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task> {
        self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }
}

/// Read-only view over the tasks matching a filter. Every call to
/// [`FilterView::iter`] walks the store again.
#[derive(Debug, Clone, Copy)]
pub struct FilterView<'a> {
    tasks: &'a [Task],
    filter: TaskFilter,
}

impl<'a> FilterView<'a> {
    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// Yields each matching task with its index in the unfiltered store.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        let filter = self.filter;
        let tasks: &'a [Task] = self.tasks;
        tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| filter.matches(task))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for FilterView<'a> {
    type Item = (usize, &'a Task);
    type IntoIter = Box<dyn Iterator<Item = (usize, &'a Task)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
