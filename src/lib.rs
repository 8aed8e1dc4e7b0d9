//! Task-list core shared by the `simple-todo` menu and the file-backed `todo-app`.

pub mod app;
pub mod app_shell;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod persistence;
pub mod task_store;
pub mod types;
pub mod utils;

pub use app::TodoApp;
pub use error::{PersistenceError, Result, TodoError};
pub use task_store::{FilterView, TaskStore};
pub use types::{Task, TaskFilter, TaskStats};
