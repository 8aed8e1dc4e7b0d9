use crate::persistence::DEFAULT_DATA_FILE;
use crate::utils::expand_home;
use clap::Parser;
use std::path::PathBuf;

/// Command-line options for `todo-app`.
#[derive(Debug, Parser)]
#[command(name = "todo-app", version, about = "To-do list kept in a JSON file")]
pub struct AppArgs {
    /// Task file to load and save
    #[arg(short, long, env = "TODO_DATA_FILE", conflicts_with = "state_dir")]
    pub file: Option<String>,

    /// Directory holding tasks.json
    #[arg(long, env = "TODO_STATE_DIR")]
    pub state_dir: Option<String>,
}

impl AppArgs {
    pub fn data_file(&self) -> PathBuf {
        if let Some(file) = non_empty(self.file.as_deref()) {
            return expand_home(file);
        }
        if let Some(dir) = non_empty(self.state_dir.as_deref()) {
            return expand_home(dir).join(DEFAULT_DATA_FILE);
        }
        PathBuf::from(DEFAULT_DATA_FILE)
    }
}

/// Command-line options for `simple-todo`.
#[derive(Debug, Parser)]
#[command(name = "simple-todo", version, about = "Interactive in-memory to-do list")]
pub struct MenuArgs {}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
