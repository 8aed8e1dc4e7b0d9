//! Interactive text menu over an in-memory [`TaskStore`].
//!
//! The menu never persists anything; the list lives for one session.

use crate::error::TodoError;
use crate::task_store::TaskStore;
use std::io::{self, BufRead, Write};
use tracing::debug;

const RULE: &str = "------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    MarkCompleted,
    MarkActive,
    Delete,
    Stats,
    Exit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::MarkCompleted),
            "4" => Some(MenuChoice::MarkActive),
            "5" => Some(MenuChoice::Delete),
            "6" => Some(MenuChoice::Stats),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub struct Menu<R, W> {
    store: TaskStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            store: TaskStore::new(),
            input,
            output,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_parts(self) -> (TaskStore, W) {
        (self.store, self.output)
    }

    /// Runs until the user picks exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_header()?;
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice (1-7): ")? else {
                debug!("input closed, leaving menu");
                return Ok(());
            };
            match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_task()?,
                Some(MenuChoice::List) => self.list_tasks()?,
                Some(MenuChoice::MarkCompleted) => {
                    self.act_on_task("Enter task number to mark as completed: ", |store, index| {
                        let task = store.mark_completed(index)?;
                        Ok(format!("Marked task '{}' as completed.", task.description()))
                    })?
                }
                Some(MenuChoice::MarkActive) => {
                    self.act_on_task("Enter task number to mark as active: ", |store, index| {
                        let task = store.mark_active(index)?;
                        Ok(format!("Marked task '{}' as active.", task.description()))
                    })?
                }
                Some(MenuChoice::Delete) => self.act_on_task("Enter task number to delete: ", |store, index| {
                    let task = store.delete(index)?;
                    Ok(format!("Deleted task: {}", task.description()))
                })?,
                Some(MenuChoice::Stats) => self.show_stats()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Thank you for using the To-Do List Application!")?;
                    return Ok(());
                }
                None => writeln!(self.output, "Invalid choice. Please enter a number between 1 and 7.")?,
            }
        }
    }

    fn add_task(&mut self) -> io::Result<()> {
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(());
        };
        match self.store.add(&description) {
            Ok(task) => writeln!(self.output, "Added task: {}", task.description()),
            Err(TodoError::Validation(_)) => writeln!(self.output, "Task description cannot be empty."),
            Err(err) => writeln!(self.output, "{err}"),
        }
    }

    fn list_tasks(&mut self) -> io::Result<()> {
        if self.store.is_empty() {
            return writeln!(self.output, "No tasks in the list.");
        }
        writeln!(self.output, "\nYour To-Do List:")?;
        writeln!(self.output, "{RULE}")?;
        for (index, task) in self.store.tasks().iter().enumerate() {
            writeln!(self.output, "  {}. {task}", index + 1)?;
        }
        writeln!(self.output, "{RULE}")
    }

    /// Lists tasks, asks for a 1-based number and applies `action` to it.
    fn act_on_task<F>(&mut self, question: &str, action: F) -> io::Result<()>
    where
        F: FnOnce(&mut TaskStore, usize) -> Result<String, TodoError>,
    {
        self.list_tasks()?;
        if self.store.is_empty() {
            return Ok(());
        }
        let Some(raw) = self.prompt(question)? else {
            return Ok(());
        };
        let Ok(number) = raw.trim().parse::<i64>() else {
            return writeln!(self.output, "Please enter a valid number.");
        };
        let len = self.store.len();
        // Numbers below 1 never name a task.
        let outcome = number
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .ok_or(TodoError::Index { index: 0, len })
            .and_then(|index| action(&mut self.store, index));
        match outcome {
            Ok(message) => writeln!(self.output, "{message}"),
            Err(TodoError::Index { .. }) => writeln!(self.output, "Invalid task number."),
            Err(err) => writeln!(self.output, "{err}"),
        }
    }

    fn show_stats(&mut self) -> io::Result<()> {
        let stats = self.store.stats();
        writeln!(self.output, "\nTask Statistics:")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Total tasks: {}", stats.total)?;
        writeln!(self.output, "Completed: {}", stats.completed)?;
        writeln!(self.output, "Active: {}", stats.active)?;
        writeln!(self.output, "{RULE}")
    }

    fn print_header(&mut self) -> io::Result<()> {
        writeln!(self.output, "==============================")?;
        writeln!(self.output, "        TO-DO LIST APP")?;
        writeln!(self.output, "==============================")
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nMAIN MENU")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "  1. Add a new task")?;
        writeln!(self.output, "  2. List all tasks")?;
        writeln!(self.output, "  3. Mark task as completed")?;
        writeln!(self.output, "  4. Mark task as active")?;
        writeln!(self.output, "  5. Delete a task")?;
        writeln!(self.output, "  6. Show task statistics")?;
        writeln!(self.output, "  7. Exit")?;
        writeln!(self.output, "{RULE}")
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (TaskStore, String) {
        let mut menu = Menu::new(Cursor::new(script.to_string()), Vec::new());
        menu.run().unwrap();
        let (store, output) = menu.into_parts();
        (store, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parses_only_single_digit_choices() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("12"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn add_mark_and_delete_flow() {
        let script = "1\nBuy milk\n1\nWalk dog\n3\n1\n2\n5\n2\n6\n7\n";
        let (store, output) = run_script(script);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().description(), "Buy milk");
        assert!(store.get(0).unwrap().completed());
        assert!(output.contains("Added task: Walk dog"));
        assert!(output.contains("Marked task 'Buy milk' as completed."));
        assert!(output.contains("  1. [x] Buy milk"));
        assert!(output.contains("Deleted task: Walk dog"));
        assert!(output.contains("Total tasks: 1\nCompleted: 1\nActive: 0"));
        assert!(output.ends_with("Thank you for using the To-Do List Application!\n"));
    }

    #[test]
    fn bad_input_is_reported_and_loop_continues() {
        let script = "9\n1\n   \n1\nBuy milk\n3\nabc\n3\n0\n4\n2\n5\n-3\n6\n7\n";
        let (store, output) = run_script(script);
        assert!(output.contains("Invalid choice. Please enter a number between 1 and 7."));
        assert!(output.contains("Task description cannot be empty."));
        assert!(output.contains("Please enter a valid number."));
        assert_eq!(output.matches("Invalid task number.").count(), 3);
        assert_eq!(store.len(), 1);
        assert!(!store.get(0).unwrap().completed());
    }

    #[test]
    fn empty_list_skips_number_prompt() {
        let (store, output) = run_script("5\n2\n7\n");
        assert!(store.is_empty());
        assert!(!output.contains("Enter task number to delete"));
        assert_eq!(output.matches("No tasks in the list.").count(), 2);
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let (store, output) = run_script("1\nBuy milk\n");
        assert_eq!(store.len(), 1);
        assert!(!output.contains("Thank you"));
    }
}
