//! Line-command front end for [`TodoApp`]. Each line is one user event,
//! answered by a full refresh of the list and the remaining counter.

use crate::app::TodoApp;
use crate::error::TodoError;
use crate::types::TaskFilter;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Filter(TaskFilter),
    ClearCompleted,
    List,
    Stats,
    Help,
    Quit,
}

impl AppCommand {
    /// Task numbers are 1-based on input and converted to store indices.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        match verb.to_lowercase().as_str() {
            "add" => Ok(AppCommand::Add(rest.to_string())),
            "toggle" => parse_number(rest).map(AppCommand::Toggle),
            "delete" | "del" | "rm" => parse_number(rest).map(AppCommand::Delete),
            "filter" => rest
                .parse::<TaskFilter>()
                .map(AppCommand::Filter)
                .map_err(|err| err.to_string()),
            "clear" => Ok(AppCommand::ClearCompleted),
            "list" | "ls" | "" => Ok(AppCommand::List),
            "stats" => Ok(AppCommand::Stats),
            "help" | "?" => Ok(AppCommand::Help),
            "quit" | "exit" | "q" => Ok(AppCommand::Quit),
            other => Err(format!("unknown command '{other}', type 'help' for commands")),
        }
    }
}

fn parse_number(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number - 1),
        _ => Err(format!("'{raw}' is not a task number")),
    }
}

pub struct AppShell<R, W> {
    app: TodoApp,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> AppShell<R, W> {
    pub fn new(app: TodoApp, input: R, output: W) -> Self {
        Self { app, input, output }
    }

    pub fn app(&self) -> &TodoApp {
        &self.app
    }

    pub fn into_parts(self) -> (TodoApp, W) {
        (self.app, self.output)
    }

    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "Warning: {message}")
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "My To-Do List ({})", self.app.data_file().display())?;
        self.refresh()?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let command = match AppCommand::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    self.warn(&message)?;
                    continue;
                }
            };
            if command == AppCommand::Quit {
                return Ok(());
            }
            self.dispatch(command)?;
        }
    }

    fn dispatch(&mut self, command: AppCommand) -> io::Result<()> {
        let outcome = match command {
            AppCommand::Add(description) => self.app.add_task(&description).map(|_| ()),
            AppCommand::Toggle(index) => self.app.toggle_task(index).map(|_| ()),
            AppCommand::Delete(index) => self.app.delete_task(index).map(|_| ()),
            AppCommand::ClearCompleted => self.app.clear_completed().map(|_| ()),
            AppCommand::Filter(filter) => {
                self.app.set_filter(filter);
                Ok(())
            }
            AppCommand::Stats => {
                let stats = self.app.stats();
                writeln!(
                    self.output,
                    "Total: {}  Completed: {}  Active: {}",
                    stats.total, stats.completed, stats.active
                )?;
                return Ok(());
            }
            AppCommand::Help => return self.print_help(),
            AppCommand::List | AppCommand::Quit => Ok(()),
        };
        match outcome {
            Ok(()) => {}
            Err(TodoError::Validation(_)) => self.warn("Please enter a task description!")?,
            Err(TodoError::Index { .. }) => self.warn("No such task.")?,
            Err(err @ TodoError::Persistence(_)) => self.warn(&err.to_string())?,
        }
        self.refresh()
    }

    fn refresh(&mut self) -> io::Result<()> {
        writeln!(self.output, "[{}]", self.app.current_filter())?;
        let view = self.app.visible_tasks();
        if view.is_empty() {
            writeln!(self.output, "  (nothing to show)")?;
        }
        for (index, task) in view.iter() {
            writeln!(self.output, "  {}. {task}  {}", index + 1, task.created_date())?;
        }
        writeln!(self.output, "{}", self.app.remaining_label())
    }

    fn print_help(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Commands:\n  add <text>       Add a task\n  toggle <n>       Flip task n between active and completed\n  delete <n>       Delete task n\n  filter <which>   Show all, active or completed tasks\n  clear            Remove completed tasks\n  list             Show the current view\n  stats            Show task counts\n  quit             Leave"
        )
    }
}
