use clap::Parser;
use std::io;
use todo_list::app_shell::AppShell;
use todo_list::config::AppArgs;
use todo_list::logging::init_logging;
use todo_list::TodoApp;

fn main() {
    let args = AppArgs::parse();
    init_logging();

    let (app, problem) = TodoApp::open(args.data_file());
    let stdin = io::stdin();
    let mut shell = AppShell::new(app, stdin.lock(), io::stdout());
    let result = match problem {
        Some(err) => shell.warn(&format!("{err}; starting with an empty list")),
        None => Ok(()),
    }
    .and_then(|()| shell.run());
    if let Err(err) = result {
        eprintln!("[todo-app] terminal error: {err}");
        std::process::exit(1);
    }
}
