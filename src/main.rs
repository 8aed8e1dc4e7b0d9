use clap::Parser;
use std::io;
use todo_list::config::MenuArgs;
use todo_list::logging::init_logging;
use todo_list::menu::Menu;

fn main() {
    let _args = MenuArgs::parse();
    init_logging();

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout());
    if let Err(err) = menu.run() {
        eprintln!("[simple-todo] terminal error: {err}");
        std::process::exit(1);
    }
}
