//! Terminal front-end for the hosted todo list.
//!
//! Renders the list view to stdout after every command and reads commands
//! from stdin. Logs go to stderr (`RUST_LOG`, default `info`).

use std::io::{self, BufRead, Write};

use todo_core::{ClientConfig, ListView, Prompt, TodoApi};
use todo_term::command::{self, Command};
use todo_term::UreqTransport;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Alerts and confirmations on the terminal itself.
struct StdioPrompt;

impl Prompt for StdioPrompt {
    fn alert(&mut self, message: &str) {
        println!("! {message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        print!("? {message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(_) => false,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = ClientConfig::from_env();
    info!(base_url = %config.base_url, user = %config.default_user_id, "starting todo terminal");

    let api = TodoApi::from_config(&config, UreqTransport::new());
    let mut list = ListView::from_config(&config);
    let mut prompt = StdioPrompt;
    list.load(&api);

    let stdin = io::stdin();
    loop {
        print!("\n{}\n> ", list.render());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => command::apply(cmd, &mut list, &api, &mut prompt),
            Err(command::ParseError::Empty) => {}
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}
