//! Line commands typed at the prompt, and how each one drives the views.

use thiserror::Error;
use todo_core::view::LoadState;
use todo_core::{HttpTransport, ListView, Prompt, TodoApi};

pub const HELP: &str = "\
commands:
  new                    open/close the create form
  title <text>           set the draft title
  desc <text>            set the draft description
  user <text>            set the draft user id
  submit                 create the drafted todo
  toggle <n>             flip completion of row n
  edit <n>               start editing row n
  set-title <n> <text>   change the title being edited
  set-desc <n> <text>    change the description being edited
  save <n>               save row n's edits
  cancel <n>             discard row n's edits
  delete <n>             delete row n (asks first)
  refresh | retry        reload from the server
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleForm,
    DraftTitle(String),
    DraftDescription(String),
    DraftUser(String),
    Submit,
    Toggle(usize),
    Edit(usize),
    EditTitle(usize, String),
    EditDescription(usize, String),
    Save(usize),
    Cancel(usize),
    Delete(usize),
    Refresh,
    Retry,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a row number")]
    MissingRow(&'static str),
    #[error("`{0}` is not a row number")]
    BadRow(String),
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word {
        "" => return Err(ParseError::Empty),
        "new" => Command::ToggleForm,
        "title" => Command::DraftTitle(rest.to_string()),
        "desc" => Command::DraftDescription(rest.to_string()),
        "user" => Command::DraftUser(rest.to_string()),
        "submit" => Command::Submit,
        "toggle" => Command::Toggle(row("toggle", rest)?.0),
        "edit" => Command::Edit(row("edit", rest)?.0),
        "set-title" => {
            let (n, text) = row("set-title", rest)?;
            Command::EditTitle(n, text.to_string())
        }
        "set-desc" => {
            let (n, text) = row("set-desc", rest)?;
            Command::EditDescription(n, text.to_string())
        }
        "save" => Command::Save(row("save", rest)?.0),
        "cancel" => Command::Cancel(row("cancel", rest)?.0),
        "delete" => Command::Delete(row("delete", rest)?.0),
        "refresh" => Command::Refresh,
        "retry" => Command::Retry,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Split `"<n> rest..."` into a 1-based row number and the remaining text.
fn row<'a>(command: &'static str, args: &'a str) -> Result<(usize, &'a str), ParseError> {
    let (number, text) = match args.split_once(char::is_whitespace) {
        Some((number, text)) => (number, text.trim()),
        None => (args, ""),
    };
    if number.is_empty() {
        return Err(ParseError::MissingRow(command));
    }
    match number.parse::<usize>() {
        Ok(n) if n > 0 => Ok((n, text)),
        _ => Err(ParseError::BadRow(number.to_string())),
    }
}

/// Run one command against the list. `Quit` is handled by the caller.
pub fn apply<T: HttpTransport>(
    command: Command,
    list: &mut ListView,
    api: &TodoApi<T>,
    prompt: &mut dyn Prompt,
) {
    match command {
        Command::ToggleForm => list.toggle_form(),
        Command::DraftTitle(text) => list.draft_mut().title = text,
        Command::DraftDescription(text) => list.draft_mut().description = text,
        Command::DraftUser(text) => list.draft_mut().user_id = text,
        Command::Submit if list.state() == &LoadState::Ready && list.is_form_open() => {
            list.create(api, prompt)
        }
        Command::Submit => println!("open the form with `new` first"),
        Command::Refresh => list.refresh(api),
        Command::Retry => list.retry(api),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
        Command::Toggle(n) => with_row(list, n, |list, id| list.toggle(id, api, prompt)),
        Command::Edit(n) => with_row(list, n, |list, id| {
            list.start_edit(id);
        }),
        Command::EditTitle(n, text) => with_row(list, n, |list, id| {
            list.edit_title(id, text);
        }),
        Command::EditDescription(n, text) => with_row(list, n, |list, id| {
            list.edit_description(id, text);
        }),
        Command::Save(n) => with_row(list, n, |list, id| list.save(id, api, prompt)),
        Command::Cancel(n) => with_row(list, n, |list, id| {
            list.cancel_edit(id);
        }),
        Command::Delete(n) => with_row(list, n, |list, id| list.delete(id, api, prompt)),
    }
}

/// Row commands only reach rows that are on screen, i.e. once the list is ready.
fn with_row(list: &mut ListView, number: usize, action: impl FnOnce(&mut ListView, &str)) {
    if list.state() != &LoadState::Ready {
        println!("the list is not loaded (try `retry`)");
        return;
    }
    let Some(id) = list.rows().get(number - 1).map(|row| row.id().to_string()) else {
        println!("no todo #{number}");
        return;
    };
    action(list, &id);
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use todo_core::{ApiError, HttpRequest, HttpResponse, Todo, TodoClient};

    use super::*;

    /// Fails the test if any request is sent.
    struct Silent;

    impl HttpTransport for Silent {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            panic!("unexpected request: {} {}", request.method, request.path)
        }
    }

    struct Yes;

    impl Prompt for Yes {
        fn alert(&mut self, _message: &str) {}

        fn confirm(&mut self, _message: &str) -> bool {
            true
        }
    }

    fn api() -> TodoApi<Silent> {
        TodoApi::new(TodoClient::new("http://svc"), Silent)
    }

    fn todo(id: &str) -> Todo {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        Todo {
            id: id.to_string(),
            title: "A".to_string(),
            description: String::new(),
            completed: false,
            user_id: "user123".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn submit_needs_an_open_form() {
        let mut list = ListView::new("user123");
        let ticket = list.begin_load();
        list.finish_load(ticket, Ok(Vec::new()));
        list.draft_mut().title = "B".to_string();

        apply(Command::Submit, &mut list, &api(), &mut Yes);
        assert!(!list.is_creating());
    }

    #[test]
    fn submit_and_row_commands_wait_for_a_loaded_list() {
        let mut list = ListView::new("user123");
        let ticket = list.begin_load();
        list.finish_load(ticket, Ok(vec![todo("1")]));
        let ticket = list.begin_load();
        list.finish_load(ticket, Err(ApiError::Transport("down".to_string())));
        list.open_form();
        list.draft_mut().title = "B".to_string();

        for command in [Command::Submit, Command::Toggle(1), Command::Delete(1), Command::Edit(1)] {
            apply(command, &mut list, &api(), &mut Yes);
        }
        assert!(!list.rows()[0].is_editing());
        assert!(!list.is_creating());
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse("new"), Ok(Command::ToggleForm));
        assert_eq!(parse("  submit \n"), Ok(Command::Submit));
        assert_eq!(parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn draft_text_keeps_inner_spaces() {
        assert_eq!(
            parse("title Buy  oat milk "),
            Ok(Command::DraftTitle("Buy  oat milk".to_string()))
        );
        assert_eq!(parse("desc"), Ok(Command::DraftDescription(String::new())));
    }

    #[test]
    fn row_commands_need_positive_numbers() {
        assert_eq!(parse("toggle 2"), Ok(Command::Toggle(2)));
        assert_eq!(parse("delete"), Err(ParseError::MissingRow("delete")));
        assert_eq!(parse("save 0"), Err(ParseError::BadRow("0".to_string())));
        assert_eq!(parse("edit x"), Err(ParseError::BadRow("x".to_string())));
    }

    #[test]
    fn edit_commands_carry_text() {
        assert_eq!(
            parse("set-title 3 Call mom"),
            Ok(Command::EditTitle(3, "Call mom".to_string()))
        );
        assert_eq!(parse("set-desc 1"), Ok(Command::EditDescription(1, String::new())));
    }

    #[test]
    fn unknown_and_empty_input() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("frobnicate 1"), Err(ParseError::Unknown("frobnicate".to_string())));
    }
}
