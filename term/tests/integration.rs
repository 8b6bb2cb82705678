//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation and the main view flows over real HTTP through `UreqTransport`.
//! Validates that request building and response parsing agree with the
//! actual server, and that 4xx/5xx come back as data for the client to map.

use todo_core::view::list::CREATED;
use todo_core::view::LoadState;
use todo_core::{ApiError, CreateTodoRequest, ListView, Prompt, TodoApi, TodoClient, UpdateTodoRequest};
use todo_term::command::{self, Command};
use todo_term::UreqTransport;

/// Says yes to every confirmation and keeps the alerts.
#[derive(Default)]
struct Agreeable {
    alerts: Vec<String>,
}

impl Prompt for Agreeable {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Start the mock server on a random port and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn crud_lifecycle() {
    let api = TodoApi::new(TodoClient::new(&spawn_server()), UreqTransport::new());

    // Step 1: list: should be empty.
    let todos = api.list_todos().unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create a todo.
    let created = api
        .create_todo(&CreateTodoRequest {
            title: "Integration test".to_string(),
            description: Some("over real HTTP".to_string()),
            user_id: Some("user123".to_string()),
        })
        .unwrap();
    assert_eq!(created.title, "Integration test");
    assert_eq!(created.description, "over real HTTP");
    assert_eq!(created.user_id, "user123");
    assert!(!created.completed);
    assert!(!created.id.is_empty());
    let id = created.id.clone();

    // Step 3: get the created todo.
    let fetched = api.get_todo(&id).unwrap();
    assert_eq!(fetched, created);

    // Step 4: update title only.
    let updated = api
        .update_todo(
            &id,
            &UpdateTodoRequest {
                title: Some("Updated title".to_string()),
                ..UpdateTodoRequest::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Updated title");
    assert_eq!(updated.description, "over real HTTP");
    assert!(!updated.completed);
    assert_eq!(updated.created_at, created.created_at);

    // Step 5: update completed.
    let updated = api.update_todo(&id, &UpdateTodoRequest::completion(true)).unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(updated.completed);

    // Step 6: list: should have one item.
    assert_eq!(api.list_todos().unwrap().len(), 1);

    // Step 7: delete.
    api.delete_todo(&id).unwrap();

    // Step 8: get after delete: should be NotFound.
    let err = api.get_todo(&id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 9: delete again: should be NotFound.
    let err = api.delete_todo(&id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: blank title is rejected by the server.
    let err = api
        .create_todo(&CreateTodoRequest {
            title: "  ".to_string(),
            ..CreateTodoRequest::default()
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation { status: 400, .. }));

    // Step 11: list: should be empty again.
    assert!(api.list_todos().unwrap().is_empty(), "expected empty list after delete");
}

#[test]
fn view_flows_against_live_server() {
    let api = TodoApi::new(TodoClient::new(&spawn_server()), UreqTransport::new());
    let mut prompt = Agreeable::default();
    let mut list = ListView::new("user123");

    list.load(&api);
    assert_eq!(list.state(), &LoadState::Ready);
    assert!(list.render().contains("No todos yet"));

    for title in ["A", "B"] {
        list.open_form();
        list.draft_mut().title = title.to_string();
        list.create(&api, &mut prompt);
    }
    let titles: Vec<&str> = list.todos().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);
    let first = list.rows()[0].id().to_string();
    let second = list.rows()[1].id().to_string();

    list.toggle(&first, &api, &mut prompt);
    assert!(list.row(&first).unwrap().todo().completed);

    list.start_edit(&second);
    list.edit_description(&second, "described");
    list.save(&second, &api, &mut prompt);
    assert_eq!(list.row(&second).unwrap().todo().description, "described");

    list.delete(&first, &api, &mut prompt);
    assert!(list.row(&first).is_none());

    // A refresh agrees with the locally reconciled collection.
    let local: Vec<_> = list.todos().cloned().collect();
    list.refresh(&api);
    let remote: Vec<_> = list.todos().cloned().collect();
    assert_eq!(local, remote);
    assert_eq!(list.stats().total, 1);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let api = TodoApi::new(TodoClient::new(&format!("http://{addr}")), UreqTransport::new());
    let err = api.list_todos().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn commands_drive_the_list_over_http() {
    let api = TodoApi::new(TodoClient::new(&spawn_server()), UreqTransport::default());
    let mut prompt = Agreeable::default();
    let mut list = ListView::new("user123");
    list.load(&api);

    for line in ["new", "title Water plants", "user  ", "submit", "toggle 1"] {
        let cmd = command::parse(line).unwrap();
        command::apply(cmd, &mut list, &api, &mut prompt);
    }
    let row = &list.rows()[0];
    assert_eq!(row.todo().title, "Water plants");
    assert_eq!(row.todo().user_id, "user123");
    assert!(row.todo().completed);
    assert_eq!(prompt.alerts, [CREATED]);

    command::apply(Command::Delete(1), &mut list, &api, &mut prompt);
    assert!(list.rows().is_empty());
    assert!(api.list_todos().unwrap().is_empty());
}
