//! One-shot CRUD calls: build, execute through a transport, parse.
//!
//! `TodoApi` is constructed explicitly and handed to the views, so tests
//! can substitute a scripted transport for the network. Failures are logged
//! here once and returned unchanged.

use tracing::{debug, error};

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::{CreateTodoRequest, Todo, UpdateTodoRequest};

#[derive(Debug, Clone)]
pub struct TodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: HttpTransport> TodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn from_config(config: &ClientConfig, transport: T) -> Self {
        Self::new(TodoClient::new(&config.base_url), transport)
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos();
        self.round_trip("list_todos", Ok(request), |c, r| c.parse_list_todos(r))
    }

    pub fn get_todo(&self, id: &str) -> Result<Todo, ApiError> {
        let request = self.client.build_get_todo(id);
        self.round_trip("get_todo", Ok(request), |c, r| c.parse_get_todo(r))
    }

    pub fn create_todo(&self, input: &CreateTodoRequest) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input);
        self.round_trip("create_todo", request, |c, r| c.parse_create_todo(r))
    }

    pub fn update_todo(&self, id: &str, input: &UpdateTodoRequest) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, input);
        self.round_trip("update_todo", request, |c, r| c.parse_update_todo(r))
    }

    pub fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        self.round_trip("delete_todo", Ok(request), |c, r| c.parse_delete_todo(r))
    }

    fn round_trip<R>(
        &self,
        operation: &'static str,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let result = request.and_then(|request| {
            debug!(operation, method = %request.method, path = %request.path, "sending request");
            let response = self.transport.execute(request)?;
            debug!(operation, status = response.status, "received response");
            parse(&self.client, response)
        });
        if let Err(err) = &result {
            error!(operation, error = %err, "todo api call failed");
        }
        result
    }
}
