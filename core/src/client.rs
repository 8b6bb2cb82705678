//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The round trip itself belongs to an `HttpTransport` (see `TodoApi`).
//!
//! Any 2xx status counts as success. 404 is always `NotFound`; 400 and 422
//! on create are `Validation`; every other non-2xx is `Server`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodoRequest, Todo, UpdateTodoRequest};

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url(), None)
    }

    pub fn build_get_todo(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(id), None)
    }

    pub fn build_create_todo(&self, input: &CreateTodoRequest) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Post, self.collection_url(), Some(body)))
    }

    pub fn build_update_todo(&self, id: &str, input: &UpdateTodoRequest) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Put, self.item_url(id), Some(body)))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        if matches!(response.status, 400 | 422) {
            return Err(ApiError::Validation {
                status: response.status,
                body: response.body,
            });
        }
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/todos/{}", self.base_url, urlencoding::encode(id))
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let headers = match body {
            Some(_) => vec![(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())],
            None => Vec::new(),
        };
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
