//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use todo_core::{ApiError, HttpRequest, HttpResponse, HttpTransport, Prompt, Todo};

/// Records every alert and answers confirmations from a script
/// (defaulting to "yes" once the script runs out).
#[derive(Debug, Default)]
pub struct RecordingPrompt {
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
    pub answers: VecDeque<bool>,
}

impl RecordingPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Prompt for RecordingPrompt {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.answers.pop_front().unwrap_or(true)
    }
}

/// Replays canned responses in order and records every request sent.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn respond_json<T: serde::Serialize>(&self, status: u16, value: &T) -> &Self {
        self.respond(status, serde_json::to_string(value).unwrap())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Transport(message.to_string())));
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
            panic!("unexpected request: {} {}", request.method, request.path)
        })
    }
}

pub fn todo(id: &str, title: &str, completed: bool) -> Todo {
    let created_at: DateTime<Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
    Todo {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        completed,
        user_id: "user123".to_string(),
        created_at,
        updated_at: created_at,
    }
}
