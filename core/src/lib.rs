//! Client core for a hosted todo list: typed API client plus view state.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `TodoApi` pairs the
//! builder with an injected `HttpTransport`; the `view` module models the
//! list and per-item screens on top of it.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Errors are a closed `ApiError` taxonomy callers can match on.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use api::TodoApi;
pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use types::{CreateTodoRequest, Todo, UpdateTodoRequest};
pub use view::{ItemView, ListView, Prompt};
