use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_USER_ID: &str = "anonymous";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type Rejection = (StatusCode, Json<ErrorBody>);

/// Insertion-ordered store; list returns todos in creation order.
pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn bad_request(message: &str) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), Rejection> {
    if input.title.trim().is_empty() {
        return Err(bad_request("title is required"));
    }
    let now = Utc::now();
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        description: input.description.unwrap_or_default(),
        completed: false,
        user_id: input
            .user_id
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
        created_at: now,
        updated_at: now,
    };
    info!(id = %todo.id, "todo created");
    db.write().await.push(todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, StatusCode> {
    let todos = db.read().await;
    todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, Rejection> {
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(bad_request("title must not be empty"));
    }
    let mut todos = db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "todo not found".to_string(),
            }),
        )
    })?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = description;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    todo.updated_at = Utc::now();
    info!(id = %todo.id, "todo updated");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut todos = db.write().await;
    let index = todos
        .iter()
        .position(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todos.remove(index);
    info!(%id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
