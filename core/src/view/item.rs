//! Per-row view: display/edit state machine for one todo.
//!
//! # Design
//! Every network-triggering action is split in two. `begin_*` checks the row
//! is idle, marks the pending operation and hands back the request payload;
//! `finish_*` consumes the settled result, clears the pending operation and
//! reports what the owning list must do with an `ItemEvent`. Updates are
//! pessimistic: the row's `Todo` only changes when the list applies a
//! `Replaced` event carrying the server's copy.

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::types::{Todo, UpdateTodoRequest};
use crate::view::prompt::Prompt;

pub const UPDATE_FAILED: &str = "Failed to update todo";
pub const DELETE_FAILED: &str = "Failed to delete todo";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this todo?";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMode {
    Display,
    /// Uncommitted local edits.
    Editing { title: String, description: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Toggle,
    Save,
    Delete,
}

/// Mutation a row reports to its list once a request settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Replaced(Todo),
    Removed(String),
}

#[derive(Debug, Clone)]
pub struct ItemView {
    todo: Todo,
    mode: ItemMode,
    pending: Option<PendingOp>,
}

impl ItemView {
    pub fn new(todo: Todo) -> Self {
        Self {
            todo,
            mode: ItemMode::Display,
            pending: None,
        }
    }

    pub fn todo(&self) -> &Todo {
        &self.todo
    }

    pub fn id(&self) -> &str {
        &self.todo.id
    }

    pub fn mode(&self) -> &ItemMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ItemMode::Editing { .. })
    }

    /// True while a request for this row is in flight. All actions are
    /// disabled until it settles.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<PendingOp> {
        self.pending
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.todo.completed {
            "✓ Completed"
        } else {
            "Mark Complete"
        }
    }

    pub(crate) fn replace(&mut self, todo: Todo) {
        self.todo = todo;
    }

    /// Display → Editing, seeded from the current values.
    pub fn start_edit(&mut self) -> bool {
        if self.is_busy() || self.is_editing() {
            return false;
        }
        self.mode = ItemMode::Editing {
            title: self.todo.title.clone(),
            description: self.todo.description.clone(),
        };
        true
    }

    pub fn edit_title(&mut self, value: impl Into<String>) -> bool {
        match &mut self.mode {
            ItemMode::Editing { title, .. } if self.pending.is_none() => {
                *title = value.into();
                true
            }
            _ => false,
        }
    }

    pub fn edit_description(&mut self, value: impl Into<String>) -> bool {
        match &mut self.mode {
            ItemMode::Editing { description, .. } if self.pending.is_none() => {
                *description = value.into();
                true
            }
            _ => false,
        }
    }

    /// Drop local edits without a request.
    pub fn cancel_edit(&mut self) -> bool {
        if self.is_busy() || !self.is_editing() {
            return false;
        }
        self.mode = ItemMode::Display;
        true
    }

    pub fn begin_toggle(&mut self) -> Option<UpdateTodoRequest> {
        if !self.idle_in_display("toggle") {
            return None;
        }
        self.pending = Some(PendingOp::Toggle);
        Some(UpdateTodoRequest::completion(!self.todo.completed))
    }

    pub fn begin_save(&mut self) -> Option<UpdateTodoRequest> {
        if self.is_busy() {
            debug!(id = %self.todo.id, "save ignored while busy");
            return None;
        }
        let ItemMode::Editing { title, description } = &self.mode else {
            return None;
        };
        let request = UpdateTodoRequest::content(title.clone(), description.clone());
        self.pending = Some(PendingOp::Save);
        Some(request)
    }

    /// Ask for confirmation; returns true if the delete request should go out.
    pub fn begin_delete(&mut self, prompt: &mut dyn Prompt) -> bool {
        if !self.idle_in_display("delete") || !prompt.confirm(CONFIRM_DELETE) {
            return false;
        }
        self.pending = Some(PendingOp::Delete);
        true
    }

    pub fn finish_update(
        &mut self,
        result: Result<Todo, ApiError>,
        prompt: &mut dyn Prompt,
    ) -> Option<ItemEvent> {
        let op = self.pending.take();
        match result {
            Ok(todo) => {
                if op == Some(PendingOp::Save) {
                    self.mode = ItemMode::Display;
                }
                Some(ItemEvent::Replaced(todo))
            }
            Err(err) => {
                warn!(id = %self.todo.id, op = ?op, error = %err, "updating todo failed");
                prompt.alert(UPDATE_FAILED);
                None
            }
        }
    }

    pub fn finish_delete(
        &mut self,
        result: Result<(), ApiError>,
        prompt: &mut dyn Prompt,
    ) -> Option<ItemEvent> {
        self.pending = None;
        match result {
            Ok(()) => Some(ItemEvent::Removed(self.todo.id.clone())),
            Err(err) => {
                warn!(id = %self.todo.id, error = %err, "deleting todo failed");
                prompt.alert(DELETE_FAILED);
                None
            }
        }
    }

    pub fn render(&self, number: usize) -> String {
        let mut out = String::new();
        match &self.mode {
            ItemMode::Editing { title, description } => {
                out.push_str(&format!("{number:>3}. [editing] title: {title}\n"));
                out.push_str(&format!("     description: {description}\n"));
                let save = if self.pending == Some(PendingOp::Save) {
                    "Saving..."
                } else {
                    "Save"
                };
                out.push_str(&format!("     {}\n", self.actions(&[save, "Cancel"])));
            }
            ItemMode::Display => {
                let mark = if self.todo.completed { "x" } else { " " };
                out.push_str(&format!(
                    "{number:>3}. [{mark}] {}  ({})\n",
                    self.todo.title,
                    self.todo.created_at.format(DATE_FORMAT)
                ));
                if !self.todo.description.is_empty() {
                    out.push_str(&format!("     {}\n", self.todo.description));
                }
                out.push_str(&format!(
                    "     User: {}  ID: {}\n",
                    self.todo.user_id, self.todo.id
                ));
                out.push_str(&format!(
                    "     {}\n",
                    self.actions(&[self.toggle_label(), "Edit", "Delete"])
                ));
            }
        }
        out
    }

    fn actions(&self, labels: &[&str]) -> String {
        let buttons: Vec<String> = labels.iter().map(|l| format!("[{l}]")).collect();
        let line = buttons.join(" ");
        if self.is_busy() {
            format!("{line} (busy)")
        } else {
            line
        }
    }

    fn idle_in_display(&self, action: &str) -> bool {
        if self.is_busy() {
            debug!(id = %self.todo.id, action, "ignored while busy");
            return false;
        }
        !self.is_editing()
    }
}
