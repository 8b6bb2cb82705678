//! The list view: owns the local collection and every mutation flow.
//!
//! # Design
//! The collection is authoritative only between loads. Each `begin_load`
//! starts a new generation and every request carries a ticket naming the
//! generation it was issued in. When a response settles:
//!
//! - loads and row updates/deletes from an older generation are dropped;
//! - creates are merged by id instead, so a todo the server did create is
//!   neither lost nor duplicated when a refresh overtakes it. A create that
//!   lands while a load is pending is held until that load succeeds.

use tracing::{debug, info, warn};

use crate::api::TodoApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::types::{CreateTodoRequest, Todo, UpdateTodoRequest};
use crate::view::item::{ItemEvent, ItemView};
use crate::view::prompt::Prompt;

pub const LOAD_FAILED: &str = "Failed to load todos";
pub const CREATE_FAILED: &str = "Failed to create todo";
pub const TITLE_REQUIRED: &str = "Please enter a title for the todo";
pub const CREATED: &str = "Todo created successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready,
}

/// Names the load generation a list-level request was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Same as `Ticket`, for a request issued by one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTicket {
    generation: u64,
    id: String,
}

impl ItemTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Fields of the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub user_id: String,
}

impl Draft {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Build the create payload. A blank user falls back to `default_user_id`.
    pub fn to_request(&self, default_user_id: &str) -> CreateTodoRequest {
        let non_blank = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
        CreateTodoRequest {
            title: self.title.clone(),
            description: non_blank(&self.description),
            user_id: Some(non_blank(&self.user_id).unwrap_or_else(|| default_user_id.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

#[derive(Debug, Clone)]
pub struct ListView {
    rows: Vec<ItemView>,
    state: LoadState,
    generation: u64,
    form_open: bool,
    draft: Draft,
    creating: bool,
    held_creates: Vec<Todo>,
    default_user_id: String,
}

impl ListView {
    /// A list that has not loaded yet; call `load` (or `begin_load`) to
    /// activate it.
    pub fn new(default_user_id: impl Into<String>) -> Self {
        let default_user_id = default_user_id.into();
        Self {
            rows: Vec::new(),
            state: LoadState::Loading,
            generation: 0,
            form_open: false,
            draft: Draft::new(default_user_id.clone()),
            creating: false,
            held_creates: Vec::new(),
            default_user_id,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.default_user_id.clone())
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn rows(&self) -> &[ItemView] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&ItemView> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn todos(&self) -> impl Iterator<Item = &Todo> {
        self.rows.iter().map(ItemView::todo)
    }

    pub fn stats(&self) -> Stats {
        let total = self.rows.len();
        let completed = self.todos().filter(|t| t.completed).count();
        Stats {
            total,
            completed,
            pending: total - completed,
        }
    }

    // ---------------------------------------------------------------------
    // Load / refresh
    // ---------------------------------------------------------------------

    pub fn begin_load(&mut self) -> Ticket {
        self.generation += 1;
        self.state = LoadState::Loading;
        Ticket {
            generation: self.generation,
        }
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Todo>, ApiError>) {
        if ticket.generation != self.generation {
            debug!(stale = ticket.generation, current = self.generation, "dropping superseded load");
            return;
        }
        match result {
            Ok(todos) => {
                self.rows = todos.into_iter().map(ItemView::new).collect();
                for todo in std::mem::take(&mut self.held_creates) {
                    self.append_if_absent(todo);
                }
                self.state = LoadState::Ready;
                debug!(count = self.rows.len(), "todos loaded");
            }
            Err(err) => {
                warn!(error = %err, "loading todos failed");
                self.state = LoadState::Failed(LOAD_FAILED.to_string());
            }
        }
    }

    pub fn load<T: HttpTransport>(&mut self, api: &TodoApi<T>) {
        let ticket = self.begin_load();
        let result = api.list_todos();
        self.finish_load(ticket, result);
    }

    /// Re-run the load, discarding the collection and any open edits.
    pub fn refresh<T: HttpTransport>(&mut self, api: &TodoApi<T>) {
        self.load(api);
    }

    /// The "Try Again" action of the error state.
    pub fn retry<T: HttpTransport>(&mut self, api: &TodoApi<T>) {
        self.load(api);
    }

    // ---------------------------------------------------------------------
    // Create
    // ---------------------------------------------------------------------

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Validate the draft locally. Returns the request to send, or `None`
    /// if a create is already pending or the title is blank.
    pub fn begin_create(&mut self, prompt: &mut dyn Prompt) -> Option<(Ticket, CreateTodoRequest)> {
        if self.creating {
            debug!("create ignored while another is pending");
            return None;
        }
        if self.draft.title.trim().is_empty() {
            prompt.alert(TITLE_REQUIRED);
            return None;
        }
        self.creating = true;
        let ticket = Ticket {
            generation: self.generation,
        };
        Some((ticket, self.draft.to_request(&self.default_user_id)))
    }

    pub fn finish_create(&mut self, ticket: Ticket, result: Result<Todo, ApiError>, prompt: &mut dyn Prompt) {
        self.creating = false;
        match result {
            Ok(todo) => {
                info!(id = %todo.id, "todo created");
                if ticket.generation != self.generation {
                    debug!(id = %todo.id, "create settled after a refresh, merging by id");
                }
                if self.state == LoadState::Ready {
                    self.append_if_absent(todo);
                } else {
                    self.held_creates.push(todo);
                }
                self.draft = Draft::new(self.default_user_id.clone());
                self.form_open = false;
                prompt.alert(CREATED);
            }
            Err(err) => {
                warn!(error = %err, "creating todo failed");
                prompt.alert(CREATE_FAILED);
            }
        }
    }

    pub fn create<T: HttpTransport>(&mut self, api: &TodoApi<T>, prompt: &mut dyn Prompt) {
        if let Some((ticket, request)) = self.begin_create(prompt) {
            let result = api.create_todo(&request);
            self.finish_create(ticket, result, prompt);
        }
    }

    // ---------------------------------------------------------------------
    // Row actions
    // ---------------------------------------------------------------------

    pub fn start_edit(&mut self, id: &str) -> bool {
        self.row_mut(id).is_some_and(ItemView::start_edit)
    }

    pub fn edit_title(&mut self, id: &str, title: impl Into<String>) -> bool {
        self.row_mut(id).is_some_and(|row| row.edit_title(title))
    }

    pub fn edit_description(&mut self, id: &str, description: impl Into<String>) -> bool {
        self.row_mut(id).is_some_and(|row| row.edit_description(description))
    }

    pub fn cancel_edit(&mut self, id: &str) -> bool {
        self.row_mut(id).is_some_and(ItemView::cancel_edit)
    }

    pub fn begin_toggle(&mut self, id: &str) -> Option<(ItemTicket, UpdateTodoRequest)> {
        let request = self.actionable_row(id)?.begin_toggle()?;
        Some((self.item_ticket(id), request))
    }

    pub fn begin_save(&mut self, id: &str) -> Option<(ItemTicket, UpdateTodoRequest)> {
        let request = self.actionable_row(id)?.begin_save()?;
        Some((self.item_ticket(id), request))
    }

    pub fn begin_delete(&mut self, id: &str, prompt: &mut dyn Prompt) -> Option<ItemTicket> {
        let row = self.actionable_row(id)?;
        row.begin_delete(prompt).then(|| self.item_ticket(id))
    }

    pub fn finish_update(&mut self, ticket: ItemTicket, result: Result<Todo, ApiError>, prompt: &mut dyn Prompt) {
        let Some(row) = self.live_row(&ticket) else {
            return;
        };
        if let Some(event) = row.finish_update(result, prompt) {
            self.apply(event);
        }
    }

    pub fn finish_delete(&mut self, ticket: ItemTicket, result: Result<(), ApiError>, prompt: &mut dyn Prompt) {
        let Some(row) = self.live_row(&ticket) else {
            return;
        };
        if let Some(event) = row.finish_delete(result, prompt) {
            self.apply(event);
        }
    }

    pub fn toggle<T: HttpTransport>(&mut self, id: &str, api: &TodoApi<T>, prompt: &mut dyn Prompt) {
        if let Some((ticket, request)) = self.begin_toggle(id) {
            let result = api.update_todo(id, &request);
            self.finish_update(ticket, result, prompt);
        }
    }

    pub fn save<T: HttpTransport>(&mut self, id: &str, api: &TodoApi<T>, prompt: &mut dyn Prompt) {
        if let Some((ticket, request)) = self.begin_save(id) {
            let result = api.update_todo(id, &request);
            self.finish_update(ticket, result, prompt);
        }
    }

    pub fn delete<T: HttpTransport>(&mut self, id: &str, api: &TodoApi<T>, prompt: &mut dyn Prompt) {
        if let Some(ticket) = self.begin_delete(id, prompt) {
            let result = api.delete_todo(id);
            self.finish_delete(ticket, result, prompt);
        }
    }

    /// Apply a row's report: replace by id or remove by id.
    pub fn apply(&mut self, event: ItemEvent) {
        match event {
            ItemEvent::Replaced(todo) => {
                if let Some(row) = self.row_mut(&todo.id) {
                    row.replace(todo);
                }
            }
            ItemEvent::Removed(id) => self.rows.retain(|r| r.id() != id),
        }
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.state {
            LoadState::Loading => out.push_str("Loading todos...\n"),
            LoadState::Failed(message) => {
                out.push_str(&format!("Error: {message}\n[Try Again]\n"));
            }
            LoadState::Ready => self.render_ready(&mut out),
        }
        out
    }

    fn render_ready(&self, out: &mut String) {
        let form_action = if self.form_open { "Cancel" } else { "Add New Todo" };
        out.push_str(&format!("Todo Application\n[{form_action}] [Refresh]\n\n"));

        if self.form_open {
            let submit = if self.creating { "Creating..." } else { "Create Todo" };
            out.push_str("Create New Todo\n");
            out.push_str(&format!("  Title *: {}\n", self.draft.title));
            out.push_str(&format!("  Description: {}\n", self.draft.description));
            out.push_str(&format!("  User ID: {}\n", self.draft.user_id));
            out.push_str(&format!("  [{submit}] [Cancel]\n\n"));
        }

        let stats = self.stats();
        out.push_str(&format!(
            "Total todos: {}\nCompleted: {}\nPending: {}\n\n",
            stats.total, stats.completed, stats.pending
        ));

        if self.rows.is_empty() {
            out.push_str("No todos yet\nCreate your first todo to get started!\n[Create Your First Todo]\n");
            return;
        }
        for (index, row) in self.rows.iter().enumerate() {
            out.push_str(&row.render(index + 1));
        }
    }

    fn row_mut(&mut self, id: &str) -> Option<&mut ItemView> {
        self.rows.iter_mut().find(|r| r.id() == id)
    }

    /// Rows only issue requests while the collection is `Ready`; during a
    /// load they are about to be replaced.
    fn actionable_row(&mut self, id: &str) -> Option<&mut ItemView> {
        if self.state != LoadState::Ready {
            debug!(id, state = ?self.state, "row action ignored until the list is ready");
            return None;
        }
        self.row_mut(id)
    }

    fn live_row(&mut self, ticket: &ItemTicket) -> Option<&mut ItemView> {
        if ticket.generation != self.generation {
            debug!(id = %ticket.id, "dropping response for a row discarded by refresh");
            return None;
        }
        self.row_mut(&ticket.id)
    }

    fn item_ticket(&self, id: &str) -> ItemTicket {
        ItemTicket {
            generation: self.generation,
            id: id.to_string(),
        }
    }

    fn append_if_absent(&mut self, todo: Todo) {
        if self.row(&todo.id).is_none() {
            self.rows.push(ItemView::new(todo));
        }
    }
}
