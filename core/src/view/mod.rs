//! View layer: the list and its rows as plain state machines.
//!
//! Views never perform I/O themselves. The `load`/`create`/`toggle`/`save`/
//! `delete` conveniences drive a `TodoApi` synchronously; hosts that keep
//! several requests in flight use the `begin_*`/`finish_*` halves instead.

pub mod item;
pub mod list;
pub mod prompt;

pub use item::{ItemEvent, ItemMode, ItemView, PendingOp};
pub use list::{Draft, ItemTicket, ListView, LoadState, Stats, Ticket};
pub use prompt::Prompt;
