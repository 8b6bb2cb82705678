//! Terminal host for the todo list: line commands and a ureq transport.

pub mod command;
pub mod transport;

pub use transport::UreqTransport;
