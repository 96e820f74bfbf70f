// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod app;
pub mod chat;
pub mod config;
pub mod lookup;
pub mod panel;
pub mod protocol;
pub mod tui;
