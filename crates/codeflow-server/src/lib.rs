//! HTTP/JSON API over the codeflow script store, execution simulator, console
//! log and AI collaborators.
//!
//! This crate contains the server configuration, application state, API
//! schema types, error handling and route definitions. Handlers are thin:
//! they lock state, delegate to the core crates and serialize the result.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
