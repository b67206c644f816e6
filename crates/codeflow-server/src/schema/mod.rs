//! Request/response types for the codeflow HTTP API.

pub mod assist;
pub mod run;
pub mod scripts;
