//! Taskpad backend library.
//!
//! Exposes the HTTP server for use in tests and embedding. The server
//! keeps the task collection in memory and serves the JSON API the
//! Taskpad client consumes.

pub mod config;
pub mod http;
pub mod store;
