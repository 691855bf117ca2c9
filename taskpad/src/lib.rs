//! Taskpad -- terminal client library for the task list demo.

pub mod api;
pub mod app;
pub mod config;
pub mod net;
pub mod tasks;
pub mod ui;
