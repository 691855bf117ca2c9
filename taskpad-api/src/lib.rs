//! Shared type definitions for the Taskpad JSON API.

pub mod error;
pub mod greeting;
pub mod task;
