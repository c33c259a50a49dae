//! # tasklite
//!
//! Minimal task-management HTTP service backed by SQLite.
//!
//! This library provides:
//! - An HTTP API for creating, listing, updating, and deleting tasks
//! - A `TaskStore` trait with SQLite and in-memory backends
//!
//! ## Request flow
//! 1. Receive a request via the API
//! 2. Parse and validate the payload
//! 3. Issue a single statement against the store
//! 4. Shape the result (or its absence) into a typed response
//!
//! ## Modules
//! - `api`: HTTP routes, handlers, and request/response types
//! - `store`: Task model and storage backends
//! - `config`: environment-based configuration

pub mod api;
pub mod config;
pub mod store;

pub use config::Config;
pub use store::{Task, TaskStore};
