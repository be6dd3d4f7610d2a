//! The `taskwarden` library crate.
//!
//! This crate contains the core business logic for the taskwarden API:
//! token issuance and verification, the bearer-token middleware and
//! extractor, the owner-scoped task repository, domain models, routing
//! configuration, and error handling. It is used by the main binary
//! (`main.rs`) to construct and run the application.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;

// Re-export key types for easier use of the library crate.
pub use crate::auth::{AuthenticatedUser, Claims, TokenCodec};
pub use crate::error::AppError;
pub use crate::models::{Task, TaskInput, TaskQuery, TaskUpdate};
pub use crate::repository::TaskRepository;
