//! `PostgreSQL` adapters for editorial workflow persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresWorkflowRepository, WorkflowPgPool};
