//! Editorial workflow engine for Colophon.
//!
//! This module implements the article status state machine and the
//! coordinators that drive its transitions: manuscript submission, reviewer
//! assignment, review completion, editorial decisions, and publication.
//! Every mutation validates its transition against the canonical table,
//! commits as one atomic repository operation, and announces the change
//! through the notification port as a fire-and-forget side effect. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
