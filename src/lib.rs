//! Colophon: editorial workflow engine for academic manuscript management.
//!
//! This crate provides the core workflow of a departmental journal
//! platform: the state machine governing an article's life from submission
//! through peer review to a final editorial decision, together with the
//! coordinators that drive its transitions and announce them to an
//! external notification transport.
//!
//! # Architecture
//!
//! Colophon follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`editorial`]: The workflow state machine, its coordinators, and
//!   their persistence and notification ports

pub mod editorial;
