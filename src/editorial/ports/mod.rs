//! Port contracts for the editorial workflow engine.
//!
//! Ports define infrastructure-agnostic interfaces used by the workflow
//! services: persistence, notification announcement, capability checks, and
//! department policy lookup.

pub mod authorization;
pub mod notification;
pub mod policy;
pub mod repository;

pub use authorization::{AccessDirectory, AccessDirectoryError, AccessResult, Role};
pub use notification::{DeliveryStatus, NotificationGateway};
pub use policy::{DEFAULT_REVIEW_DEADLINE_DAYS, DepartmentPolicySource, PolicyError, PolicyResult};
pub use repository::{
    ReviewSummary, WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult,
};
