//! Capability-check port.
//!
//! Every mutating coordinator receives an explicit caller identity and asks
//! this port whether the caller holds editor-level capability for a
//! department. Reviewer identity is checked by equality with the review's
//! assigned reviewer and needs no directory lookup.

use crate::editorial::domain::{DepartmentId, MemberId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for capability lookups.
pub type AccessResult<T> = Result<T, AccessDirectoryError>;

/// A member's role within a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits manuscripts.
    Author,
    /// Reviews manuscripts.
    Reviewer,
    /// Assigns reviewers and records decisions.
    Editor,
    /// Administers a department.
    DeptAdmin,
    /// Administers the platform.
    Admin,
}

impl Role {
    /// Returns whether this role grants editor-level capability.
    #[must_use]
    pub const fn grants_editor_capability(self) -> bool {
        matches!(self, Self::Editor | Self::DeptAdmin | Self::Admin)
    }
}

/// Capability lookup contract.
#[async_trait]
pub trait AccessDirectory: Send + Sync {
    /// Returns whether the member holds editor-level capability for the
    /// department.
    async fn holds_editor_capability(
        &self,
        member: MemberId,
        department: DepartmentId,
    ) -> AccessResult<bool>;
}

/// Errors returned by capability lookup implementations.
#[derive(Debug, Clone, Error)]
pub enum AccessDirectoryError {
    /// The directory could not be consulted.
    #[error("capability lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccessDirectoryError {
    /// Wraps a lookup failure.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
