//! Department review-policy port.

use crate::editorial::domain::DepartmentId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Review deadline applied when a department has no configured policy.
pub const DEFAULT_REVIEW_DEADLINE_DAYS: u32 = 30;

/// Result type for policy lookups.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Department policy lookup contract.
#[async_trait]
pub trait DepartmentPolicySource: Send + Sync {
    /// Returns the department's review deadline in days, consumed when a
    /// review is assigned without an explicit due date.
    async fn review_deadline_days(&self, department: DepartmentId) -> PolicyResult<u32>;
}

/// Errors returned by policy lookup implementations.
#[derive(Debug, Clone, Error)]
pub enum PolicyError {
    /// The policy source could not be consulted.
    #[error("policy lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl PolicyError {
    /// Wraps a lookup failure.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
