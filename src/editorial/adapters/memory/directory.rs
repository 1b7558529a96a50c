//! In-memory capability directory and department policy source.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::editorial::{
    domain::{DepartmentId, MemberId},
    ports::{
        AccessDirectory, AccessDirectoryError, AccessResult, DEFAULT_REVIEW_DEADLINE_DAYS,
        DepartmentPolicySource, PolicyError, PolicyResult, Role,
    },
};

/// Thread-safe in-memory role directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccessDirectory {
    roles: Arc<RwLock<HashMap<(MemberId, DepartmentId), Role>>>,
}

impl InMemoryAccessDirectory {
    /// Creates an empty directory; every lookup answers `false`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a member's role within a department.
    pub fn assign_role(&self, member: MemberId, department: DepartmentId, role: Role) {
        if let Ok(mut roles) = self.roles.write() {
            roles.insert((member, department), role);
        }
    }
}

#[async_trait]
impl AccessDirectory for InMemoryAccessDirectory {
    async fn holds_editor_capability(
        &self,
        member: MemberId,
        department: DepartmentId,
    ) -> AccessResult<bool> {
        let roles = self.roles.read().map_err(|err| {
            AccessDirectoryError::lookup(std::io::Error::other(err.to_string()))
        })?;
        Ok(roles
            .get(&(member, department))
            .is_some_and(|role| role.grants_editor_capability()))
    }
}

/// Thread-safe in-memory department policy source.
///
/// Departments without a configured deadline fall back to
/// [`DEFAULT_REVIEW_DEADLINE_DAYS`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDepartmentPolicies {
    deadlines: Arc<RwLock<HashMap<DepartmentId, u32>>>,
}

impl InMemoryDepartmentPolicies {
    /// Creates a policy source with only the default deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures a department's review deadline in days.
    pub fn set_review_deadline_days(&self, department: DepartmentId, days: u32) {
        if let Ok(mut deadlines) = self.deadlines.write() {
            deadlines.insert(department, days);
        }
    }
}

#[async_trait]
impl DepartmentPolicySource for InMemoryDepartmentPolicies {
    async fn review_deadline_days(&self, department: DepartmentId) -> PolicyResult<u32> {
        let deadlines = self
            .deadlines
            .read()
            .map_err(|err| PolicyError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(deadlines
            .get(&department)
            .copied()
            .unwrap_or(DEFAULT_REVIEW_DEADLINE_DAYS))
    }
}
