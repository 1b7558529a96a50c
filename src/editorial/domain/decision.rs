//! Editorial decision value type.

use super::{ArticleStatus, EditorialDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An editor's final categorical ruling on an article under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorialDecision {
    /// Accept the manuscript for publication.
    Accepted,
    /// Request a revised manuscript.
    RevisionRequired,
    /// Reject the manuscript.
    Rejected,
}

impl EditorialDecision {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RevisionRequired => "revision_required",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the article status this decision transitions to.
    #[must_use]
    pub const fn target_status(self) -> ArticleStatus {
        match self {
            Self::Accepted => ArticleStatus::Accepted,
            Self::RevisionRequired => ArticleStatus::RevisionRequired,
            Self::Rejected => ArticleStatus::Rejected,
        }
    }
}

impl fmt::Display for EditorialDecision {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EditorialDecision {
    type Error = EditorialDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "accepted" => Ok(Self::Accepted),
            "revision_required" => Ok(Self::RevisionRequired),
            "rejected" => Ok(Self::Rejected),
            _ => Err(EditorialDomainError::InvalidDecision(value.to_owned())),
        }
    }
}
