//! Identifier and validated scalar types for the editorial domain.

use super::EditorialDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for an article record.
    ArticleId
}

uuid_id! {
    /// Unique identifier for a review assignment.
    ReviewId
}

uuid_id! {
    /// Unique identifier for a review attachment.
    AttachmentId
}

uuid_id! {
    /// Unique identifier for a platform member (author, reviewer, editor).
    MemberId
}

uuid_id! {
    /// Unique identifier for a department.
    DepartmentId
}

uuid_id! {
    /// Unique identifier for a journal within a department.
    JournalId
}

/// Normalized URL slug for an article, unique within its journal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleSlug(String);

impl ArticleSlug {
    /// Creates a validated slug.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::InvalidSlug`] if the value is empty
    /// after trimming or contains characters outside ASCII alphanumerics,
    /// hyphens, and underscores.
    pub fn new(value: impl Into<String>) -> Result<Self, EditorialDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid = !normalized.is_empty()
            && normalized
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');

        if !is_valid {
            return Err(EditorialDomainError::InvalidSlug(raw));
        }

        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Returns the slug as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArticleSlug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ArticleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
