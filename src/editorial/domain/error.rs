//! Error types for editorial domain validation and parsing.

use super::{ArticleId, ArticleStatus, MemberId, ReviewId};
use thiserror::Error;

/// Errors returned while constructing or mutating editorial domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorialDomainError {
    /// The requested status change is not an edge of the transition table.
    #[error("invalid status transition for article {article_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Article whose transition was rejected.
        article_id: ArticleId,
        /// Status the article currently holds.
        from: ArticleStatus,
        /// Status that was requested.
        to: ArticleStatus,
    },

    /// The article slug is empty or contains unsupported characters.
    #[error("invalid article slug '{0}', expected ASCII alphanumerics, hyphens, and underscores")]
    InvalidSlug(String),

    /// The article title is empty after trimming.
    #[error("article title must not be empty")]
    EmptyTitle,

    /// The decision value is not one of accepted, revision_required, rejected.
    #[error("invalid editorial decision: {0}")]
    InvalidDecision(String),

    /// The caller is not the reviewer the review was assigned to.
    #[error("member {member} is not the assigned reviewer for review {review_id}")]
    NotAssignedReviewer {
        /// Review the caller attempted to submit.
        review_id: ReviewId,
        /// Member that attempted the submission.
        member: MemberId,
    },

    /// The review was already submitted; completion is permanent.
    #[error("review {0} has already been submitted")]
    ReviewAlreadyComplete(ReviewId),

    /// Attachments may only be added to a completed review.
    #[error("review {0} must be completed before attachments can be added")]
    AttachmentRequiresCompletedReview(ReviewId),

    /// The attachment's stored-file key is empty.
    #[error("attachment file key must not be empty")]
    EmptyAttachmentKey,

    /// The article is in a terminal status and accepts no further edits.
    #[error("article {article_id} is in terminal status {status}")]
    ArticleInTerminalStatus {
        /// Article that was mutated.
        article_id: ArticleId,
        /// Terminal status the article holds.
        status: ArticleStatus,
    },
}

/// Error returned while parsing article statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown article status: {0}")]
pub struct ParseArticleStatusError(pub String);

/// Error returned while parsing reviewer recommendations from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown recommendation: {0}")]
pub struct ParseRecommendationError(pub String);
