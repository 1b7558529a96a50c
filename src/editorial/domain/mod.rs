//! Domain model for the editorial workflow engine.
//!
//! The editorial domain models the article status state machine, review
//! assignment and completion, editorial decisions, and the notification
//! events those operations announce, while keeping all infrastructure
//! concerns outside of the domain boundary.

mod article;
mod decision;
mod error;
mod ids;
mod notification;
mod review;

pub use article::{
    Article, ArticleStatus, ArticleTitle, DraftArticleParams, PersistedArticleData,
};
pub use decision::EditorialDecision;
pub use error::{EditorialDomainError, ParseArticleStatusError, ParseRecommendationError};
pub use ids::{ArticleId, ArticleSlug, AttachmentId, DepartmentId, JournalId, MemberId, ReviewId};
pub use notification::{NotificationEvent, NotificationKind, NotificationRecipient};
pub use review::{
    AssignReviewParams, AttachmentDescriptor, PersistedAttachmentData, PersistedReviewData,
    Recommendation, Review, ReviewAttachment, ReviewDueDate, ReviewVerdict,
};
