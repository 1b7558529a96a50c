//! Notification events emitted by the workflow coordinators.
//!
//! Events carry identifiers and the minimal payload the transport needs;
//! rendering message content and resolving addresses is the transport's
//! concern, outside this crate.

use super::{ArticleId, DepartmentId, EditorialDecision, MemberId, Recommendation, ReviewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a notification event, matching the transport's template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Confirmation to the author that a submission was received.
    SubmissionConfirmation,
    /// Alert to the department's editors about a new submission.
    NewSubmissionEditor,
    /// Invitation to a reviewer to take on an assignment.
    ReviewInvitation,
    /// Alert to the department's editors that a review was submitted.
    ReviewCompleted,
    /// The editor's decision, addressed to the author.
    EditorialDecision,
    /// Publication announcement, addressed to the author.
    Publication,
}

impl NotificationKind {
    /// Returns the canonical event-kind label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmissionConfirmation => "submission_confirmation",
            Self::NewSubmissionEditor => "new_submission_editor",
            Self::ReviewInvitation => "review_invitation",
            Self::ReviewCompleted => "review_completed",
            Self::EditorialDecision => "editorial_decision",
            Self::Publication => "publication",
        }
    }
}

/// Who an event is addressed to, in identifier form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationRecipient {
    /// A single member.
    Member {
        /// The addressed member.
        member: MemberId,
    },
    /// All editors of a department; the transport resolves the fan-out.
    DepartmentEditors {
        /// The department whose editors are addressed.
        department: DepartmentId,
    },
}

/// A notification event announcing a workflow state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A manuscript was submitted; confirm receipt to the author.
    SubmissionConfirmation {
        /// The submitted article.
        article_id: ArticleId,
        /// Department that owns the article.
        department_id: DepartmentId,
        /// The author to confirm to.
        author: MemberId,
    },
    /// A manuscript was submitted; alert the department's editors.
    NewSubmissionEditor {
        /// The submitted article.
        article_id: ArticleId,
        /// Department whose editors are alerted.
        department_id: DepartmentId,
    },
    /// A reviewer was assigned; invite them.
    ReviewInvitation {
        /// The created review assignment.
        review_id: ReviewId,
        /// The article under review.
        article_id: ArticleId,
        /// Department that owns the article.
        department_id: DepartmentId,
        /// The invited reviewer.
        reviewer: MemberId,
        /// When the review is due.
        due_date: DateTime<Utc>,
        /// Optional message from the editor to the reviewer.
        message: Option<String>,
    },
    /// A review was submitted; alert the article's editors.
    ReviewCompleted {
        /// The completed review.
        review_id: ReviewId,
        /// The article under review.
        article_id: ArticleId,
        /// Department whose editors are alerted.
        department_id: DepartmentId,
        /// The reviewer's recommendation.
        recommendation: Recommendation,
    },
    /// The editor decided; inform the author.
    EditorialDecision {
        /// The decided article.
        article_id: ArticleId,
        /// Department that owns the article.
        department_id: DepartmentId,
        /// The author to inform.
        author: MemberId,
        /// The decision applied.
        decision: EditorialDecision,
        /// Feedback addressed to the author.
        feedback: String,
    },
    /// The article was published; inform the author.
    Publication {
        /// The published article.
        article_id: ArticleId,
        /// Department that owns the article.
        department_id: DepartmentId,
        /// The author to inform.
        author: MemberId,
    },
}

impl NotificationEvent {
    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::SubmissionConfirmation { .. } => NotificationKind::SubmissionConfirmation,
            Self::NewSubmissionEditor { .. } => NotificationKind::NewSubmissionEditor,
            Self::ReviewInvitation { .. } => NotificationKind::ReviewInvitation,
            Self::ReviewCompleted { .. } => NotificationKind::ReviewCompleted,
            Self::EditorialDecision { .. } => NotificationKind::EditorialDecision,
            Self::Publication { .. } => NotificationKind::Publication,
        }
    }

    /// Returns the recipient descriptor.
    #[must_use]
    pub const fn recipient(&self) -> NotificationRecipient {
        match self {
            Self::SubmissionConfirmation { author, .. }
            | Self::EditorialDecision { author, .. }
            | Self::Publication { author, .. } => NotificationRecipient::Member { member: *author },
            Self::ReviewInvitation { reviewer, .. } => NotificationRecipient::Member {
                member: *reviewer,
            },
            Self::NewSubmissionEditor { department_id, .. }
            | Self::ReviewCompleted { department_id, .. } => {
                NotificationRecipient::DepartmentEditors {
                    department: *department_id,
                }
            }
        }
    }

    /// Returns the article the event relates to.
    #[must_use]
    pub const fn article_id(&self) -> ArticleId {
        match self {
            Self::SubmissionConfirmation { article_id, .. }
            | Self::NewSubmissionEditor { article_id, .. }
            | Self::ReviewInvitation { article_id, .. }
            | Self::ReviewCompleted { article_id, .. }
            | Self::EditorialDecision { article_id, .. }
            | Self::Publication { article_id, .. } => *article_id,
        }
    }

    /// Returns the review the event relates to, if any.
    #[must_use]
    pub const fn review_id(&self) -> Option<ReviewId> {
        match self {
            Self::ReviewInvitation { review_id, .. } | Self::ReviewCompleted { review_id, .. } => {
                Some(*review_id)
            }
            Self::SubmissionConfirmation { .. }
            | Self::NewSubmissionEditor { .. }
            | Self::EditorialDecision { .. }
            | Self::Publication { .. } => None,
        }
    }

    /// Returns the department the event relates to.
    #[must_use]
    pub const fn department_id(&self) -> DepartmentId {
        match self {
            Self::SubmissionConfirmation { department_id, .. }
            | Self::NewSubmissionEditor { department_id, .. }
            | Self::ReviewInvitation { department_id, .. }
            | Self::ReviewCompleted { department_id, .. }
            | Self::EditorialDecision { department_id, .. }
            | Self::Publication { department_id, .. } => *department_id,
        }
    }
}
