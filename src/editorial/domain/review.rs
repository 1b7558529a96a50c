//! Review aggregate, reviewer recommendations, and review attachments.

use super::{
    ArticleId, AttachmentId, EditorialDomainError, MemberId, ParseRecommendationError, ReviewId,
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reviewer's categorical verdict on a manuscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Publish as-is.
    Accept,
    /// Publish after minor changes.
    MinorRevision,
    /// Substantial rework required.
    MajorRevision,
    /// Do not publish.
    Reject,
}

impl Recommendation {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::MinorRevision => "minor_revision",
            Self::MajorRevision => "major_revision",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Recommendation {
    type Error = ParseRecommendationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "accept" => Ok(Self::Accept),
            "minor_revision" => Ok(Self::MinorRevision),
            "major_revision" => Ok(Self::MajorRevision),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseRecommendationError(value.to_owned())),
        }
    }
}

/// How a review's due date is determined at assignment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDueDate {
    /// An editor-supplied due date.
    Explicit(DateTime<Utc>),
    /// Assignment time plus the owning department's review deadline.
    PolicyDefault {
        /// Department review deadline in days.
        days: u32,
    },
}

/// Parameter object for creating a review assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignReviewParams {
    /// Article under review.
    pub article_id: ArticleId,
    /// Member the review is assigned to.
    pub reviewer: MemberId,
    /// Due-date policy for the assignment.
    pub due: ReviewDueDate,
}

/// A reviewer's submitted verdict and commentary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewVerdict {
    recommendation: Recommendation,
    comments_to_editor: String,
    comments_to_author: String,
    confidential_comments: Option<String>,
}

impl ReviewVerdict {
    /// Creates a verdict with the required commentary fields.
    #[must_use]
    pub fn new(
        recommendation: Recommendation,
        comments_to_editor: impl Into<String>,
        comments_to_author: impl Into<String>,
    ) -> Self {
        Self {
            recommendation,
            comments_to_editor: comments_to_editor.into(),
            comments_to_author: comments_to_author.into(),
            confidential_comments: None,
        }
    }

    /// Attaches confidential comments visible to editors only.
    #[must_use]
    pub fn with_confidential_comments(mut self, comments: impl Into<String>) -> Self {
        self.confidential_comments = Some(comments.into());
        self
    }

    /// Returns the recommendation.
    #[must_use]
    pub const fn recommendation(&self) -> Recommendation {
        self.recommendation
    }
}

/// Parameter object for reconstructing a persisted review aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReviewData {
    /// Persisted review identifier.
    pub id: ReviewId,
    /// Persisted article reference.
    pub article_id: ArticleId,
    /// Persisted reviewer.
    pub reviewer: MemberId,
    /// Persisted assignment timestamp.
    pub assigned_date: DateTime<Utc>,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted completion timestamp, if submitted.
    pub completion_date: Option<DateTime<Utc>>,
    /// Persisted recommendation, if submitted.
    pub recommendation: Option<Recommendation>,
    /// Persisted comments to the editor, if submitted.
    pub comments_to_editor: Option<String>,
    /// Persisted comments to the author, if submitted.
    pub comments_to_author: Option<String>,
    /// Persisted confidential comments, if any.
    pub confidential_comments: Option<String>,
}

/// Review assignment aggregate.
///
/// A review is created once by assignment, mutated exactly once by
/// submission, and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    article_id: ArticleId,
    reviewer: MemberId,
    assigned_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    completion_date: Option<DateTime<Utc>>,
    recommendation: Option<Recommendation>,
    comments_to_editor: Option<String>,
    comments_to_author: Option<String>,
    confidential_comments: Option<String>,
}

impl Review {
    /// Creates a new review assignment.
    ///
    /// The assignment timestamp and a policy-default due date derive from
    /// the same clock reading, so the default due date is exactly
    /// `assigned_date` plus the policy's deadline.
    #[must_use]
    pub fn assign(params: AssignReviewParams, clock: &impl Clock) -> Self {
        let assigned_date = clock.utc();
        let due_date = match params.due {
            ReviewDueDate::Explicit(date) => date,
            ReviewDueDate::PolicyDefault { days } => {
                assigned_date + Duration::days(i64::from(days))
            }
        };

        Self {
            id: ReviewId::new(),
            article_id: params.article_id,
            reviewer: params.reviewer,
            assigned_date,
            due_date,
            completion_date: None,
            recommendation: None,
            comments_to_editor: None,
            comments_to_author: None,
            confidential_comments: None,
        }
    }

    /// Reconstructs a review from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReviewData) -> Self {
        Self {
            id: data.id,
            article_id: data.article_id,
            reviewer: data.reviewer,
            assigned_date: data.assigned_date,
            due_date: data.due_date,
            completion_date: data.completion_date,
            recommendation: data.recommendation,
            comments_to_editor: data.comments_to_editor,
            comments_to_author: data.comments_to_author,
            confidential_comments: data.confidential_comments,
        }
    }

    /// Returns the review identifier.
    #[must_use]
    pub const fn id(&self) -> ReviewId {
        self.id
    }

    /// Returns the article under review.
    #[must_use]
    pub const fn article_id(&self) -> ArticleId {
        self.article_id
    }

    /// Returns the assigned reviewer.
    #[must_use]
    pub const fn reviewer(&self) -> MemberId {
        self.reviewer
    }

    /// Returns the assignment timestamp.
    #[must_use]
    pub const fn assigned_date(&self) -> DateTime<Utc> {
        self.assigned_date
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the completion timestamp, if the review has been submitted.
    #[must_use]
    pub const fn completion_date(&self) -> Option<DateTime<Utc>> {
        self.completion_date
    }

    /// Returns the recommendation, meaningful only once complete.
    #[must_use]
    pub const fn recommendation(&self) -> Option<Recommendation> {
        self.recommendation
    }

    /// Returns the comments addressed to the editor.
    #[must_use]
    pub fn comments_to_editor(&self) -> Option<&str> {
        self.comments_to_editor.as_deref()
    }

    /// Returns the comments addressed to the author.
    #[must_use]
    pub fn comments_to_author(&self) -> Option<&str> {
        self.comments_to_author.as_deref()
    }

    /// Returns the confidential comments visible to editors only.
    #[must_use]
    pub fn confidential_comments(&self) -> Option<&str> {
        self.confidential_comments.as_deref()
    }

    /// Returns whether the review has been submitted. Completion is
    /// permanent.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completion_date.is_some()
    }

    /// Submits the review on behalf of `member`, recording the verdict and
    /// stamping the completion date.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::NotAssignedReviewer`] when `member` is
    /// not the assigned reviewer, or
    /// [`EditorialDomainError::ReviewAlreadyComplete`] when the review has
    /// already been submitted. The review is unchanged in both cases.
    pub fn complete_by(
        &mut self,
        member: MemberId,
        verdict: ReviewVerdict,
        clock: &impl Clock,
    ) -> Result<(), EditorialDomainError> {
        if member != self.reviewer {
            return Err(EditorialDomainError::NotAssignedReviewer {
                review_id: self.id,
                member,
            });
        }
        if self.is_complete() {
            return Err(EditorialDomainError::ReviewAlreadyComplete(self.id));
        }

        self.recommendation = Some(verdict.recommendation);
        self.comments_to_editor = Some(verdict.comments_to_editor);
        self.comments_to_author = Some(verdict.comments_to_author);
        self.confidential_comments = verdict.confidential_comments;
        self.completion_date = Some(clock.utc());
        Ok(())
    }
}

/// Descriptor for a file attached to a completed review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentDescriptor {
    file_key: String,
    description: String,
}

impl AttachmentDescriptor {
    /// Creates a validated attachment descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::EmptyAttachmentKey`] if the stored
    /// file key is empty after trimming.
    pub fn new(
        file_key: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, EditorialDomainError> {
        let key = file_key.into();
        if key.trim().is_empty() {
            return Err(EditorialDomainError::EmptyAttachmentKey);
        }
        Ok(Self {
            file_key: key,
            description: description.into(),
        })
    }
}

/// Parameter object for reconstructing a persisted attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAttachmentData {
    /// Persisted attachment identifier.
    pub id: AttachmentId,
    /// Persisted owning review.
    pub review_id: ReviewId,
    /// Persisted stored-file key.
    pub file_key: String,
    /// Persisted description.
    pub description: String,
    /// Persisted uploader.
    pub uploaded_by: MemberId,
    /// Persisted upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// A file attached to a completed review. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAttachment {
    id: AttachmentId,
    review_id: ReviewId,
    file_key: String,
    description: String,
    uploaded_by: MemberId,
    uploaded_at: DateTime<Utc>,
}

impl ReviewAttachment {
    /// Creates an attachment for a completed review, tagged with the
    /// review's reviewer as uploader.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::AttachmentRequiresCompletedReview`]
    /// when the review has not been submitted.
    pub fn for_completed_review(
        review: &Review,
        descriptor: AttachmentDescriptor,
        clock: &impl Clock,
    ) -> Result<Self, EditorialDomainError> {
        if !review.is_complete() {
            return Err(EditorialDomainError::AttachmentRequiresCompletedReview(
                review.id(),
            ));
        }

        Ok(Self {
            id: AttachmentId::new(),
            review_id: review.id(),
            file_key: descriptor.file_key,
            description: descriptor.description,
            uploaded_by: review.reviewer(),
            uploaded_at: clock.utc(),
        })
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAttachmentData) -> Self {
        Self {
            id: data.id,
            review_id: data.review_id,
            file_key: data.file_key,
            description: data.description,
            uploaded_by: data.uploaded_by,
            uploaded_at: data.uploaded_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owning review.
    #[must_use]
    pub const fn review_id(&self) -> ReviewId {
        self.review_id
    }

    /// Returns the stored-file key.
    #[must_use]
    pub fn file_key(&self) -> &str {
        &self.file_key
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the uploader.
    #[must_use]
    pub const fn uploaded_by(&self) -> MemberId {
        self.uploaded_by
    }

    /// Returns the upload timestamp.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}
