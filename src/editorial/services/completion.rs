//! Review-completion handler.
//!
//! Records a single reviewer's verdict, marks the assignment complete, and
//! stores attachments — one atomic repository operation, then one
//! review-completed announcement to the article's editors. Submitting a
//! review never changes the article's status; that is the decision
//! aggregator's responsibility.

use crate::editorial::{
    domain::{
        AttachmentDescriptor, EditorialDomainError, MemberId, NotificationEvent, Recommendation,
        Review, ReviewAttachment, ReviewId, ReviewVerdict,
    },
    ports::{NotificationGateway, WorkflowRepository, WorkflowRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for submitting a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReviewRequest {
    review_id: ReviewId,
    actor: MemberId,
    recommendation: Recommendation,
    comments_to_editor: String,
    comments_to_author: String,
    confidential_comments: Option<String>,
    attachments: Vec<AttachmentDescriptor>,
}

impl SubmitReviewRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        review_id: ReviewId,
        actor: MemberId,
        recommendation: Recommendation,
        comments_to_editor: impl Into<String>,
        comments_to_author: impl Into<String>,
    ) -> Self {
        Self {
            review_id,
            actor,
            recommendation,
            comments_to_editor: comments_to_editor.into(),
            comments_to_author: comments_to_author.into(),
            confidential_comments: None,
            attachments: Vec::new(),
        }
    }

    /// Sets confidential comments visible to editors only.
    #[must_use]
    pub fn with_confidential_comments(mut self, comments: impl Into<String>) -> Self {
        self.confidential_comments = Some(comments.into());
        self
    }

    /// Sets files to attach to the completed review.
    #[must_use]
    pub fn with_attachments(
        mut self,
        attachments: impl IntoIterator<Item = AttachmentDescriptor>,
    ) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }
}

/// Service-level errors for review completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] EditorialDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkflowRepositoryError),
}

/// Result type for review-completion operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Review-completion coordination service.
#[derive(Clone)]
pub struct ReviewCompletionService<R, N, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    K: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifications: Arc<N>,
    clock: Arc<K>,
}

impl<R, N, K> ReviewCompletionService<R, N, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    K: Clock + Send + Sync,
{
    /// Creates a new review-completion service.
    #[must_use]
    pub const fn new(repository: Arc<R>, notifications: Arc<N>, clock: Arc<K>) -> Self {
        Self {
            repository,
            notifications,
            clock,
        }
    }

    /// Submits the review on behalf of the assigned reviewer.
    ///
    /// The verdict, attachments, and the reviewer's completed-review
    /// counter commit as one atomic unit; the editors' notification is
    /// announced after the commit.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the caller is not the assigned reviewer
    /// or the review was already submitted (the first submission's fields
    /// are preserved), or a repository error when persistence fails.
    pub async fn submit_review(&self, request: SubmitReviewRequest) -> CompletionResult<Review> {
        let SubmitReviewRequest {
            review_id,
            actor,
            recommendation,
            comments_to_editor,
            comments_to_author,
            confidential_comments,
            attachments,
        } = request;

        let mut review = self
            .repository
            .find_review(review_id)
            .await?
            .ok_or(WorkflowRepositoryError::ReviewNotFound(review_id))?;
        let article = self
            .repository
            .find_article(review.article_id())
            .await?
            .ok_or(WorkflowRepositoryError::ArticleNotFound(review.article_id()))?;

        let mut verdict = ReviewVerdict::new(recommendation, comments_to_editor, comments_to_author);
        if let Some(comments) = confidential_comments {
            verdict = verdict.with_confidential_comments(comments);
        }
        review.complete_by(actor, verdict, self.clock.as_ref())?;

        let stored_attachments = attachments
            .into_iter()
            .map(|descriptor| {
                ReviewAttachment::for_completed_review(&review, descriptor, self.clock.as_ref())
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.repository
            .complete_review(&review, &stored_attachments)
            .await?;

        self.notifications
            .notify(NotificationEvent::ReviewCompleted {
                review_id: review.id(),
                article_id: article.id(),
                department_id: article.department_id(),
                recommendation,
            })
            .await;

        Ok(review)
    }
}
