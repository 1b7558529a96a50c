//! Repository port for workflow persistence and its transactional
//! operations.
//!
//! The multi-record operations (`assign_reviewers`, `complete_review`) and
//! the guarded `update_article` are each one atomic unit: implementations
//! commit every effect of a call or none of them, and the expected-status
//! guard makes a writer that raced a concurrent status change fail instead
//! of double-applying.

use crate::editorial::domain::{
    Article, ArticleId, ArticleSlug, ArticleStatus, JournalId, MemberId, Review, ReviewAttachment,
    ReviewId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workflow repository operations.
pub type WorkflowRepositoryResult<T> = Result<T, WorkflowRepositoryError>;

/// Completed and pending review counts for an article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    /// Number of submitted reviews.
    pub completed: usize,
    /// Number of assigned but not yet submitted reviews.
    pub pending: usize,
}

/// Workflow persistence contract.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Stores a new article.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::DuplicateArticle`] when the
    /// article ID already exists or
    /// [`WorkflowRepositoryError::DuplicateSlug`] when the slug is already
    /// taken within the journal.
    async fn store_article(&self, article: &Article) -> WorkflowRepositoryResult<()>;

    /// Finds an article by identifier.
    ///
    /// Returns `None` when the article does not exist.
    async fn find_article(&self, id: ArticleId) -> WorkflowRepositoryResult<Option<Article>>;

    /// Finds an article by journal and slug.
    ///
    /// Returns `None` when no article carries the slug in the journal.
    async fn find_article_by_slug(
        &self,
        journal_id: JournalId,
        slug: &ArticleSlug,
    ) -> WorkflowRepositoryResult<Option<Article>>;

    /// Persists changes to an existing article, guarded by the status the
    /// caller read before mutating.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::ArticleNotFound`] when the article
    /// does not exist, or [`WorkflowRepositoryError::StatusConflict`] when
    /// the stored status no longer matches `expected_status` (a concurrent
    /// writer won the race).
    async fn update_article(
        &self,
        article: &Article,
        expected_status: ArticleStatus,
    ) -> WorkflowRepositoryResult<()>;

    /// Atomically persists a batch of review assignments together with the
    /// article's transition into review.
    ///
    /// Either every review is created and the article is updated, or
    /// nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::ArticleNotFound`],
    /// [`WorkflowRepositoryError::StatusConflict`] when the stored status no
    /// longer matches `expected_status`, or
    /// [`WorkflowRepositoryError::DuplicateReviewer`] when any reviewer in
    /// the batch already has a review for the article.
    async fn assign_reviewers(
        &self,
        article: &Article,
        expected_status: ArticleStatus,
        reviews: &[Review],
    ) -> WorkflowRepositoryResult<()>;

    /// Atomically persists a completed review, its attachments, and the
    /// increment of the reviewer's completed-review counter.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRepositoryError::ReviewNotFound`] when the review
    /// does not exist, or
    /// [`WorkflowRepositoryError::ReviewAlreadyComplete`] when the stored
    /// review was already submitted.
    async fn complete_review(
        &self,
        review: &Review,
        attachments: &[ReviewAttachment],
    ) -> WorkflowRepositoryResult<()>;

    /// Finds a review by identifier.
    ///
    /// Returns `None` when the review does not exist.
    async fn find_review(&self, id: ReviewId) -> WorkflowRepositoryResult<Option<Review>>;

    /// Returns all reviews for the given article, assignment order.
    async fn reviews_for_article(
        &self,
        article_id: ArticleId,
    ) -> WorkflowRepositoryResult<Vec<Review>>;

    /// Returns all attachments for the given review, upload order.
    async fn attachments_for_review(
        &self,
        review_id: ReviewId,
    ) -> WorkflowRepositoryResult<Vec<ReviewAttachment>>;

    /// Returns completed and pending review counts for the article.
    async fn review_summary(
        &self,
        article_id: ArticleId,
    ) -> WorkflowRepositoryResult<ReviewSummary>;

    /// Returns the reviewer's running completed-review counter.
    async fn completed_review_count(
        &self,
        reviewer: MemberId,
    ) -> WorkflowRepositoryResult<u64>;
}

/// Errors returned by workflow repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkflowRepositoryError {
    /// An article with the same identifier already exists.
    #[error("duplicate article identifier: {0}")]
    DuplicateArticle(ArticleId),

    /// The slug is already taken within the journal.
    #[error("duplicate slug '{slug}' in journal {journal_id}")]
    DuplicateSlug {
        /// Journal the slug collides in.
        journal_id: JournalId,
        /// The colliding slug.
        slug: ArticleSlug,
    },

    /// The reviewer already has a review for the article.
    #[error("reviewer {reviewer} is already assigned to article {article_id}")]
    DuplicateReviewer {
        /// Article the assignment collides on.
        article_id: ArticleId,
        /// The colliding reviewer.
        reviewer: MemberId,
    },

    /// The article was not found.
    #[error("article not found: {0}")]
    ArticleNotFound(ArticleId),

    /// The review was not found.
    #[error("review not found: {0}")]
    ReviewNotFound(ReviewId),

    /// The stored review was already submitted.
    #[error("review {0} has already been submitted")]
    ReviewAlreadyComplete(ReviewId),

    /// The stored article status no longer matches what the caller read.
    #[error("article {article_id} status conflict: expected {expected}, found {actual}")]
    StatusConflict {
        /// Article the conflict occurred on.
        article_id: ArticleId,
        /// Status the caller read before mutating.
        expected: ArticleStatus,
        /// Status found at commit time.
        actual: ArticleStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkflowRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
