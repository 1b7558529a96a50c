//! Decision aggregator.
//!
//! Applies an editor's final decision to an article under review. Completed
//! and pending review counts are available beforehand through the read-only
//! summary but are not enforced as a gate: an editor may decide while
//! reviews are still pending.

use crate::editorial::{
    domain::{
        Article, ArticleId, DepartmentId, EditorialDecision, EditorialDomainError, MemberId,
        NotificationEvent,
    },
    ports::{
        AccessDirectory, AccessDirectoryError, NotificationGateway, ReviewSummary,
        WorkflowRepository, WorkflowRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for recording an editorial decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecisionRequest {
    article_id: ArticleId,
    actor: MemberId,
    decision: EditorialDecision,
    feedback: String,
}

impl RecordDecisionRequest {
    /// Creates a request with the decision and feedback addressed to the
    /// author.
    #[must_use]
    pub fn new(
        article_id: ArticleId,
        actor: MemberId,
        decision: EditorialDecision,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            article_id,
            actor,
            decision,
            feedback: feedback.into(),
        }
    }
}

/// Service-level errors for editorial decisions.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] EditorialDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkflowRepositoryError),
    /// Capability lookup failed.
    #[error(transparent)]
    Access(#[from] AccessDirectoryError),
    /// The caller lacks editor capability for the article's department.
    #[error("member {member} lacks editor capability for department {department}")]
    Unauthorized {
        /// Member that attempted the decision.
        member: MemberId,
        /// Department the capability was checked against.
        department: DepartmentId,
    },
}

/// Result type for editorial-decision operations.
pub type DecisionResult<T> = Result<T, DecisionError>;

/// Editorial-decision coordination service.
#[derive(Clone)]
pub struct EditorialDecisionService<R, N, A, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    A: AccessDirectory,
    K: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifications: Arc<N>,
    access: Arc<A>,
    clock: Arc<K>,
}

impl<R, N, A, K> EditorialDecisionService<R, N, A, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    A: AccessDirectory,
    K: Clock + Send + Sync,
{
    /// Creates a new editorial-decision service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        notifications: Arc<N>,
        access: Arc<A>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            repository,
            notifications,
            access,
            clock,
        }
    }

    /// Records the editor's decision on an article under review.
    ///
    /// An accepted decision stamps the acceptance date. The status change
    /// commits under an expected-status guard, so of two editors deciding
    /// simultaneously the second observes the updated status and fails
    /// instead of double-applying. The author's notification carries the
    /// feedback and is announced after the commit.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError::Unauthorized`] when the caller lacks editor
    /// capability, a domain error when the article is not under review, or
    /// a repository error when persistence fails.
    pub async fn record_decision(&self, request: RecordDecisionRequest) -> DecisionResult<Article> {
        let mut article = self.find_article(request.article_id).await?;

        let department = article.department_id();
        self.ensure_editor(request.actor, department).await?;

        let previous_status = article.status();
        article.apply_decision(request.decision, self.clock.as_ref())?;
        self.repository
            .update_article(&article, previous_status)
            .await?;

        self.notifications
            .notify(NotificationEvent::EditorialDecision {
                article_id: article.id(),
                department_id: department,
                author: article.author(),
                decision: request.decision,
                feedback: request.feedback,
            })
            .await;

        Ok(article)
    }

    /// Returns completed and pending review counts for the article, for
    /// the editor's consideration before deciding.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError::Unauthorized`] when the caller lacks editor
    /// capability, or a repository error when the lookup fails.
    pub async fn review_summary(
        &self,
        article_id: ArticleId,
        actor: MemberId,
    ) -> DecisionResult<ReviewSummary> {
        let article = self.find_article(article_id).await?;
        self.ensure_editor(actor, article.department_id()).await?;
        Ok(self.repository.review_summary(article_id).await?)
    }

    async fn find_article(&self, article_id: ArticleId) -> DecisionResult<Article> {
        let article = self
            .repository
            .find_article(article_id)
            .await?
            .ok_or(WorkflowRepositoryError::ArticleNotFound(article_id))?;
        Ok(article)
    }

    async fn ensure_editor(
        &self,
        member: MemberId,
        department: DepartmentId,
    ) -> DecisionResult<()> {
        if self
            .access
            .holds_editor_capability(member, department)
            .await?
        {
            return Ok(());
        }
        Err(DecisionError::Unauthorized { member, department })
    }
}
