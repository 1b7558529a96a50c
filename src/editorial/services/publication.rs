//! Publication service: publishing accepted articles and retracting
//! published ones.

use crate::editorial::{
    domain::{Article, ArticleId, DepartmentId, EditorialDomainError, MemberId, NotificationEvent},
    ports::{
        AccessDirectory, AccessDirectoryError, NotificationGateway, WorkflowRepository,
        WorkflowRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for publication operations.
#[derive(Debug, Error)]
pub enum PublicationError {
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
        /// Member that attempted the operation.
        member: MemberId,
        /// Department the capability was checked against.
        department: DepartmentId,
    },
}

/// Result type for publication operations.
pub type PublicationResult<T> = Result<T, PublicationError>;

/// Publication coordination service.
#[derive(Clone)]
pub struct PublicationService<R, N, A, K>
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

impl<R, N, A, K> PublicationService<R, N, A, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    A: AccessDirectory,
    K: Clock + Send + Sync,
{
    /// Creates a new publication service.
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

    /// Publishes an accepted article, stamping the publication date, and
    /// announces the publication to the author.
    ///
    /// # Errors
    ///
    /// Returns [`PublicationError::Unauthorized`] when the caller lacks
    /// editor capability, a domain error when the article has not been
    /// accepted, or a repository error when persistence fails.
    pub async fn publish(
        &self,
        article_id: ArticleId,
        actor: MemberId,
    ) -> PublicationResult<Article> {
        let mut article = self.find_authorized(article_id, actor).await?;

        let previous_status = article.status();
        article.publish(self.clock.as_ref())?;
        self.repository
            .update_article(&article, previous_status)
            .await?;

        self.notifications
            .notify(NotificationEvent::Publication {
                article_id: article.id(),
                department_id: article.department_id(),
                author: article.author(),
            })
            .await;

        Ok(article)
    }

    /// Retracts a published article.
    ///
    /// # Errors
    ///
    /// Returns [`PublicationError::Unauthorized`] when the caller lacks
    /// editor capability, a domain error when the article is not published,
    /// or a repository error when persistence fails.
    pub async fn retract(
        &self,
        article_id: ArticleId,
        actor: MemberId,
    ) -> PublicationResult<Article> {
        let mut article = self.find_authorized(article_id, actor).await?;

        let previous_status = article.status();
        article.retract(self.clock.as_ref())?;
        self.repository
            .update_article(&article, previous_status)
            .await?;
        Ok(article)
    }

    async fn find_authorized(
        &self,
        article_id: ArticleId,
        actor: MemberId,
    ) -> PublicationResult<Article> {
        let article = self
            .repository
            .find_article(article_id)
            .await?
            .ok_or(WorkflowRepositoryError::ArticleNotFound(article_id))?;

        let department = article.department_id();
        if !self
            .access
            .holds_editor_capability(actor, department)
            .await?
        {
            return Err(PublicationError::Unauthorized {
                member: actor,
                department,
            });
        }
        Ok(article)
    }
}
