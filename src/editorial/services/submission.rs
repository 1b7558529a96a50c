//! Service layer for manuscript drafting, submission, and revision uploads.

use crate::editorial::{
    domain::{
        Article, ArticleId, ArticleSlug, ArticleTitle, DepartmentId, DraftArticleParams,
        EditorialDomainError, JournalId, MemberId, NotificationEvent,
    },
    ports::{NotificationGateway, WorkflowRepository, WorkflowRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a draft article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftArticleRequest {
    department_id: DepartmentId,
    journal_id: JournalId,
    slug: String,
    title: String,
    author: MemberId,
    co_authors: Vec<MemberId>,
}

impl DraftArticleRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        department_id: DepartmentId,
        journal_id: JournalId,
        slug: impl Into<String>,
        title: impl Into<String>,
        author: MemberId,
    ) -> Self {
        Self {
            department_id,
            journal_id,
            slug: slug.into(),
            title: title.into(),
            author,
            co_authors: Vec::new(),
        }
    }

    /// Sets co-authors.
    #[must_use]
    pub fn with_co_authors(mut self, co_authors: impl IntoIterator<Item = MemberId>) -> Self {
        self.co_authors = co_authors.into_iter().collect();
        self
    }
}

/// Service-level errors for submission operations.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] EditorialDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkflowRepositoryError),
    /// The caller is not the article's primary author.
    #[error("member {member} is not the primary author of article {article_id}")]
    NotPrimaryAuthor {
        /// Article the caller attempted to act on.
        article_id: ArticleId,
        /// Member that attempted the operation.
        member: MemberId,
    },
}

/// Result type for submission service operations.
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Manuscript submission orchestration service.
#[derive(Clone)]
pub struct SubmissionService<R, N, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    K: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifications: Arc<N>,
    clock: Arc<K>,
}

impl<R, N, K> SubmissionService<R, N, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    K: Clock + Send + Sync,
{
    /// Creates a new submission service.
    #[must_use]
    pub const fn new(repository: Arc<R>, notifications: Arc<N>, clock: Arc<K>) -> Self {
        Self {
            repository,
            notifications,
            clock,
        }
    }

    /// Creates and stores a draft article.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] when slug or title validation fails or
    /// the repository rejects persistence.
    pub async fn create_draft(&self, request: DraftArticleRequest) -> SubmissionResult<Article> {
        let slug = ArticleSlug::new(request.slug)?;
        let title = ArticleTitle::new(request.title)?;

        let article = Article::draft(
            DraftArticleParams {
                department_id: request.department_id,
                journal_id: request.journal_id,
                slug,
                title,
                author: request.author,
                co_authors: request.co_authors,
            },
            self.clock.as_ref(),
        );
        self.repository.store_article(&article).await?;
        Ok(article)
    }

    /// Submits a draft for editorial handling and announces the submission
    /// to the author and the department's editors.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::NotPrimaryAuthor`] when `actor` is not the
    /// article's author, or a domain/repository error when the article is
    /// not a draft or persistence fails.
    pub async fn submit(&self, article_id: ArticleId, actor: MemberId) -> SubmissionResult<Article> {
        let mut article = self.find_authored_article(article_id, actor).await?;

        let previous_status = article.status();
        article.submit(self.clock.as_ref())?;
        self.repository
            .update_article(&article, previous_status)
            .await?;

        self.notifications
            .notify(NotificationEvent::SubmissionConfirmation {
                article_id: article.id(),
                department_id: article.department_id(),
                author: article.author(),
            })
            .await;
        self.notifications
            .notify(NotificationEvent::NewSubmissionEditor {
                article_id: article.id(),
                department_id: article.department_id(),
            })
            .await;

        Ok(article)
    }

    /// Records that a revised manuscript supersedes the current one,
    /// incrementing the article's version.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::NotPrimaryAuthor`] when `actor` is not the
    /// article's author, or a domain error when the article is in a terminal
    /// status.
    pub async fn supersede_manuscript(
        &self,
        article_id: ArticleId,
        actor: MemberId,
    ) -> SubmissionResult<Article> {
        let mut article = self.find_authored_article(article_id, actor).await?;

        let current_status = article.status();
        article.supersede_manuscript(self.clock.as_ref())?;
        self.repository
            .update_article(&article, current_status)
            .await?;
        Ok(article)
    }

    async fn find_authored_article(
        &self,
        article_id: ArticleId,
        actor: MemberId,
    ) -> SubmissionResult<Article> {
        let article = self
            .repository
            .find_article(article_id)
            .await?
            .ok_or(WorkflowRepositoryError::ArticleNotFound(article_id))?;
        if actor != article.author() {
            return Err(SubmissionError::NotPrimaryAuthor {
                article_id,
                member: actor,
            });
        }
        Ok(article)
    }
}
