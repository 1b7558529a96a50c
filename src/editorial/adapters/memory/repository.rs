//! In-memory workflow repository for service and invariant tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::editorial::{
    domain::{
        Article, ArticleId, ArticleSlug, ArticleStatus, JournalId, MemberId, Review,
        ReviewAttachment, ReviewId,
    },
    ports::{ReviewSummary, WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult},
};

/// Thread-safe in-memory workflow repository.
///
/// Each port method takes the write lock once, validates everything, and
/// only then mutates, so a failed call leaves no partial state behind.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowRepository {
    state: Arc<RwLock<InMemoryWorkflowState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkflowState {
    articles: HashMap<ArticleId, Article>,
    slug_index: HashMap<(JournalId, String), ArticleId>,
    reviews: HashMap<ReviewId, Review>,
    article_reviews: HashMap<ArticleId, Vec<ReviewId>>,
    reviewer_index: HashSet<(ArticleId, MemberId)>,
    attachments: HashMap<ReviewId, Vec<ReviewAttachment>>,
    completed_counts: HashMap<MemberId, u64>,
}

impl InMemoryWorkflowRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_key(article: &Article) -> (JournalId, String) {
    (article.journal_id(), article.slug().as_str().to_owned())
}

fn check_article_status(
    state: &InMemoryWorkflowState,
    article_id: ArticleId,
    expected_status: ArticleStatus,
) -> WorkflowRepositoryResult<()> {
    let stored = state
        .articles
        .get(&article_id)
        .ok_or(WorkflowRepositoryError::ArticleNotFound(article_id))?;
    if stored.status() != expected_status {
        return Err(WorkflowRepositoryError::StatusConflict {
            article_id,
            expected: expected_status,
            actual: stored.status(),
        });
    }
    Ok(())
}

type LockedState<'a> = std::sync::RwLockWriteGuard<'a, InMemoryWorkflowState>;

fn write_lock(
    state: &Arc<RwLock<InMemoryWorkflowState>>,
) -> WorkflowRepositoryResult<LockedState<'_>> {
    state
        .write()
        .map_err(|err| WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string())))
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn store_article(&self, article: &Article) -> WorkflowRepositoryResult<()> {
        let mut state = write_lock(&self.state)?;
        if state.articles.contains_key(&article.id()) {
            return Err(WorkflowRepositoryError::DuplicateArticle(article.id()));
        }

        let key = slug_key(article);
        if state.slug_index.contains_key(&key) {
            return Err(WorkflowRepositoryError::DuplicateSlug {
                journal_id: article.journal_id(),
                slug: article.slug().clone(),
            });
        }

        state.slug_index.insert(key, article.id());
        state.articles.insert(article.id(), article.clone());
        Ok(())
    }

    async fn find_article(&self, id: ArticleId) -> WorkflowRepositoryResult<Option<Article>> {
        let state = self.state.read().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.articles.get(&id).cloned())
    }

    async fn find_article_by_slug(
        &self,
        journal_id: JournalId,
        slug: &ArticleSlug,
    ) -> WorkflowRepositoryResult<Option<Article>> {
        let state = self.state.read().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let article = state
            .slug_index
            .get(&(journal_id, slug.as_str().to_owned()))
            .and_then(|article_id| state.articles.get(article_id))
            .cloned();
        Ok(article)
    }

    async fn update_article(
        &self,
        article: &Article,
        expected_status: ArticleStatus,
    ) -> WorkflowRepositoryResult<()> {
        let mut state = write_lock(&self.state)?;
        check_article_status(&state, article.id(), expected_status)?;
        state.articles.insert(article.id(), article.clone());
        Ok(())
    }

    async fn assign_reviewers(
        &self,
        article: &Article,
        expected_status: ArticleStatus,
        reviews: &[Review],
    ) -> WorkflowRepositoryResult<()> {
        let mut state = write_lock(&self.state)?;
        check_article_status(&state, article.id(), expected_status)?;

        // Validate the whole batch before touching anything.
        let mut batch_reviewers: HashSet<MemberId> = HashSet::new();
        for review in reviews {
            let key = (review.article_id(), review.reviewer());
            if state.reviewer_index.contains(&key) || !batch_reviewers.insert(review.reviewer()) {
                return Err(WorkflowRepositoryError::DuplicateReviewer {
                    article_id: review.article_id(),
                    reviewer: review.reviewer(),
                });
            }
        }

        for review in reviews {
            state
                .reviewer_index
                .insert((review.article_id(), review.reviewer()));
            state
                .article_reviews
                .entry(review.article_id())
                .or_default()
                .push(review.id());
            state.reviews.insert(review.id(), review.clone());
        }
        state.articles.insert(article.id(), article.clone());
        Ok(())
    }

    async fn complete_review(
        &self,
        review: &Review,
        attachments: &[ReviewAttachment],
    ) -> WorkflowRepositoryResult<()> {
        let mut state = write_lock(&self.state)?;
        let stored = state
            .reviews
            .get(&review.id())
            .ok_or(WorkflowRepositoryError::ReviewNotFound(review.id()))?;
        if stored.is_complete() {
            return Err(WorkflowRepositoryError::ReviewAlreadyComplete(review.id()));
        }

        state.reviews.insert(review.id(), review.clone());
        state
            .attachments
            .entry(review.id())
            .or_default()
            .extend(attachments.iter().cloned());
        *state.completed_counts.entry(review.reviewer()).or_default() += 1;
        Ok(())
    }

    async fn find_review(&self, id: ReviewId) -> WorkflowRepositoryResult<Option<Review>> {
        let state = self.state.read().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.reviews.get(&id).cloned())
    }

    async fn reviews_for_article(
        &self,
        article_id: ArticleId,
    ) -> WorkflowRepositoryResult<Vec<Review>> {
        let state = self.state.read().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let reviews = state
            .article_reviews
            .get(&article_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.reviews.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(reviews)
    }

    async fn attachments_for_review(
        &self,
        review_id: ReviewId,
    ) -> WorkflowRepositoryResult<Vec<ReviewAttachment>> {
        let state = self.state.read().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.attachments.get(&review_id).cloned().unwrap_or_default())
    }

    async fn review_summary(
        &self,
        article_id: ArticleId,
    ) -> WorkflowRepositoryResult<ReviewSummary> {
        let state = self.state.read().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut summary = ReviewSummary::default();
        if let Some(ids) = state.article_reviews.get(&article_id) {
            for id in ids {
                if let Some(review) = state.reviews.get(id) {
                    if review.is_complete() {
                        summary.completed += 1;
                    } else {
                        summary.pending += 1;
                    }
                }
            }
        }
        Ok(summary)
    }

    async fn completed_review_count(
        &self,
        reviewer: MemberId,
    ) -> WorkflowRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            WorkflowRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.completed_counts.get(&reviewer).copied().unwrap_or(0))
    }
}
