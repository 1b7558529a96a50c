//! `PostgreSQL` repository implementation for editorial workflow storage.
//!
//! Each transactional port operation runs inside one database transaction;
//! the unique index on (article, reviewer) and the expected-status guard on
//! article updates enforce the workflow invariants under concurrency.

use super::{
    models::{ArticleRow, AttachmentRow, NewArticleRow, NewAttachmentRow, NewReviewRow, ReviewRow},
    schema::{articles, review_attachments, reviewer_stats, reviews},
};
use crate::editorial::{
    domain::{
        Article, ArticleId, ArticleSlug, ArticleStatus, ArticleTitle, AttachmentId, DepartmentId,
        JournalId, MemberId, PersistedArticleData, PersistedAttachmentData, PersistedReviewData,
        Recommendation, Review, ReviewAttachment, ReviewId,
    },
    ports::{ReviewSummary, WorkflowRepository, WorkflowRepositoryError, WorkflowRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by workflow adapters.
pub type WorkflowPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed workflow repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkflowRepository {
    pool: WorkflowPgPool,
}

/// Error carrier inside database transactions: typed workflow failures
/// abort the transaction without losing their identity.
enum TxError {
    Workflow(WorkflowRepositoryError),
    Database(DieselError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl TxError {
    fn into_repository_error(self) -> WorkflowRepositoryError {
        match self {
            Self::Workflow(err) => err,
            Self::Database(err) => WorkflowRepositoryError::persistence(err),
        }
    }
}

fn tx_persistence(err: impl std::error::Error + Send + Sync + 'static) -> TxError {
    TxError::Workflow(WorkflowRepositoryError::persistence(err))
}

impl PostgresWorkflowRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkflowRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkflowRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkflowRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkflowRepositoryError::persistence)?
    }
}

#[async_trait]
impl WorkflowRepository for PostgresWorkflowRepository {
    async fn store_article(&self, article: &Article) -> WorkflowRepositoryResult<()> {
        let article_id = article.id();
        let journal_id = article.journal_id();
        let slug = article.slug().clone();
        let new_row = to_new_article_row(article)?;

        self.run_blocking(move |connection| {
            // This pre-check improves semantic error reporting but is not
            // relied on for correctness: the unique index still enforces
            // integrity in the TOCTOU window between check and insert.
            let existing = articles::table
                .filter(
                    articles::journal_id
                        .eq(journal_id.into_inner())
                        .and(articles::slug.eq(slug.as_str().to_owned())),
                )
                .select(articles::id)
                .first::<uuid::Uuid>(connection)
                .optional()
                .map_err(WorkflowRepositoryError::persistence)?;
            if existing.is_some() {
                return Err(WorkflowRepositoryError::DuplicateSlug {
                    journal_id,
                    slug: slug.clone(),
                });
            }

            diesel::insert_into(articles::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_slug_unique_violation(info.as_ref()) =>
                    {
                        WorkflowRepositoryError::DuplicateSlug {
                            journal_id,
                            slug: slug.clone(),
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkflowRepositoryError::DuplicateArticle(article_id)
                    }
                    _ => WorkflowRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn find_article(&self, id: ArticleId) -> WorkflowRepositoryResult<Option<Article>> {
        self.run_blocking(move |connection| {
            let row = articles::table
                .filter(articles::id.eq(id.into_inner()))
                .select(ArticleRow::as_select())
                .first::<ArticleRow>(connection)
                .optional()
                .map_err(WorkflowRepositoryError::persistence)?;
            row.map(row_to_article).transpose()
        })
        .await
    }

    async fn find_article_by_slug(
        &self,
        journal_id: JournalId,
        slug: &ArticleSlug,
    ) -> WorkflowRepositoryResult<Option<Article>> {
        let slug_value = slug.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = articles::table
                .filter(
                    articles::journal_id
                        .eq(journal_id.into_inner())
                        .and(articles::slug.eq(slug_value)),
                )
                .select(ArticleRow::as_select())
                .first::<ArticleRow>(connection)
                .optional()
                .map_err(WorkflowRepositoryError::persistence)?;
            row.map(row_to_article).transpose()
        })
        .await
    }

    async fn update_article(
        &self,
        article: &Article,
        expected_status: ArticleStatus,
    ) -> WorkflowRepositoryResult<()> {
        let updated = article.clone();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|txn| {
                    update_article_guarded(txn, &updated, expected_status)
                })
                .map_err(TxError::into_repository_error)
        })
        .await
    }

    async fn assign_reviewers(
        &self,
        article: &Article,
        expected_status: ArticleStatus,
        reviews_batch: &[Review],
    ) -> WorkflowRepositoryResult<()> {
        let updated = article.clone();
        let rows: Vec<(NewReviewRow, MemberId)> = reviews_batch
            .iter()
            .map(|review| (to_new_review_row(review), review.reviewer()))
            .collect();
        let article_id = article.id();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|txn| {
                    update_article_guarded(txn, &updated, expected_status)?;

                    for (row, reviewer) in &rows {
                        diesel::insert_into(reviews::table)
                            .values(row)
                            .execute(txn)
                            .map_err(|err| match err {
                                DieselError::DatabaseError(
                                    DatabaseErrorKind::UniqueViolation,
                                    _,
                                ) => TxError::Workflow(
                                    WorkflowRepositoryError::DuplicateReviewer {
                                        article_id,
                                        reviewer: *reviewer,
                                    },
                                ),
                                other => TxError::Database(other),
                            })?;
                    }
                    Ok(())
                })
                .map_err(TxError::into_repository_error)
        })
        .await
    }

    async fn complete_review(
        &self,
        review: &Review,
        attachments: &[ReviewAttachment],
    ) -> WorkflowRepositoryResult<()> {
        let review_id = review.id();
        let reviewer = review.reviewer();
        let completion_date = review.completion_date();
        let recommendation = review
            .recommendation()
            .map(|value| value.as_str().to_owned());
        let comments_to_editor = review.comments_to_editor().map(str::to_owned);
        let comments_to_author = review.comments_to_author().map(str::to_owned);
        let confidential_comments = review.confidential_comments().map(str::to_owned);
        let attachment_rows: Vec<NewAttachmentRow> =
            attachments.iter().map(to_new_attachment_row).collect();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|txn| {
                    let affected = diesel::update(
                        reviews::table.filter(
                            reviews::id
                                .eq(review_id.into_inner())
                                .and(reviews::completion_date.is_null()),
                        ),
                    )
                    .set((
                        reviews::completion_date.eq(completion_date),
                        reviews::recommendation.eq(recommendation.clone()),
                        reviews::comments_to_editor.eq(comments_to_editor.clone()),
                        reviews::comments_to_author.eq(comments_to_author.clone()),
                        reviews::confidential_comments.eq(confidential_comments.clone()),
                    ))
                    .execute(txn)?;

                    if affected == 0 {
                        let exists = reviews::table
                            .filter(reviews::id.eq(review_id.into_inner()))
                            .select(reviews::id)
                            .first::<uuid::Uuid>(txn)
                            .optional()?;
                        let err = match exists {
                            None => WorkflowRepositoryError::ReviewNotFound(review_id),
                            Some(_) => WorkflowRepositoryError::ReviewAlreadyComplete(review_id),
                        };
                        return Err(TxError::Workflow(err));
                    }

                    diesel::insert_into(review_attachments::table)
                        .values(&attachment_rows)
                        .execute(txn)?;

                    diesel::insert_into(reviewer_stats::table)
                        .values((
                            reviewer_stats::reviewer_id.eq(reviewer.into_inner()),
                            reviewer_stats::completed_reviews.eq(1_i64),
                        ))
                        .on_conflict(reviewer_stats::reviewer_id)
                        .do_update()
                        .set(
                            reviewer_stats::completed_reviews
                                .eq(reviewer_stats::completed_reviews + 1),
                        )
                        .execute(txn)?;

                    Ok(())
                })
                .map_err(TxError::into_repository_error)
        })
        .await
    }

    async fn find_review(&self, id: ReviewId) -> WorkflowRepositoryResult<Option<Review>> {
        self.run_blocking(move |connection| {
            let row = reviews::table
                .filter(reviews::id.eq(id.into_inner()))
                .select(ReviewRow::as_select())
                .first::<ReviewRow>(connection)
                .optional()
                .map_err(WorkflowRepositoryError::persistence)?;
            row.map(row_to_review).transpose()
        })
        .await
    }

    async fn reviews_for_article(
        &self,
        article_id: ArticleId,
    ) -> WorkflowRepositoryResult<Vec<Review>> {
        self.run_blocking(move |connection| {
            let rows = reviews::table
                .filter(reviews::article_id.eq(article_id.into_inner()))
                .order(reviews::assigned_date.asc())
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(connection)
                .map_err(WorkflowRepositoryError::persistence)?;
            rows.into_iter().map(row_to_review).collect()
        })
        .await
    }

    async fn attachments_for_review(
        &self,
        review_id: ReviewId,
    ) -> WorkflowRepositoryResult<Vec<ReviewAttachment>> {
        self.run_blocking(move |connection| {
            let rows = review_attachments::table
                .filter(review_attachments::review_id.eq(review_id.into_inner()))
                .order(review_attachments::uploaded_at.asc())
                .select(AttachmentRow::as_select())
                .load::<AttachmentRow>(connection)
                .map_err(WorkflowRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_attachment).collect())
        })
        .await
    }

    async fn review_summary(
        &self,
        article_id: ArticleId,
    ) -> WorkflowRepositoryResult<ReviewSummary> {
        self.run_blocking(move |connection| {
            let completed = reviews::table
                .filter(
                    reviews::article_id
                        .eq(article_id.into_inner())
                        .and(reviews::completion_date.is_not_null()),
                )
                .count()
                .get_result::<i64>(connection)
                .map_err(WorkflowRepositoryError::persistence)?;
            let pending = reviews::table
                .filter(
                    reviews::article_id
                        .eq(article_id.into_inner())
                        .and(reviews::completion_date.is_null()),
                )
                .count()
                .get_result::<i64>(connection)
                .map_err(WorkflowRepositoryError::persistence)?;

            Ok(ReviewSummary {
                completed: usize::try_from(completed)
                    .map_err(WorkflowRepositoryError::persistence)?,
                pending: usize::try_from(pending)
                    .map_err(WorkflowRepositoryError::persistence)?,
            })
        })
        .await
    }

    async fn completed_review_count(
        &self,
        reviewer: MemberId,
    ) -> WorkflowRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count = reviewer_stats::table
                .filter(reviewer_stats::reviewer_id.eq(reviewer.into_inner()))
                .select(reviewer_stats::completed_reviews)
                .first::<i64>(connection)
                .optional()
                .map_err(WorkflowRepositoryError::persistence)?
                .unwrap_or(0);
            u64::try_from(count).map_err(WorkflowRepositoryError::persistence)
        })
        .await
    }
}

/// Applies an article update guarded by the status the caller read,
/// distinguishing a missing article from a lost status race.
fn update_article_guarded(
    txn: &mut PgConnection,
    article: &Article,
    expected_status: ArticleStatus,
) -> Result<(), TxError> {
    let version = i32::try_from(article.version()).map_err(tx_persistence)?;
    let affected = diesel::update(
        articles::table.filter(
            articles::id
                .eq(article.id().into_inner())
                .and(articles::status.eq(expected_status.as_str())),
        ),
    )
    .set((
        articles::status.eq(article.status().as_str()),
        articles::acceptance_date.eq(article.acceptance_date()),
        articles::publication_date.eq(article.publication_date()),
        articles::version.eq(version),
        articles::updated_at.eq(article.updated_at()),
    ))
    .execute(txn)?;

    if affected == 0 {
        let current = articles::table
            .filter(articles::id.eq(article.id().into_inner()))
            .select(articles::status)
            .first::<String>(txn)
            .optional()?;
        let err = match current {
            None => WorkflowRepositoryError::ArticleNotFound(article.id()),
            Some(raw) => {
                let actual = ArticleStatus::try_from(raw.as_str()).map_err(tx_persistence)?;
                WorkflowRepositoryError::StatusConflict {
                    article_id: article.id(),
                    expected: expected_status,
                    actual,
                }
            }
        };
        return Err(TxError::Workflow(err));
    }
    Ok(())
}

fn to_new_article_row(article: &Article) -> WorkflowRepositoryResult<NewArticleRow> {
    let co_authors: Vec<uuid::Uuid> = article
        .co_authors()
        .iter()
        .map(|member| member.into_inner())
        .collect();
    let co_authors =
        serde_json::to_value(co_authors).map_err(WorkflowRepositoryError::persistence)?;
    let version =
        i32::try_from(article.version()).map_err(WorkflowRepositoryError::persistence)?;

    Ok(NewArticleRow {
        id: article.id().into_inner(),
        department_id: article.department_id().into_inner(),
        journal_id: article.journal_id().into_inner(),
        slug: article.slug().as_str().to_owned(),
        title: article.title().as_str().to_owned(),
        author_id: article.author().into_inner(),
        co_authors,
        status: article.status().as_str().to_owned(),
        submission_date: article.submission_date(),
        acceptance_date: article.acceptance_date(),
        publication_date: article.publication_date(),
        version,
        created_at: article.created_at(),
        updated_at: article.updated_at(),
    })
}

fn row_to_article(row: ArticleRow) -> WorkflowRepositoryResult<Article> {
    let status =
        ArticleStatus::try_from(row.status.as_str()).map_err(WorkflowRepositoryError::persistence)?;
    let slug = ArticleSlug::new(row.slug).map_err(WorkflowRepositoryError::persistence)?;
    let title = ArticleTitle::new(row.title).map_err(WorkflowRepositoryError::persistence)?;
    let co_authors = serde_json::from_value::<Vec<uuid::Uuid>>(row.co_authors)
        .map_err(WorkflowRepositoryError::persistence)?
        .into_iter()
        .map(MemberId::from_uuid)
        .collect();
    let version = u32::try_from(row.version).map_err(WorkflowRepositoryError::persistence)?;

    let data = PersistedArticleData {
        id: ArticleId::from_uuid(row.id),
        department_id: DepartmentId::from_uuid(row.department_id),
        journal_id: JournalId::from_uuid(row.journal_id),
        slug,
        title,
        author: MemberId::from_uuid(row.author_id),
        co_authors,
        status,
        submission_date: row.submission_date,
        acceptance_date: row.acceptance_date,
        publication_date: row.publication_date,
        version,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Article::from_persisted(data))
}

fn to_new_review_row(review: &Review) -> NewReviewRow {
    NewReviewRow {
        id: review.id().into_inner(),
        article_id: review.article_id().into_inner(),
        reviewer_id: review.reviewer().into_inner(),
        assigned_date: review.assigned_date(),
        due_date: review.due_date(),
        completion_date: review.completion_date(),
        recommendation: review
            .recommendation()
            .map(|value| value.as_str().to_owned()),
        comments_to_editor: review.comments_to_editor().map(str::to_owned),
        comments_to_author: review.comments_to_author().map(str::to_owned),
        confidential_comments: review.confidential_comments().map(str::to_owned),
    }
}

fn row_to_review(row: ReviewRow) -> WorkflowRepositoryResult<Review> {
    let recommendation = row
        .recommendation
        .as_deref()
        .map(Recommendation::try_from)
        .transpose()
        .map_err(WorkflowRepositoryError::persistence)?;

    let data = PersistedReviewData {
        id: ReviewId::from_uuid(row.id),
        article_id: ArticleId::from_uuid(row.article_id),
        reviewer: MemberId::from_uuid(row.reviewer_id),
        assigned_date: row.assigned_date,
        due_date: row.due_date,
        completion_date: row.completion_date,
        recommendation,
        comments_to_editor: row.comments_to_editor,
        comments_to_author: row.comments_to_author,
        confidential_comments: row.confidential_comments,
    };
    Ok(Review::from_persisted(data))
}

fn to_new_attachment_row(attachment: &ReviewAttachment) -> NewAttachmentRow {
    NewAttachmentRow {
        id: attachment.id().into_inner(),
        review_id: attachment.review_id().into_inner(),
        file_key: attachment.file_key().to_owned(),
        description: attachment.description().to_owned(),
        uploaded_by: attachment.uploaded_by().into_inner(),
        uploaded_at: attachment.uploaded_at(),
    }
}

fn row_to_attachment(row: AttachmentRow) -> ReviewAttachment {
    ReviewAttachment::from_persisted(PersistedAttachmentData {
        id: AttachmentId::from_uuid(row.id),
        review_id: ReviewId::from_uuid(row.review_id),
        file_key: row.file_key,
        description: row.description,
        uploaded_by: MemberId::from_uuid(row.uploaded_by),
        uploaded_at: row.uploaded_at,
    })
}

fn is_slug_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_articles_journal_slug_unique")
}
