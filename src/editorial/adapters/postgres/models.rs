//! Diesel row models for editorial workflow persistence.

use super::schema::{articles, review_attachments, reviews};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for article records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ArticleRow {
    /// Article identifier.
    pub id: uuid::Uuid,
    /// Owning department.
    pub department_id: uuid::Uuid,
    /// Owning journal.
    pub journal_id: uuid::Uuid,
    /// Slug, unique within the journal.
    pub slug: String,
    /// Manuscript title.
    pub title: String,
    /// Primary author.
    pub author_id: uuid::Uuid,
    /// Co-author member identifiers as a JSON array.
    pub co_authors: Value,
    /// Lifecycle status.
    pub status: String,
    /// Submission timestamp.
    pub submission_date: DateTime<Utc>,
    /// Acceptance timestamp.
    pub acceptance_date: Option<DateTime<Utc>>,
    /// Publication timestamp.
    pub publication_date: Option<DateTime<Utc>>,
    /// Manuscript version.
    pub version: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for article records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub struct NewArticleRow {
    /// Article identifier.
    pub id: uuid::Uuid,
    /// Owning department.
    pub department_id: uuid::Uuid,
    /// Owning journal.
    pub journal_id: uuid::Uuid,
    /// Slug, unique within the journal.
    pub slug: String,
    /// Manuscript title.
    pub title: String,
    /// Primary author.
    pub author_id: uuid::Uuid,
    /// Co-author member identifiers as a JSON array.
    pub co_authors: Value,
    /// Lifecycle status.
    pub status: String,
    /// Submission timestamp.
    pub submission_date: DateTime<Utc>,
    /// Acceptance timestamp.
    pub acceptance_date: Option<DateTime<Utc>>,
    /// Publication timestamp.
    pub publication_date: Option<DateTime<Utc>>,
    /// Manuscript version.
    pub version: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for review records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    /// Review identifier.
    pub id: uuid::Uuid,
    /// Article under review.
    pub article_id: uuid::Uuid,
    /// Assigned reviewer.
    pub reviewer_id: uuid::Uuid,
    /// Assignment timestamp.
    pub assigned_date: DateTime<Utc>,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Completion timestamp.
    pub completion_date: Option<DateTime<Utc>>,
    /// Recommendation.
    pub recommendation: Option<String>,
    /// Comments addressed to the editor.
    pub comments_to_editor: Option<String>,
    /// Comments addressed to the author.
    pub comments_to_author: Option<String>,
    /// Confidential comments.
    pub confidential_comments: Option<String>,
}

/// Insert model for review records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    /// Review identifier.
    pub id: uuid::Uuid,
    /// Article under review.
    pub article_id: uuid::Uuid,
    /// Assigned reviewer.
    pub reviewer_id: uuid::Uuid,
    /// Assignment timestamp.
    pub assigned_date: DateTime<Utc>,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Completion timestamp.
    pub completion_date: Option<DateTime<Utc>>,
    /// Recommendation.
    pub recommendation: Option<String>,
    /// Comments addressed to the editor.
    pub comments_to_editor: Option<String>,
    /// Comments addressed to the author.
    pub comments_to_author: Option<String>,
    /// Confidential comments.
    pub confidential_comments: Option<String>,
}

/// Query result row for review attachments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = review_attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Owning review.
    pub review_id: uuid::Uuid,
    /// Stored-file key.
    pub file_key: String,
    /// Description.
    pub description: String,
    /// Uploading member.
    pub uploaded_by: uuid::Uuid,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Insert model for review attachments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = review_attachments)]
pub struct NewAttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Owning review.
    pub review_id: uuid::Uuid,
    /// Stored-file key.
    pub file_key: String,
    /// Description.
    pub description: String,
    /// Uploading member.
    pub uploaded_by: uuid::Uuid,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}
