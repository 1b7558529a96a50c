//! Diesel schema for editorial workflow persistence.

diesel::table! {
    /// Article records and their lifecycle status.
    articles (id) {
        /// Article identifier.
        id -> Uuid,
        /// Owning department.
        department_id -> Uuid,
        /// Owning journal.
        journal_id -> Uuid,
        /// Slug, unique within the journal.
        #[max_length = 255]
        slug -> Varchar,
        /// Manuscript title.
        #[max_length = 255]
        title -> Varchar,
        /// Primary author.
        author_id -> Uuid,
        /// Co-author member identifiers.
        co_authors -> Jsonb,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Submission timestamp.
        submission_date -> Timestamptz,
        /// Acceptance timestamp, set by the accepted decision.
        acceptance_date -> Nullable<Timestamptz>,
        /// Publication timestamp, set by the publish transition.
        publication_date -> Nullable<Timestamptz>,
        /// Manuscript version.
        version -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Review assignments, unique per (article, reviewer).
    reviews (id) {
        /// Review identifier.
        id -> Uuid,
        /// Article under review.
        article_id -> Uuid,
        /// Assigned reviewer.
        reviewer_id -> Uuid,
        /// Assignment timestamp.
        assigned_date -> Timestamptz,
        /// Due date.
        due_date -> Timestamptz,
        /// Completion timestamp, null until submitted.
        completion_date -> Nullable<Timestamptz>,
        /// Recommendation, null until submitted.
        #[max_length = 50]
        recommendation -> Nullable<Varchar>,
        /// Comments addressed to the editor.
        comments_to_editor -> Nullable<Text>,
        /// Comments addressed to the author.
        comments_to_author -> Nullable<Text>,
        /// Confidential comments visible to editors only.
        confidential_comments -> Nullable<Text>,
    }
}

diesel::table! {
    /// Files attached to completed reviews.
    review_attachments (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Owning review.
        review_id -> Uuid,
        /// Stored-file key.
        #[max_length = 255]
        file_key -> Varchar,
        /// Description.
        #[max_length = 255]
        description -> Varchar,
        /// Uploading member.
        uploaded_by -> Uuid,
        /// Upload timestamp.
        uploaded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Running completed-review counters per reviewer.
    reviewer_stats (reviewer_id) {
        /// Reviewer identifier.
        reviewer_id -> Uuid,
        /// Number of reviews the reviewer has completed.
        completed_reviews -> Int8,
    }
}
