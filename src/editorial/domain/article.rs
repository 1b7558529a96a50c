//! Article aggregate root and the editorial status state machine.

use super::{
    ArticleId, ArticleSlug, DepartmentId, EditorialDecision, EditorialDomainError, JournalId,
    MemberId, ParseArticleStatusError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editorial lifecycle status of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Manuscript is being prepared and has not been submitted.
    Draft,
    /// Manuscript has been submitted and awaits reviewer assignment.
    Submitted,
    /// Reviewers are assigned and the article is in peer review.
    UnderReview,
    /// The editor has requested a revised manuscript.
    RevisionRequired,
    /// The editor has accepted the article for publication.
    Accepted,
    /// The editor has rejected the article.
    Rejected,
    /// The article has been published.
    Published,
    /// The published article has been retracted.
    Retracted,
}

impl ArticleStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::RevisionRequired => "revision_required",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Published => "published",
            Self::Retracted => "retracted",
        }
    }

    /// Returns whether transition to `target` is an edge of the workflow
    /// transition table.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::UnderReview)
                | (
                    Self::UnderReview,
                    Self::RevisionRequired | Self::Accepted | Self::Rejected
                )
                | (Self::RevisionRequired, Self::UnderReview)
                | (Self::Accepted, Self::Published)
                | (Self::Published, Self::Retracted)
        )
    }

    /// Returns whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Retracted)
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ArticleStatus {
    type Error = ParseArticleStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "revision_required" => Ok(Self::RevisionRequired),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "published" => Ok(Self::Published),
            "retracted" => Ok(Self::Retracted),
            _ => Err(ParseArticleStatusError(value.to_owned())),
        }
    }
}

/// Validated article title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::EmptyTitle`] if the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, EditorialDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EditorialDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArticleTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameter object for creating a draft article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftArticleParams {
    /// Department that owns the article.
    pub department_id: DepartmentId,
    /// Journal the article was submitted to.
    pub journal_id: JournalId,
    /// Slug unique within the journal.
    pub slug: ArticleSlug,
    /// Manuscript title.
    pub title: ArticleTitle,
    /// Primary author.
    pub author: MemberId,
    /// Co-authors, if any.
    pub co_authors: Vec<MemberId>,
}

/// Parameter object for reconstructing a persisted article aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedArticleData {
    /// Persisted article identifier.
    pub id: ArticleId,
    /// Persisted owning department.
    pub department_id: DepartmentId,
    /// Persisted owning journal.
    pub journal_id: JournalId,
    /// Persisted slug.
    pub slug: ArticleSlug,
    /// Persisted title.
    pub title: ArticleTitle,
    /// Persisted primary author.
    pub author: MemberId,
    /// Persisted co-authors.
    pub co_authors: Vec<MemberId>,
    /// Persisted lifecycle status.
    pub status: ArticleStatus,
    /// Persisted submission timestamp.
    pub submission_date: DateTime<Utc>,
    /// Persisted acceptance timestamp, if any.
    pub acceptance_date: Option<DateTime<Utc>>,
    /// Persisted publication timestamp, if any.
    pub publication_date: Option<DateTime<Utc>>,
    /// Persisted manuscript version.
    pub version: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Article aggregate root.
///
/// Status only ever changes through [`Article::transition_to`] and the named
/// mutators built on it, so every persisted status is reachable from
/// [`ArticleStatus::Draft`] along edges of the transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    id: ArticleId,
    department_id: DepartmentId,
    journal_id: JournalId,
    slug: ArticleSlug,
    title: ArticleTitle,
    author: MemberId,
    co_authors: Vec<MemberId>,
    status: ArticleStatus,
    submission_date: DateTime<Utc>,
    acceptance_date: Option<DateTime<Utc>>,
    publication_date: Option<DateTime<Utc>>,
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Article {
    /// Creates a new draft article.
    ///
    /// The submission date is stamped at creation time.
    #[must_use]
    pub fn draft(params: DraftArticleParams, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ArticleId::new(),
            department_id: params.department_id,
            journal_id: params.journal_id,
            slug: params.slug,
            title: params.title,
            author: params.author,
            co_authors: params.co_authors,
            status: ArticleStatus::Draft,
            submission_date: timestamp,
            acceptance_date: None,
            publication_date: None,
            version: 1,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an article from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedArticleData) -> Self {
        Self {
            id: data.id,
            department_id: data.department_id,
            journal_id: data.journal_id,
            slug: data.slug,
            title: data.title,
            author: data.author,
            co_authors: data.co_authors,
            status: data.status,
            submission_date: data.submission_date,
            acceptance_date: data.acceptance_date,
            publication_date: data.publication_date,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the article identifier.
    #[must_use]
    pub const fn id(&self) -> ArticleId {
        self.id
    }

    /// Returns the owning department.
    #[must_use]
    pub const fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    /// Returns the owning journal.
    #[must_use]
    pub const fn journal_id(&self) -> JournalId {
        self.journal_id
    }

    /// Returns the slug.
    #[must_use]
    pub const fn slug(&self) -> &ArticleSlug {
        &self.slug
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &ArticleTitle {
        &self.title
    }

    /// Returns the primary author.
    #[must_use]
    pub const fn author(&self) -> MemberId {
        self.author
    }

    /// Returns the co-authors.
    #[must_use]
    pub fn co_authors(&self) -> &[MemberId] {
        &self.co_authors
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ArticleStatus {
        self.status
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn submission_date(&self) -> DateTime<Utc> {
        self.submission_date
    }

    /// Returns the acceptance timestamp, set by the accepted decision.
    #[must_use]
    pub const fn acceptance_date(&self) -> Option<DateTime<Utc>> {
        self.acceptance_date
    }

    /// Returns the publication timestamp, set by the publish transition.
    #[must_use]
    pub const fn publication_date(&self) -> Option<DateTime<Utc>> {
        self.publication_date
    }

    /// Returns the manuscript version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Requests a status transition, validating it against the transition
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::InvalidStatusTransition`] when the
    /// requested edge is not in the table. The article is left unchanged.
    pub fn transition_to(
        &mut self,
        target: ArticleStatus,
        clock: &impl Clock,
    ) -> Result<(), EditorialDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(EditorialDomainError::InvalidStatusTransition {
                article_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Submits the draft manuscript for editorial handling.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::InvalidStatusTransition`] unless the
    /// article is a draft.
    pub fn submit(&mut self, clock: &impl Clock) -> Result<(), EditorialDomainError> {
        self.transition_to(ArticleStatus::Submitted, clock)
    }

    /// Moves the article into peer review.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::InvalidStatusTransition`] unless the
    /// article is submitted or awaiting a revised manuscript.
    pub fn begin_review(&mut self, clock: &impl Clock) -> Result<(), EditorialDomainError> {
        self.transition_to(ArticleStatus::UnderReview, clock)
    }

    /// Applies an editorial decision.
    ///
    /// An accepted decision also stamps the acceptance date.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::InvalidStatusTransition`] unless the
    /// article is under review.
    pub fn apply_decision(
        &mut self,
        decision: EditorialDecision,
        clock: &impl Clock,
    ) -> Result<(), EditorialDomainError> {
        self.transition_to(decision.target_status(), clock)?;
        if decision == EditorialDecision::Accepted {
            self.acceptance_date = Some(self.updated_at);
        }
        Ok(())
    }

    /// Publishes an accepted article, stamping the publication date.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::InvalidStatusTransition`] unless the
    /// article has been accepted.
    pub fn publish(&mut self, clock: &impl Clock) -> Result<(), EditorialDomainError> {
        self.transition_to(ArticleStatus::Published, clock)?;
        self.publication_date = Some(self.updated_at);
        Ok(())
    }

    /// Retracts a published article.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::InvalidStatusTransition`] unless the
    /// article is published.
    pub fn retract(&mut self, clock: &impl Clock) -> Result<(), EditorialDomainError> {
        self.transition_to(ArticleStatus::Retracted, clock)
    }

    /// Records that a revised manuscript file supersedes the current one,
    /// incrementing the version.
    ///
    /// # Errors
    ///
    /// Returns [`EditorialDomainError::ArticleInTerminalStatus`] when the
    /// article is rejected or retracted.
    pub fn supersede_manuscript(&mut self, clock: &impl Clock) -> Result<(), EditorialDomainError> {
        if self.status.is_terminal() {
            return Err(EditorialDomainError::ArticleInTerminalStatus {
                article_id: self.id,
                status: self.status,
            });
        }

        self.version += 1;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
