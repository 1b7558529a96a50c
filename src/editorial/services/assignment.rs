//! Reviewer-assignment coordinator.
//!
//! Creates a batch of review assignments for an article and transitions it
//! into review as one atomic repository operation, then fans out one
//! invitation per reviewer after the commit.

use crate::editorial::{
    domain::{
        Article, ArticleId, AssignReviewParams, DepartmentId, EditorialDomainError, MemberId,
        NotificationEvent, Review, ReviewDueDate,
    },
    ports::{
        AccessDirectory, AccessDirectoryError, DepartmentPolicySource, NotificationGateway,
        PolicyError, WorkflowRepository, WorkflowRepositoryError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for assigning reviewers to an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignReviewersRequest {
    article_id: ArticleId,
    actor: MemberId,
    reviewers: Vec<MemberId>,
    due_date: Option<DateTime<Utc>>,
    message: Option<String>,
}

impl AssignReviewersRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        article_id: ArticleId,
        actor: MemberId,
        reviewers: impl IntoIterator<Item = MemberId>,
    ) -> Self {
        Self {
            article_id,
            actor,
            reviewers: reviewers.into_iter().collect(),
            due_date: None,
            message: None,
        }
    }

    /// Sets an explicit due date; otherwise the department's review
    /// deadline policy applies.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets a message from the editor included in the invitations.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Service-level errors for reviewer assignment.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] EditorialDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkflowRepositoryError),
    /// Capability lookup failed.
    #[error(transparent)]
    Access(#[from] AccessDirectoryError),
    /// Policy lookup failed.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// The caller lacks editor capability for the article's department.
    #[error("member {member} lacks editor capability for department {department}")]
    Unauthorized {
        /// Member that attempted the assignment.
        member: MemberId,
        /// Department the capability was checked against.
        department: DepartmentId,
    },
    /// The reviewer set is empty.
    #[error("reviewer set must not be empty")]
    EmptyAssignment,
    /// The reviewer set names the same member more than once.
    #[error("reviewer {reviewer} appears more than once in the assignment for article {article_id}")]
    DuplicateReviewer {
        /// Article the assignment targets.
        article_id: ArticleId,
        /// The repeated reviewer.
        reviewer: MemberId,
    },
}

/// Result type for reviewer-assignment operations.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Reviewer-assignment coordination service.
#[derive(Clone)]
pub struct ReviewAssignmentService<R, N, A, P, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    A: AccessDirectory,
    P: DepartmentPolicySource,
    K: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifications: Arc<N>,
    access: Arc<A>,
    policies: Arc<P>,
    clock: Arc<K>,
}

impl<R, N, A, P, K> ReviewAssignmentService<R, N, A, P, K>
where
    R: WorkflowRepository,
    N: NotificationGateway,
    A: AccessDirectory,
    P: DepartmentPolicySource,
    K: Clock + Send + Sync,
{
    /// Creates a new reviewer-assignment service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        notifications: Arc<N>,
        access: Arc<A>,
        policies: Arc<P>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            repository,
            notifications,
            access,
            policies,
            clock,
        }
    }

    /// Assigns the requested reviewers and moves the article into review.
    ///
    /// All review creations plus the status change commit as one atomic
    /// unit; invitations are announced only after the commit and their
    /// delivery outcome never affects the assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Unauthorized`] when the caller lacks
    /// editor capability, [`AssignmentError::EmptyAssignment`] for an empty
    /// reviewer set, [`AssignmentError::DuplicateReviewer`] for a repeated
    /// reviewer within the set, a domain error when the article is not
    /// assignable, or a repository error (including the uniqueness
    /// violation for an already-assigned reviewer) when persistence fails.
    pub async fn assign_reviewers(
        &self,
        request: AssignReviewersRequest,
    ) -> AssignmentResult<Vec<Review>> {
        let mut article = self.find_article(request.article_id).await?;

        let department = article.department_id();
        if !self
            .access
            .holds_editor_capability(request.actor, department)
            .await?
        {
            return Err(AssignmentError::Unauthorized {
                member: request.actor,
                department,
            });
        }

        if request.reviewers.is_empty() {
            return Err(AssignmentError::EmptyAssignment);
        }
        let mut seen: HashSet<MemberId> = HashSet::new();
        for reviewer in &request.reviewers {
            if !seen.insert(*reviewer) {
                return Err(AssignmentError::DuplicateReviewer {
                    article_id: article.id(),
                    reviewer: *reviewer,
                });
            }
        }

        let previous_status = article.status();
        article.begin_review(self.clock.as_ref())?;

        let due = match request.due_date {
            Some(date) => ReviewDueDate::Explicit(date),
            None => ReviewDueDate::PolicyDefault {
                days: self.policies.review_deadline_days(department).await?,
            },
        };
        let reviews: Vec<Review> = request
            .reviewers
            .iter()
            .map(|reviewer| {
                Review::assign(
                    AssignReviewParams {
                        article_id: article.id(),
                        reviewer: *reviewer,
                        due,
                    },
                    self.clock.as_ref(),
                )
            })
            .collect();

        self.repository
            .assign_reviewers(&article, previous_status, &reviews)
            .await?;

        for review in &reviews {
            self.notifications
                .notify(NotificationEvent::ReviewInvitation {
                    review_id: review.id(),
                    article_id: article.id(),
                    department_id: department,
                    reviewer: review.reviewer(),
                    due_date: review.due_date(),
                    message: request.message.clone(),
                })
                .await;
        }

        Ok(reviews)
    }

    async fn find_article(&self, article_id: ArticleId) -> AssignmentResult<Article> {
        let article = self
            .repository
            .find_article(article_id)
            .await?
            .ok_or(WorkflowRepositoryError::ArticleNotFound(article_id))?;
        Ok(article)
    }
}
