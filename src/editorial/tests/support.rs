//! Shared builders for workflow service tests.

use std::sync::Arc;

use mockable::DefaultClock;
use uuid::Uuid;

use crate::editorial::{
    adapters::memory::{
        InMemoryAccessDirectory, InMemoryDepartmentPolicies, InMemoryNotificationGateway,
        InMemoryWorkflowRepository,
    },
    domain::{Article, DepartmentId, JournalId, MemberId, Review},
    ports::{Role, WorkflowRepository},
    services::{
        AssignReviewersRequest, DraftArticleRequest, EditorialDecisionService, PublicationService,
        ReviewAssignmentService, ReviewCompletionService, SubmissionService,
    },
};

pub type MemorySubmissionService =
    SubmissionService<InMemoryWorkflowRepository, InMemoryNotificationGateway, DefaultClock>;
pub type MemoryAssignmentService = ReviewAssignmentService<
    InMemoryWorkflowRepository,
    InMemoryNotificationGateway,
    InMemoryAccessDirectory,
    InMemoryDepartmentPolicies,
    DefaultClock,
>;
pub type MemoryCompletionService =
    ReviewCompletionService<InMemoryWorkflowRepository, InMemoryNotificationGateway, DefaultClock>;
pub type MemoryDecisionService = EditorialDecisionService<
    InMemoryWorkflowRepository,
    InMemoryNotificationGateway,
    InMemoryAccessDirectory,
    DefaultClock,
>;
pub type MemoryPublicationService = PublicationService<
    InMemoryWorkflowRepository,
    InMemoryNotificationGateway,
    InMemoryAccessDirectory,
    DefaultClock,
>;

/// In-memory adapters plus the identities used by the service tests.
pub struct TestHarness {
    pub repository: Arc<InMemoryWorkflowRepository>,
    pub notifications: Arc<InMemoryNotificationGateway>,
    pub access: Arc<InMemoryAccessDirectory>,
    pub policies: Arc<InMemoryDepartmentPolicies>,
    pub clock: Arc<DefaultClock>,
    pub department_id: DepartmentId,
    pub journal_id: JournalId,
    pub author: MemberId,
    pub editor: MemberId,
}

impl TestHarness {
    pub fn new() -> Self {
        let harness = Self {
            repository: Arc::new(InMemoryWorkflowRepository::new()),
            notifications: Arc::new(InMemoryNotificationGateway::new()),
            access: Arc::new(InMemoryAccessDirectory::new()),
            policies: Arc::new(InMemoryDepartmentPolicies::new()),
            clock: Arc::new(DefaultClock),
            department_id: DepartmentId::new(),
            journal_id: JournalId::new(),
            author: MemberId::new(),
            editor: MemberId::new(),
        };
        harness
            .access
            .assign_role(harness.editor, harness.department_id, Role::Editor);
        harness
    }

    pub fn submission_service(&self) -> MemorySubmissionService {
        SubmissionService::new(
            self.repository.clone(),
            self.notifications.clone(),
            self.clock.clone(),
        )
    }

    pub fn assignment_service(&self) -> MemoryAssignmentService {
        ReviewAssignmentService::new(
            self.repository.clone(),
            self.notifications.clone(),
            self.access.clone(),
            self.policies.clone(),
            self.clock.clone(),
        )
    }

    pub fn completion_service(&self) -> MemoryCompletionService {
        ReviewCompletionService::new(
            self.repository.clone(),
            self.notifications.clone(),
            self.clock.clone(),
        )
    }

    pub fn decision_service(&self) -> MemoryDecisionService {
        EditorialDecisionService::new(
            self.repository.clone(),
            self.notifications.clone(),
            self.access.clone(),
            self.clock.clone(),
        )
    }

    pub fn publication_service(&self) -> MemoryPublicationService {
        PublicationService::new(
            self.repository.clone(),
            self.notifications.clone(),
            self.access.clone(),
            self.clock.clone(),
        )
    }

    pub async fn draft_article(&self) -> Article {
        let slug = format!("manuscript-{}", Uuid::new_v4().simple());
        self.submission_service()
            .create_draft(DraftArticleRequest::new(
                self.department_id,
                self.journal_id,
                slug,
                "Oral tradition in the middle-belt novel",
                self.author,
            ))
            .await
            .expect("draft creation should succeed")
    }

    pub async fn submitted_article(&self) -> Article {
        let article = self.draft_article().await;
        self.submission_service()
            .submit(article.id(), self.author)
            .await
            .expect("submission should succeed")
    }

    pub async fn article_under_review(&self, reviewers: &[MemberId]) -> (Article, Vec<Review>) {
        let article = self.submitted_article().await;
        let reviews = self
            .assignment_service()
            .assign_reviewers(AssignReviewersRequest::new(
                article.id(),
                self.editor,
                reviewers.to_vec(),
            ))
            .await
            .expect("assignment should succeed");
        let article = self
            .repository
            .find_article(article.id())
            .await
            .expect("lookup should succeed")
            .expect("article should exist");
        (article, reviews)
    }
}
