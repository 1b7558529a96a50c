//! Service tests for reviewer assignment.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rstest::{fixture, rstest};

use super::support::TestHarness;
use crate::editorial::{
    domain::{ArticleStatus, EditorialDecision, EditorialDomainError, MemberId, NotificationEvent,
        NotificationKind},
    ports::{DeliveryStatus, NotificationGateway, WorkflowRepository, WorkflowRepositoryError},
    services::{AssignReviewersRequest, AssignmentError, RecordDecisionRequest,
        ReviewAssignmentService},
};

mockall::mock! {
    Gateway {}

    #[async_trait]
    impl NotificationGateway for Gateway {
        async fn notify(&self, event: NotificationEvent) -> DeliveryStatus;
    }
}

#[fixture]
fn harness() -> TestHarness {
    TestHarness::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_creates_reviews_and_moves_article_into_review(harness: TestHarness) {
    let article = harness.submitted_article().await;
    let reviewers = [MemberId::new(), MemberId::new()];
    let due_date = Utc::now() + Duration::days(14);

    let reviews = harness
        .assignment_service()
        .assign_reviewers(
            AssignReviewersRequest::new(article.id(), harness.editor, reviewers)
                .with_due_date(due_date)
                .with_message("Please review by the deadline"),
        )
        .await
        .expect("assignment should succeed");

    assert_eq!(reviews.len(), 2);
    for review in &reviews {
        assert_eq!(review.due_date(), due_date);
        assert!(!review.is_complete());
    }

    let updated = harness
        .repository
        .find_article(article.id())
        .await
        .expect("lookup should succeed")
        .expect("article should exist");
    assert_eq!(updated.status(), ArticleStatus::UnderReview);
    assert_eq!(
        harness
            .notifications
            .attempts_of_kind(NotificationKind::ReviewInvitation),
        2
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unspecified_due_date_follows_department_policy(harness: TestHarness) {
    harness
        .policies
        .set_review_deadline_days(harness.department_id, 21);
    let article = harness.submitted_article().await;

    let reviews = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.editor,
            [MemberId::new()],
        ))
        .await
        .expect("assignment should succeed");

    let review = reviews.first().expect("one review should exist");
    assert_eq!(review.due_date() - review.assigned_date(), Duration::days(21));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unconfigured_department_falls_back_to_thirty_days(harness: TestHarness) {
    let article = harness.submitted_article().await;

    let reviews = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.editor,
            [MemberId::new()],
        ))
        .await
        .expect("assignment should succeed");

    let review = reviews.first().expect("one review should exist");
    assert_eq!(review.due_date() - review.assigned_date(), Duration::days(30));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_reviewer_set_is_rejected(harness: TestHarness) {
    let article = harness.submitted_article().await;

    let result = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(article.id(), harness.editor, []))
        .await;

    assert!(matches!(result, Err(AssignmentError::EmptyAssignment)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_reviewer_within_the_set_is_rejected(harness: TestHarness) {
    let article = harness.submitted_article().await;
    let reviewer = MemberId::new();

    let result = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.editor,
            [reviewer, reviewer],
        ))
        .await;

    assert!(matches!(
        result,
        Err(AssignmentError::DuplicateReviewer { reviewer: repeated, .. }) if repeated == reviewer
    ));
    let reviews = harness
        .repository
        .reviews_for_article(article.id())
        .await
        .expect("lookup should succeed");
    assert!(reviews.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn already_assigned_reviewer_fails_whole_batch(harness: TestHarness) {
    let first_reviewer = MemberId::new();
    let (article, _) = harness.article_under_review(&[first_reviewer]).await;

    // Send the article back for revision so it is assignable again.
    harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::RevisionRequired,
            "Please revise",
        ))
        .await
        .expect("decision should succeed");

    let fresh_reviewer = MemberId::new();
    let result = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.editor,
            [fresh_reviewer, first_reviewer],
        ))
        .await;

    assert!(matches!(
        result,
        Err(AssignmentError::Repository(
            WorkflowRepositoryError::DuplicateReviewer { reviewer, .. }
        )) if reviewer == first_reviewer
    ));

    // All-or-nothing: the batch left no partial state behind.
    let reviews = harness
        .repository
        .reviews_for_article(article.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(reviews.len(), 1);
    let updated = harness
        .repository
        .find_article(article.id())
        .await
        .expect("lookup should succeed")
        .expect("article should exist");
    assert_eq!(updated.status(), ArticleStatus::RevisionRequired);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_editor_caller_is_rejected_before_any_mutation(harness: TestHarness) {
    let article = harness.submitted_article().await;

    let result = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.author,
            [MemberId::new()],
        ))
        .await;

    assert!(matches!(
        result,
        Err(AssignmentError::Unauthorized { member, .. }) if member == harness.author
    ));
    let updated = harness
        .repository
        .find_article(article.id())
        .await
        .expect("lookup should succeed")
        .expect("article should exist");
    assert_eq!(updated.status(), ArticleStatus::Submitted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn draft_article_is_not_assignable(harness: TestHarness) {
    let article = harness.draft_article().await;

    let result = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.editor,
            [MemberId::new()],
        ))
        .await;

    assert!(matches!(
        result,
        Err(AssignmentError::Domain(
            EditorialDomainError::InvalidStatusTransition {
                from: ArticleStatus::Draft,
                to: ArticleStatus::UnderReview,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revision_required_article_is_assignable_again(harness: TestHarness) {
    let (article, _) = harness.article_under_review(&[MemberId::new()]).await;
    harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::RevisionRequired,
            "Please revise",
        ))
        .await
        .expect("decision should succeed");

    let reviews = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.editor,
            [MemberId::new()],
        ))
        .await
        .expect("reassignment should succeed");

    assert_eq!(reviews.len(), 1);
    let updated = harness
        .repository
        .find_article(article.id())
        .await
        .expect("lookup should succeed")
        .expect("article should exist");
    assert_eq!(updated.status(), ArticleStatus::UnderReview);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invitation_failure_does_not_roll_back_the_assignment(harness: TestHarness) {
    let article = harness.submitted_article().await;
    harness.notifications.set_failing(true);

    let reviews = harness
        .assignment_service()
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.editor,
            [MemberId::new()],
        ))
        .await
        .expect("assignment should succeed despite notification failure");

    assert_eq!(reviews.len(), 1);
    let attempts = harness.notifications.attempts();
    let invitation = attempts
        .iter()
        .find(|attempt| attempt.kind() == NotificationKind::ReviewInvitation)
        .expect("invitation attempt should be recorded");
    assert_eq!(invitation.status(), DeliveryStatus::Failed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_invitation_is_announced_per_reviewer(harness: TestHarness) {
    let article = harness.submitted_article().await;

    let mut gateway = MockGateway::new();
    gateway
        .expect_notify()
        .withf(|event| matches!(event, NotificationEvent::ReviewInvitation { .. }))
        .times(2)
        .returning(|_| DeliveryStatus::Sent);

    let service = ReviewAssignmentService::new(
        harness.repository.clone(),
        Arc::new(gateway),
        harness.access.clone(),
        harness.policies.clone(),
        harness.clock.clone(),
    );

    service
        .assign_reviewers(AssignReviewersRequest::new(
            article.id(),
            harness.editor,
            [MemberId::new(), MemberId::new()],
        ))
        .await
        .expect("assignment should succeed");
}
