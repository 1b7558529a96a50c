//! Service tests for the decision aggregator.

use rstest::{fixture, rstest};

use super::support::TestHarness;
use crate::editorial::{
    domain::{
        ArticleStatus, EditorialDecision, EditorialDomainError, MemberId, NotificationEvent,
        NotificationKind, NotificationRecipient, Recommendation,
    },
    ports::{ReviewSummary, WorkflowRepository},
    services::{DecisionError, RecordDecisionRequest, SubmitReviewRequest},
};

#[fixture]
fn harness() -> TestHarness {
    TestHarness::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepted_decision_sets_status_and_acceptance_date(harness: TestHarness) {
    let (article, _) = harness.article_under_review(&[MemberId::new()]).await;

    let decided = harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::Accepted,
            "Congratulations, see attached comments",
        ))
        .await
        .expect("decision should succeed");

    assert_eq!(decided.status(), ArticleStatus::Accepted);
    assert!(decided.acceptance_date().is_some());

    let stored = harness
        .repository
        .find_article(article.id())
        .await
        .expect("lookup should succeed")
        .expect("article should exist");
    assert_eq!(stored.status(), ArticleStatus::Accepted);
    assert!(stored.acceptance_date().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn decision_notification_carries_the_feedback_to_the_author(harness: TestHarness) {
    let (article, _) = harness.article_under_review(&[MemberId::new()]).await;

    harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::Rejected,
            "Out of scope for this journal",
        ))
        .await
        .expect("decision should succeed");

    let attempts = harness.notifications.attempts();
    let decision_attempt = attempts
        .iter()
        .find(|attempt| attempt.kind() == NotificationKind::EditorialDecision)
        .expect("decision attempt should be recorded");
    assert!(matches!(
        decision_attempt.event(),
        NotificationEvent::EditorialDecision {
            author,
            decision: EditorialDecision::Rejected,
            feedback,
            ..
        } if *author == harness.author && feedback == "Out of scope for this journal"
    ));
    assert_eq!(
        decision_attempt.recipient(),
        NotificationRecipient::Member {
            member: harness.author,
        }
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_reviews_do_not_block_a_decision(harness: TestHarness) {
    let first_reviewer = MemberId::new();
    let second_reviewer = MemberId::new();
    let (article, reviews) = harness
        .article_under_review(&[first_reviewer, second_reviewer])
        .await;
    let first_review = reviews
        .iter()
        .find(|review| review.reviewer() == first_reviewer)
        .expect("first review should exist");

    harness
        .completion_service()
        .submit_review(SubmitReviewRequest::new(
            first_review.id(),
            first_reviewer,
            Recommendation::Reject,
            "Fundamental methodology problems",
            "The sampling cannot support the claims",
        ))
        .await
        .expect("review submission should succeed");

    // One review still pending; the editor decides anyway.
    let decided = harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::Rejected,
            "Following the reviewer's recommendation",
        ))
        .await
        .expect("decision should succeed with a review pending");

    assert_eq!(decided.status(), ArticleStatus::Rejected);
    assert_eq!(
        harness
            .notifications
            .attempts_of_kind(NotificationKind::EditorialDecision),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn decision_requires_an_article_under_review(harness: TestHarness) {
    let article = harness.submitted_article().await;

    let result = harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::Accepted,
            "feedback",
        ))
        .await;

    assert!(matches!(
        result,
        Err(DecisionError::Domain(
            EditorialDomainError::InvalidStatusTransition {
                from: ArticleStatus::Submitted,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_decision_observes_the_updated_status_and_fails(harness: TestHarness) {
    let (article, _) = harness.article_under_review(&[MemberId::new()]).await;

    harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::Accepted,
            "accepting",
        ))
        .await
        .expect("first decision should succeed");

    let result = harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::Rejected,
            "rejecting",
        ))
        .await;

    assert!(matches!(
        result,
        Err(DecisionError::Domain(
            EditorialDomainError::InvalidStatusTransition {
                from: ArticleStatus::Accepted,
                to: ArticleStatus::Rejected,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_editor_caller_is_rejected(harness: TestHarness) {
    let (article, _) = harness.article_under_review(&[MemberId::new()]).await;

    let result = harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.author,
            EditorialDecision::Accepted,
            "feedback",
        ))
        .await;

    assert!(matches!(
        result,
        Err(DecisionError::Unauthorized { member, .. }) if member == harness.author
    ));
    let unchanged = harness
        .repository
        .find_article(article.id())
        .await
        .expect("lookup should succeed")
        .expect("article should exist");
    assert_eq!(unchanged.status(), ArticleStatus::UnderReview);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_summary_reports_counts_to_editors_only(harness: TestHarness) {
    let reviewer = MemberId::new();
    let (article, reviews) = harness.article_under_review(&[reviewer, MemberId::new()]).await;
    let review = reviews
        .iter()
        .find(|entry| entry.reviewer() == reviewer)
        .expect("review should exist");

    harness
        .completion_service()
        .submit_review(SubmitReviewRequest::new(
            review.id(),
            reviewer,
            Recommendation::Accept,
            "verdict",
            "feedback",
        ))
        .await
        .expect("submission should succeed");

    let summary = harness
        .decision_service()
        .review_summary(article.id(), harness.editor)
        .await
        .expect("summary should succeed");
    assert_eq!(
        summary,
        ReviewSummary {
            completed: 1,
            pending: 1,
        }
    );

    let denied = harness
        .decision_service()
        .review_summary(article.id(), harness.author)
        .await;
    assert!(matches!(denied, Err(DecisionError::Unauthorized { .. })));
}
