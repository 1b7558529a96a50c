//! Service tests for review completion.

use rstest::{fixture, rstest};

use super::support::TestHarness;
use crate::editorial::{
    domain::{
        ArticleStatus, AttachmentDescriptor, EditorialDomainError, MemberId, NotificationKind,
        Recommendation,
    },
    ports::{DeliveryStatus, ReviewSummary, WorkflowRepository},
    services::{CompletionError, SubmitReviewRequest},
};

#[fixture]
fn harness() -> TestHarness {
    TestHarness::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_completes_review_with_attachments_and_counter(harness: TestHarness) {
    let reviewer = MemberId::new();
    let (article, reviews) = harness.article_under_review(&[reviewer]).await;
    let review = reviews.first().expect("one review should exist");
    let descriptor = AttachmentDescriptor::new("reviews/annotated.pdf", "Annotated manuscript")
        .expect("valid descriptor");

    let completed = harness
        .completion_service()
        .submit_review(
            SubmitReviewRequest::new(
                review.id(),
                reviewer,
                Recommendation::MinorRevision,
                "Argument holds; citations are thin",
                "Please expand the bibliography",
            )
            .with_confidential_comments("Second opinion not needed")
            .with_attachments([descriptor]),
        )
        .await
        .expect("review submission should succeed");

    assert!(completed.is_complete());
    assert_eq!(
        completed.recommendation(),
        Some(Recommendation::MinorRevision)
    );

    let stored = harness
        .repository
        .find_review(review.id())
        .await
        .expect("lookup should succeed")
        .expect("review should exist");
    assert!(stored.is_complete());

    let attachments = harness
        .repository
        .attachments_for_review(review.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(attachments.len(), 1);
    let attachment = attachments.first().expect("one attachment should exist");
    assert_eq!(attachment.uploaded_by(), reviewer);

    assert_eq!(
        harness
            .repository
            .completed_review_count(reviewer)
            .await
            .expect("lookup should succeed"),
        1
    );
    let attempts = harness.notifications.attempts();
    let completion_attempt = attempts
        .iter()
        .find(|attempt| attempt.kind() == NotificationKind::ReviewCompleted)
        .expect("completion attempt should be recorded");
    assert_eq!(completion_attempt.event().review_id(), Some(review.id()));
    assert_eq!(completion_attempt.event().article_id(), article.id());

    // Completing a review never moves the article itself.
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
async fn second_submission_is_rejected_and_first_verdict_survives(harness: TestHarness) {
    let reviewer = MemberId::new();
    let (_, reviews) = harness.article_under_review(&[reviewer]).await;
    let review = reviews.first().expect("one review should exist");

    harness
        .completion_service()
        .submit_review(SubmitReviewRequest::new(
            review.id(),
            reviewer,
            Recommendation::Reject,
            "first verdict",
            "first feedback",
        ))
        .await
        .expect("first submission should succeed");

    let result = harness
        .completion_service()
        .submit_review(SubmitReviewRequest::new(
            review.id(),
            reviewer,
            Recommendation::Accept,
            "second verdict",
            "second feedback",
        ))
        .await;

    assert!(matches!(
        result,
        Err(CompletionError::Domain(
            EditorialDomainError::ReviewAlreadyComplete(id)
        )) if id == review.id()
    ));

    let stored = harness
        .repository
        .find_review(review.id())
        .await
        .expect("lookup should succeed")
        .expect("review should exist");
    assert_eq!(stored.recommendation(), Some(Recommendation::Reject));
    assert_eq!(stored.comments_to_editor(), Some("first verdict"));
    assert_eq!(
        harness
            .repository
            .completed_review_count(reviewer)
            .await
            .expect("lookup should succeed"),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_assigned_reviewer_may_submit(harness: TestHarness) {
    let reviewer = MemberId::new();
    let intruder = MemberId::new();
    let (_, reviews) = harness.article_under_review(&[reviewer]).await;
    let review = reviews.first().expect("one review should exist");

    let result = harness
        .completion_service()
        .submit_review(SubmitReviewRequest::new(
            review.id(),
            intruder,
            Recommendation::Accept,
            "verdict",
            "feedback",
        ))
        .await;

    assert!(matches!(
        result,
        Err(CompletionError::Domain(
            EditorialDomainError::NotAssignedReviewer { member, .. }
        )) if member == intruder
    ));

    let stored = harness
        .repository
        .find_review(review.id())
        .await
        .expect("lookup should succeed")
        .expect("review should exist");
    assert!(!stored.is_complete());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_survives_notification_failure(harness: TestHarness) {
    let reviewer = MemberId::new();
    let (_, reviews) = harness.article_under_review(&[reviewer]).await;
    let review = reviews.first().expect("one review should exist");
    harness.notifications.set_failing(true);

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
        .expect("submission should succeed despite notification failure");

    let stored = harness
        .repository
        .find_review(review.id())
        .await
        .expect("lookup should succeed")
        .expect("review should exist");
    assert!(stored.is_complete());

    let attempts = harness.notifications.attempts();
    let completed = attempts
        .iter()
        .find(|attempt| attempt.kind() == NotificationKind::ReviewCompleted)
        .expect("completion attempt should be recorded");
    assert_eq!(completed.status(), DeliveryStatus::Failed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_counts_follow_completions(harness: TestHarness) {
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
            Recommendation::Accept,
            "verdict",
            "feedback",
        ))
        .await
        .expect("submission should succeed");

    let summary = harness
        .repository
        .review_summary(article.id())
        .await
        .expect("summary should succeed");
    assert_eq!(
        summary,
        ReviewSummary {
            completed: 1,
            pending: 1,
        }
    );
}
