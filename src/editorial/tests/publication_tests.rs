//! Service tests for publication and retraction.

use rstest::{fixture, rstest};

use super::support::TestHarness;
use crate::editorial::{
    domain::{
        Article, ArticleStatus, EditorialDecision, EditorialDomainError, MemberId,
        NotificationKind,
    },
    ports::WorkflowRepository,
    services::{PublicationError, RecordDecisionRequest},
};

#[fixture]
fn harness() -> TestHarness {
    TestHarness::new()
}

async fn accepted_article(harness: &TestHarness) -> Article {
    let (article, _) = harness.article_under_review(&[MemberId::new()]).await;
    harness
        .decision_service()
        .record_decision(RecordDecisionRequest::new(
            article.id(),
            harness.editor,
            EditorialDecision::Accepted,
            "Accepted for the next issue",
        ))
        .await
        .expect("decision should succeed")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publish_stamps_the_publication_date(harness: TestHarness) {
    let article = accepted_article(&harness).await;

    let published = harness
        .publication_service()
        .publish(article.id(), harness.editor)
        .await
        .expect("publish should succeed");

    assert_eq!(published.status(), ArticleStatus::Published);
    assert!(published.publication_date().is_some());
    assert_eq!(
        harness
            .notifications
            .attempts_of_kind(NotificationKind::Publication),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unaccepted_article_cannot_be_published(harness: TestHarness) {
    let article = harness.submitted_article().await;

    let result = harness
        .publication_service()
        .publish(article.id(), harness.editor)
        .await;

    assert!(matches!(
        result,
        Err(PublicationError::Domain(
            EditorialDomainError::InvalidStatusTransition {
                from: ArticleStatus::Submitted,
                to: ArticleStatus::Published,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn published_article_can_be_retracted(harness: TestHarness) {
    let article = accepted_article(&harness).await;
    harness
        .publication_service()
        .publish(article.id(), harness.editor)
        .await
        .expect("publish should succeed");

    let retracted = harness
        .publication_service()
        .retract(article.id(), harness.editor)
        .await
        .expect("retraction should succeed");

    assert_eq!(retracted.status(), ArticleStatus::Retracted);
    let stored = harness
        .repository
        .find_article(article.id())
        .await
        .expect("lookup should succeed")
        .expect("article should exist");
    assert_eq!(stored.status(), ArticleStatus::Retracted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unpublished_article_cannot_be_retracted(harness: TestHarness) {
    let article = accepted_article(&harness).await;

    let result = harness
        .publication_service()
        .retract(article.id(), harness.editor)
        .await;

    assert!(matches!(
        result,
        Err(PublicationError::Domain(
            EditorialDomainError::InvalidStatusTransition {
                from: ArticleStatus::Accepted,
                to: ArticleStatus::Retracted,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_editor_caller_cannot_publish(harness: TestHarness) {
    let article = accepted_article(&harness).await;

    let result = harness
        .publication_service()
        .publish(article.id(), harness.author)
        .await;

    assert!(matches!(
        result,
        Err(PublicationError::Unauthorized { member, .. }) if member == harness.author
    ));
}
