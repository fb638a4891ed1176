mod support;

use std::time::{Duration, Instant};

use contact_core::{FormPayload, RateLimitConfig, SubmissionOutcome};
use contact_engine::ContactSubmitter;
use support::ScriptedDeliverer;

fn valid() -> FormPayload {
    FormPayload::new("Jo", "jo@x.com", "Hi", "Hello there")
}

fn submitter(deliverer: ScriptedDeliverer) -> ContactSubmitter<ScriptedDeliverer> {
    ContactSubmitter::new(deliverer, RateLimitConfig::default())
}

#[tokio::test]
async fn end_to_end_delivery_counts_once() {
    let deliverer = ScriptedDeliverer::succeeding();
    let mut submitter = submitter(deliverer.clone());

    let outcome = submitter.attempt_submit(&valid(), Instant::now()).await;

    assert_eq!(outcome, SubmissionOutcome::Delivered);
    assert_eq!(submitter.gate().limiter().submission_count(), 1);
    assert!(!submitter.gate().is_busy());
    let sent = deliverer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from_name, "Jo");
    assert_eq!(sent[0].from_email, "jo@x.com");
}

#[tokio::test]
async fn missing_field_never_reaches_delivery() {
    let deliverer = ScriptedDeliverer::succeeding();
    let mut submitter = submitter(deliverer.clone());
    let payload = FormPayload {
        subject: String::new(),
        ..valid()
    };

    let outcome = submitter.attempt_submit(&payload, Instant::now()).await;

    assert_eq!(outcome, SubmissionOutcome::ValidationFailed);
    assert!(deliverer.sent().is_empty());
    assert_eq!(submitter.gate().limiter().submission_count(), 0);
}

#[tokio::test]
async fn single_link_is_delivered() {
    let deliverer = ScriptedDeliverer::succeeding();
    let mut submitter = submitter(deliverer.clone());
    let payload = FormPayload {
        message: "My work: https://example.com/me".to_string(),
        ..valid()
    };

    let outcome = submitter.attempt_submit(&payload, Instant::now()).await;

    assert_eq!(outcome, SubmissionOutcome::Delivered);
    assert_eq!(deliverer.sent().len(), 1);
}

#[tokio::test]
async fn fourth_attempt_waits_for_the_window() {
    let deliverer = ScriptedDeliverer::succeeding();
    let mut submitter = submitter(deliverer.clone());
    let start = Instant::now();

    for second in 0..3 {
        let now = start + Duration::from_secs(second);
        assert_eq!(
            submitter.attempt_submit(&valid(), now).await,
            SubmissionOutcome::Delivered
        );
    }
    assert_eq!(
        submitter
            .attempt_submit(&valid(), start + Duration::from_secs(59))
            .await,
        SubmissionOutcome::RateLimited
    );
    assert_eq!(deliverer.sent().len(), 3);

    assert_eq!(
        submitter
            .attempt_submit(&valid(), start + Duration::from_millis(60_001))
            .await,
        SubmissionOutcome::Delivered
    );
    assert_eq!(submitter.gate().limiter().submission_count(), 1);
}

#[tokio::test]
async fn validation_failures_do_not_block_valid_attempts() {
    let deliverer = ScriptedDeliverer::succeeding();
    let mut submitter = submitter(deliverer.clone());
    let now = Instant::now();
    let spam = FormPayload {
        message: "CONGRATULATIONS winner".to_string(),
        ..valid()
    };

    for _ in 0..3 {
        assert_eq!(
            submitter.attempt_submit(&spam, now).await,
            SubmissionOutcome::ValidationFailed
        );
    }
    for _ in 0..3 {
        assert_eq!(
            submitter.attempt_submit(&valid(), now).await,
            SubmissionOutcome::Delivered
        );
    }
    assert_eq!(deliverer.sent().len(), 3);
}

#[tokio::test]
async fn failed_delivery_is_retryable_and_uncounted() {
    let deliverer = ScriptedDeliverer::with_script(&[false]);
    let mut submitter = submitter(deliverer.clone());
    let now = Instant::now();

    assert_eq!(
        submitter.attempt_submit(&valid(), now).await,
        SubmissionOutcome::DeliveryFailed
    );
    assert_eq!(submitter.gate().limiter().submission_count(), 0);
    assert!(!submitter.gate().is_busy());

    assert_eq!(
        submitter.attempt_submit(&valid(), now).await,
        SubmissionOutcome::Delivered
    );
    assert_eq!(submitter.gate().limiter().submission_count(), 1);
}

#[tokio::test]
async fn repeated_failures_never_rate_limit() {
    let deliverer = ScriptedDeliverer::with_script(&[false, false, false, false]);
    let mut submitter = submitter(deliverer.clone());
    let now = Instant::now();

    for _ in 0..4 {
        assert_eq!(
            submitter.attempt_submit(&valid(), now).await,
            SubmissionOutcome::DeliveryFailed
        );
    }
    assert_eq!(deliverer.sent().len(), 4);
}
