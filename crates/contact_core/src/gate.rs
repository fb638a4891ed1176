use std::time::Instant;

use site_logging::{site_info, site_warn};

use crate::payload::{DeliveryRequest, FormPayload};
use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::validate::validate;

/// What the visitor is told after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    RateLimited,
    ValidationFailed,
    DeliveryFailed,
    Delivered,
}

/// How the delivery collaborator finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResultKind {
    Success,
    Failed,
}

/// Result of the synchronous half of an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Checks passed; the request must be delivered and then settled.
    Dispatch(DeliveryRequest),
    /// Turned away before delivery. Nothing was counted.
    Rejected(SubmissionOutcome),
    /// A delivery is already in flight.
    Busy,
}

/// Decides whether a submission may reach the delivery collaborator.
///
/// An attempt is split in two so the caller owns the suspension point:
/// `begin` runs the rate-limit check and validation and marks the gate busy,
/// `settle` consumes the delivery result and counts successes only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionGate {
    limiter: RateLimiter,
    busy: bool,
}

impl SubmissionGate {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiter: RateLimiter::new(config),
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn begin(&mut self, payload: &FormPayload, now: Instant) -> Admission {
        if self.busy {
            return Admission::Busy;
        }

        if !self.limiter.check(now) {
            site_info!(
                "Submission rate limited: {} deliveries in current window",
                self.limiter.active_count(now)
            );
            return Admission::Rejected(SubmissionOutcome::RateLimited);
        }

        if let Err(reason) = validate(payload) {
            site_info!("Submission rejected: {}", reason);
            return Admission::Rejected(SubmissionOutcome::ValidationFailed);
        }

        self.busy = true;
        Admission::Dispatch(payload.to_request())
    }

    pub fn settle(&mut self, result: DeliveryResultKind, now: Instant) -> SubmissionOutcome {
        if !self.busy {
            site_warn!("Delivery settled with no submission in flight; ignoring count");
        }
        let was_busy = std::mem::replace(&mut self.busy, false);
        match result {
            DeliveryResultKind::Success => {
                if was_busy {
                    self.limiter.record(now);
                }
                SubmissionOutcome::Delivered
            }
            DeliveryResultKind::Failed => SubmissionOutcome::DeliveryFailed,
        }
    }

    /// Clears the busy flag for an attempt whose delivery will never settle.
    pub fn abandon(&mut self) {
        self.busy = false;
    }
}
