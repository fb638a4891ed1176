use std::time::Instant;

use contact_core::{
    Admission, DeliveryResultKind, FormPayload, RateLimitConfig, SubmissionGate,
    SubmissionOutcome,
};
use site_logging::{site_info, site_warn};

use crate::Deliverer;

/// Runs complete submission attempts: gate check, delivery, settlement.
pub struct ContactSubmitter<D> {
    gate: SubmissionGate,
    deliverer: D,
}

impl<D: Deliverer> ContactSubmitter<D> {
    pub fn new(deliverer: D, config: RateLimitConfig) -> Self {
        Self {
            gate: SubmissionGate::new(config),
            deliverer,
        }
    }

    pub fn gate(&self) -> &SubmissionGate {
        &self.gate
    }

    pub fn deliverer(&self) -> &D {
        &self.deliverer
    }

    pub async fn attempt_submit(&mut self, payload: &FormPayload, now: Instant) -> SubmissionOutcome {
        let Self { gate, deliverer } = self;

        let request = match gate.begin(payload, now) {
            Admission::Dispatch(request) => request,
            Admission::Rejected(outcome) => return outcome,
            Admission::Busy => {
                site_warn!("Submission attempted while another is in flight");
                return SubmissionOutcome::RateLimited;
            }
        };

        let in_flight = InFlight::new(gate);
        let result = match deliverer.deliver(&request).await {
            Ok(()) => {
                site_info!("Contact message from {} delivered", request.from_email);
                DeliveryResultKind::Success
            }
            Err(err) => {
                site_warn!("Contact message delivery failed: {}", err);
                DeliveryResultKind::Failed
            }
        };
        in_flight.settle(result, now)
    }
}

/// Clears the busy flag if the attempt is dropped mid-delivery.
struct InFlight<'a> {
    gate: Option<&'a mut SubmissionGate>,
}

impl<'a> InFlight<'a> {
    fn new(gate: &'a mut SubmissionGate) -> Self {
        Self { gate: Some(gate) }
    }

    fn settle(mut self, result: DeliveryResultKind, now: Instant) -> SubmissionOutcome {
        match self.gate.take() {
            Some(gate) => gate.settle(result, now),
            None => SubmissionOutcome::DeliveryFailed,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(gate) = self.gate.take() {
            site_warn!("Submission abandoned before delivery settled");
            gate.abandon();
        }
    }
}
