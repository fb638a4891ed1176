#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use contact_core::DeliveryRequest;
use contact_engine::{Deliverer, DeliveryError, FailureKind};

/// Deliverer that answers from a script and records what it was sent.
/// Once the script runs out every delivery succeeds.
#[derive(Clone, Default)]
pub struct ScriptedDeliverer {
    script: Arc<Mutex<VecDeque<bool>>>,
    sent: Arc<Mutex<Vec<DeliveryRequest>>>,
}

impl ScriptedDeliverer {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn with_script(outcomes: &[bool]) -> Self {
        let deliverer = Self::default();
        deliverer.script.lock().unwrap().extend(outcomes);
        deliverer
    }

    pub fn sent(&self) -> Vec<DeliveryRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Deliverer for ScriptedDeliverer {
    async fn deliver(&self, request: &DeliveryRequest) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(request.clone());
        let ok = self.script.lock().unwrap().pop_front().unwrap_or(true);
        if ok {
            Ok(())
        } else {
            Err(DeliveryError {
                kind: FailureKind::HttpStatus(503),
                message: "service unavailable".to_string(),
            })
        }
    }
}
