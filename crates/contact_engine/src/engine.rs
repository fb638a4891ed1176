use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use contact_core::{DeliveryRequest, SubmissionId};
use site_logging::{site_debug, site_error};

use crate::{Deliverer, EngineEvent};

enum EngineCommand {
    Deliver {
        submission_id: SubmissionId,
        request: DeliveryRequest,
    },
}

/// Runs deliveries on a background tokio runtime and reports completions over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(deliverer: Arc<dyn Deliverer>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    site_error!("Failed to start delivery runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let deliverer = deliverer.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(deliverer.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queues a delivery. Returns false when the runtime thread is gone and
    /// no completion event will ever arrive.
    pub fn deliver(&self, submission_id: SubmissionId, request: DeliveryRequest) -> bool {
        let sent = self.cmd_tx.send(EngineCommand::Deliver {
            submission_id,
            request,
        });
        if sent.is_err() {
            site_error!("Delivery runtime unavailable; submission {} dropped", submission_id);
        }
        sent.is_ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks for the next event, up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    deliverer: &dyn Deliverer,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Deliver {
            submission_id,
            request,
        } => {
            site_debug!("Delivering submission {}", submission_id);
            let result = deliverer.deliver(&request).await;
            let _ = event_tx.send(EngineEvent::DeliveryCompleted {
                submission_id,
                result,
            });
        }
    }
}
