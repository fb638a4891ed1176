use std::time::Duration;

use crate::gate::SubmissionOutcome;

/// Delay between a successful delivery and the modal closing.
pub const MODAL_CLOSE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub text: &'static str,
}

pub fn notice_for(outcome: SubmissionOutcome) -> Notice {
    let (severity, text) = match outcome {
        SubmissionOutcome::RateLimited => (
            NoticeSeverity::Error,
            "Too many submissions. Please wait a minute before trying again.",
        ),
        SubmissionOutcome::ValidationFailed => (
            NoticeSeverity::Error,
            "Please check your input. Make sure all fields are filled correctly and avoid suspicious content.",
        ),
        SubmissionOutcome::DeliveryFailed => (
            NoticeSeverity::Error,
            "Sorry, there was an error sending your message. Please try again.",
        ),
        SubmissionOutcome::Delivered => (
            NoticeSeverity::Success,
            "Thanks for connecting! I\u{2019}ll follow up with you shortly.",
        ),
    };
    Notice { severity, text }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
    Removed,
}

/// Phases a toast goes through, each paired with its offset from when it was shown.
pub const TOAST_TIMELINE: [(Duration, ToastPhase); 4] = [
    (Duration::ZERO, ToastPhase::Entering),
    (Duration::from_millis(10), ToastPhase::Visible),
    (Duration::from_millis(4000), ToastPhase::Leaving),
    (Duration::from_millis(4300), ToastPhase::Removed),
];

/// Phase of a toast `elapsed` after it was shown.
pub fn toast_phase_at(elapsed: Duration) -> ToastPhase {
    TOAST_TIMELINE
        .iter()
        .rev()
        .find(|(offset, _)| elapsed >= *offset)
        .map_or(ToastPhase::Entering, |(_, phase)| *phase)
}
