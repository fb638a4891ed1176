use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Visitor edited one of the form inputs.
    FieldChanged {
        field: crate::Field,
        value: String,
    },
    /// Contact modal was opened.
    ModalOpened,
    /// Contact modal was closed (button, backdrop or Escape).
    ModalClosed,
    /// Visitor pressed the submit button.
    SubmitClicked { now: Instant },
    /// The delivery collaborator finished with a submission.
    DeliverySettled {
        submission_id: crate::SubmissionId,
        result: crate::DeliveryResultKind,
        now: Instant,
    },
    /// Stored theme flag read at startup.
    ThemeRestored(Option<String>),
    /// Visitor clicked the theme toggle.
    ThemeToggled,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
