use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Deliver {
        submission_id: crate::SubmissionId,
        request: crate::DeliveryRequest,
    },
    ShowNotice(crate::Notice),
    ResetForm,
    CloseModalAfter(Duration),
    ApplyTheme(crate::Theme),
    PersistTheme(crate::Theme),
}
