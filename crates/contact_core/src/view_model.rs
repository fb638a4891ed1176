use crate::{FormPayload, Notice, SubmissionOutcome, Theme};

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SUBMIT_LABEL_BUSY: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub theme: Theme,
    pub theme_icon: &'static str,
    pub modal_open: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub notice: Option<Notice>,
    pub last_outcome: Option<SubmissionOutcome>,
    pub draft: FormPayload,
    pub dirty: bool,
}
