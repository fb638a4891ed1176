use std::time::Instant;

use crate::feedback::Notice;
use crate::gate::{Admission, DeliveryResultKind, SubmissionGate, SubmissionOutcome};
use crate::payload::{Field, FormPayload};
use crate::rate_limit::RateLimitConfig;
use crate::theme::Theme;
use crate::view_model::{AppViewModel, SUBMIT_LABEL, SUBMIT_LABEL_BUSY};

pub type SubmissionId = u64;

/// Page-session model: form draft, submission gate, theme and feedback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    gate: SubmissionGate,
    draft: FormPayload,
    in_flight: Option<SubmissionId>,
    last_submission_id: SubmissionId,
    last_outcome: Option<SubmissionOutcome>,
    notice: Option<Notice>,
    theme: Theme,
    modal_open: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate_limit(config: RateLimitConfig) -> Self {
        Self {
            gate: SubmissionGate::new(config),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.in_flight.is_some();
        AppViewModel {
            theme: self.theme,
            theme_icon: self.theme.icon(),
            modal_open: self.modal_open,
            submit_enabled: !busy,
            submit_label: if busy { SUBMIT_LABEL_BUSY } else { SUBMIT_LABEL },
            notice: self.notice.clone(),
            last_outcome: self.last_outcome,
            draft: self.draft.clone(),
            dirty: self.dirty,
        }
    }

    pub fn gate(&self) -> &SubmissionGate {
        &self.gate
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_field(&mut self, field: Field, value: String) {
        if self.draft.get(field) != value {
            self.draft.set(field, value);
            self.dirty = true;
        }
    }

    pub(crate) fn set_modal_open(&mut self, open: bool) {
        if self.modal_open != open {
            self.modal_open = open;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_submission(&mut self, now: Instant) -> Admission {
        self.gate.begin(&self.draft, now)
    }

    pub(crate) fn mark_in_flight(&mut self) -> SubmissionId {
        self.last_submission_id += 1;
        self.in_flight = Some(self.last_submission_id);
        self.dirty = true;
        self.last_submission_id
    }

    pub(crate) fn settle(&mut self, result: DeliveryResultKind, now: Instant) -> SubmissionOutcome {
        self.in_flight = None;
        self.gate.settle(result, now)
    }

    pub(crate) fn record_outcome(&mut self, outcome: SubmissionOutcome, notice: Notice) {
        self.last_outcome = Some(outcome);
        self.notice = Some(notice);
        self.dirty = true;
    }

    pub(crate) fn reset_draft(&mut self) {
        self.draft = FormPayload::default();
        self.dirty = true;
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.dirty = true;
        }
    }
}
