//! Contact core: pure submission gate, state machine and view-model helpers.
mod effect;
mod feedback;
mod gate;
mod msg;
mod payload;
mod rate_limit;
mod state;
mod theme;
mod typing;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use feedback::{
    notice_for, toast_phase_at, Notice, NoticeSeverity, ToastPhase, MODAL_CLOSE_DELAY,
    TOAST_TIMELINE,
};
pub use gate::{Admission, DeliveryResultKind, SubmissionGate, SubmissionOutcome};
pub use msg::Msg;
pub use payload::{DeliveryRequest, Field, FormPayload};
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use state::{AppState, SubmissionId};
pub use theme::{load_theme, save_theme, PreferenceStore, Theme, THEME_KEY};
pub use typing::{typing_frames, TypingFrame, HEADLINE, TYPING_INTERVAL};
pub use update::update;
pub use validate::{
    has_suspicious_characters, is_valid_email, validate, ValidationError, MAX_MESSAGE_CHARS,
    MAX_NAME_CHARS, MAX_SUBJECT_CHARS, SPAM_KEYWORDS,
};
pub use view_model::{AppViewModel, SUBMIT_LABEL, SUBMIT_LABEL_BUSY};
