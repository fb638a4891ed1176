use crate::feedback::{notice_for, MODAL_CLOSE_DELAY};
use crate::{Admission, AppState, Effect, Msg, SubmissionOutcome, Theme};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { field, value } => {
            state.set_field(field, value);
            Vec::new()
        }
        Msg::ModalOpened => {
            state.set_modal_open(true);
            Vec::new()
        }
        Msg::ModalClosed => {
            state.set_modal_open(false);
            Vec::new()
        }
        Msg::SubmitClicked { now } => match state.begin_submission(now) {
            Admission::Dispatch(request) => {
                let submission_id = state.mark_in_flight();
                vec![Effect::Deliver {
                    submission_id,
                    request,
                }]
            }
            Admission::Rejected(outcome) => {
                let notice = notice_for(outcome);
                state.record_outcome(outcome, notice.clone());
                vec![Effect::ShowNotice(notice)]
            }
            // The submit control is disabled while a delivery is pending.
            Admission::Busy => Vec::new(),
        },
        Msg::DeliverySettled {
            submission_id,
            result,
            now,
        } => {
            if state.in_flight() != Some(submission_id) {
                return (state, Vec::new());
            }
            let outcome = state.settle(result, now);
            let notice = notice_for(outcome);
            state.record_outcome(outcome, notice.clone());
            let mut effects = vec![Effect::ShowNotice(notice)];
            if outcome == SubmissionOutcome::Delivered {
                state.reset_draft();
                effects.push(Effect::ResetForm);
                effects.push(Effect::CloseModalAfter(MODAL_CLOSE_DELAY));
            }
            effects
        }
        Msg::ThemeRestored(stored) => {
            let theme = Theme::from_preference(stored.as_deref());
            state.set_theme(theme);
            vec![Effect::ApplyTheme(theme)]
        }
        Msg::ThemeToggled => {
            let theme = state.theme().toggle();
            state.set_theme(theme);
            vec![Effect::ApplyTheme(theme), Effect::PersistTheme(theme)]
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
