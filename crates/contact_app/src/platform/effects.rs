use std::time::{Duration, Instant};

use contact_core::{save_theme, DeliveryResultKind, Effect, Msg, PreferenceStore};
use contact_engine::{EngineEvent, EngineHandle};
use site_logging::{site_debug, site_error, site_info, site_warn};

use super::render;

/// Executes effects produced by `update` and turns engine events back into messages.
pub struct EffectRunner<P> {
    engine: Option<EngineHandle>,
    prefs: P,
}

impl<P: PreferenceStore> EffectRunner<P> {
    pub fn new(engine: Option<EngineHandle>, prefs: P) -> Self {
        Self {
            engine,
            prefs,
        }
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// Runs `effects` in order and returns any messages they produce immediately.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Deliver {
                    submission_id,
                    request,
                } => {
                    site_logging::set_submission_id(submission_id);
                    site_info!(
                        "Deliver submission_id={} from={} message_len={}",
                        submission_id,
                        request.from_email,
                        request.message.chars().count()
                    );
                    let queued = match &self.engine {
                        Some(engine) => engine.deliver(submission_id, request),
                        None => {
                            site_error!("No delivery engine configured");
                            false
                        }
                    };
                    if !queued {
                        follow_ups.push(Msg::DeliverySettled {
                            submission_id,
                            result: DeliveryResultKind::Failed,
                            now: Instant::now(),
                        });
                    }
                }
                Effect::ShowNotice(notice) => {
                    println!("{}", render::notice_line(&notice));
                }
                Effect::ResetForm => site_debug!("Form reset"),
                Effect::CloseModalAfter(delay) => {
                    site_debug!("Contact modal closes in {:?}", delay);
                }
                Effect::ApplyTheme(theme) => site_debug!("Theme applied: {}", theme.as_str()),
                Effect::PersistTheme(theme) => save_theme(&mut self.prefs, theme),
            }
        }
        follow_ups
    }

    /// Blocks up to `timeout` for the next delivery result.
    pub fn wait_for_delivery(&self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.as_ref()?.recv_timeout(timeout)?;
        match event {
            EngineEvent::DeliveryCompleted {
                submission_id,
                result,
            } => {
                site_logging::set_submission_id(submission_id);
                let result = match result {
                    Ok(()) => DeliveryResultKind::Success,
                    Err(err) => {
                        site_warn!("Submission {} failed: {}", submission_id, err);
                        DeliveryResultKind::Failed
                    }
                };
                Some(Msg::DeliverySettled {
                    submission_id,
                    result,
                    now: Instant::now(),
                })
            }
        }
    }
}
