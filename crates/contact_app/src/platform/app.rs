use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use contact_core::{
    has_suspicious_characters, typing_frames, update, validate, AppState, DeliveryResultKind,
    Field, FormPayload, Msg, PreferenceStore, SubmissionOutcome, THEME_KEY, TYPING_INTERVAL,
};
use contact_engine::{EmailJsDeliverer, EngineHandle};
use log::LevelFilter;
use site_logging::{site_error, site_trace};

use super::cli::{Cli, Command, DeliveryArgs, FormArgs, ThemeAction};
use super::effects::EffectRunner;
use super::logging;
use super::persistence::PreferenceFile;
use super::render;

/// Grace period on top of the request timeout before a delivery is given up on.
const DELIVERY_GRACE: Duration = Duration::from_secs(5);

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    logging::initialize(cli.log, level);

    match cli.command {
        Command::Send { form, delivery } => send(cli.state_dir, &form, &delivery),
        Command::Check { form } => Ok(check(&form.payload())),
        Command::Theme { action } => Ok(theme(cli.state_dir, action)),
        Command::Banner { text } => banner(&text),
    }
}

/// Single owner of the page-session state; every change goes through `update`.
struct Session<P> {
    state: AppState,
    runner: EffectRunner<P>,
}

impl<P: PreferenceStore> Session<P> {
    fn new(runner: EffectRunner<P>) -> Self {
        let mut session = Self {
            state: AppState::new(),
            runner,
        };
        let stored = session.runner.prefs().get(THEME_KEY);
        session.dispatch(Msg::ThemeRestored(stored));
        session
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            site_trace!("{}", render::status_line(&state.view()));
        }
        self.state = state;
        for follow_up in self.runner.run(effects) {
            self.dispatch(follow_up);
        }
    }

    fn fill(&mut self, payload: &FormPayload) {
        for field in Field::ALL {
            self.dispatch(Msg::FieldChanged {
                field,
                value: payload.get(field).to_string(),
            });
        }
    }
}

fn send(state_dir: PathBuf, form: &FormArgs, delivery: &DeliveryArgs) -> anyhow::Result<ExitCode> {
    let deliverer = EmailJsDeliverer::new(delivery.settings())?;
    let wait = deliverer.settings().request_timeout + DELIVERY_GRACE;
    let engine = EngineHandle::new(Arc::new(deliverer));
    let prefs = PreferenceFile::load(state_dir);
    let mut session = Session::new(EffectRunner::new(Some(engine), prefs));

    session.dispatch(Msg::ModalOpened);
    session.fill(&form.payload());
    session.dispatch(Msg::SubmitClicked {
        now: Instant::now(),
    });

    while let Some(submission_id) = session.state.in_flight() {
        let msg = session.runner.wait_for_delivery(wait).unwrap_or_else(|| {
            site_error!("No delivery result within {:?}", wait);
            Msg::DeliverySettled {
                submission_id,
                result: DeliveryResultKind::Failed,
                now: Instant::now(),
            }
        });
        session.dispatch(msg);
    }

    Ok(exit_code(session.state.view().last_outcome))
}

fn exit_code(outcome: Option<SubmissionOutcome>) -> ExitCode {
    if outcome == Some(SubmissionOutcome::Delivered) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn check(payload: &FormPayload) -> ExitCode {
    if has_suspicious_characters(&payload.screening_text()) {
        println!("note: unusual punctuation present (not enforced)");
    }
    match validate(payload) {
        Ok(()) => {
            println!("ok");
            ExitCode::SUCCESS
        }
        Err(reason) => {
            println!("rejected: {reason}");
            ExitCode::FAILURE
        }
    }
}

fn theme(state_dir: PathBuf, action: ThemeAction) -> ExitCode {
    let prefs = PreferenceFile::load(state_dir);
    let mut session = Session::new(EffectRunner::new(None, prefs));
    if let ThemeAction::Toggle = action {
        session.dispatch(Msg::ThemeToggled);
    }
    let view = session.state.view();
    println!("{} ({})", view.theme.as_str(), view.theme_icon);
    ExitCode::SUCCESS
}

fn banner(text: &str) -> anyhow::Result<ExitCode> {
    let started = Instant::now();
    let mut stdout = std::io::stdout().lock();
    for frame in typing_frames(text, TYPING_INTERVAL) {
        if let Some(remaining) = frame.at.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
        write!(stdout, "\r{}", frame.text)?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(ExitCode::SUCCESS)
}
