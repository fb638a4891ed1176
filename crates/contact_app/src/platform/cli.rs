use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use contact_core::{FormPayload, HEADLINE};
use contact_engine::{DeliverySettings, EMAILJS_ENDPOINT};

use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "contact", about = "Contact form gate for the portfolio site")]
pub struct Cli {
    /// Directory holding the preference file.
    #[arg(long, env = "CONTACT_STATE_DIR", default_value = ".")]
    pub state_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate and deliver a contact message.
    Send {
        #[command(flatten)]
        form: FormArgs,
        #[command(flatten)]
        delivery: DeliveryArgs,
    },
    /// Run validation only and explain the verdict.
    Check {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Show or toggle the stored theme.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Type out the headline one character at a time.
    Banner {
        #[arg(long, default_value = HEADLINE)]
        text: String,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Args, Debug)]
pub struct FormArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub subject: String,
    #[arg(long, default_value = "")]
    pub message: String,
}

impl FormArgs {
    pub fn payload(&self) -> FormPayload {
        FormPayload::new(&self.name, &self.email, &self.subject, &self.message)
    }
}

#[derive(Args, Debug)]
pub struct DeliveryArgs {
    #[arg(long, env = "CONTACT_ENDPOINT", default_value = EMAILJS_ENDPOINT)]
    pub endpoint: String,
    #[arg(long, env = "CONTACT_SERVICE_ID")]
    pub service_id: Option<String>,
    #[arg(long, env = "CONTACT_TEMPLATE_ID")]
    pub template_id: Option<String>,
    #[arg(long, env = "CONTACT_PUBLIC_KEY")]
    pub public_key: Option<String>,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl DeliveryArgs {
    pub fn settings(&self) -> DeliverySettings {
        DeliverySettings {
            endpoint: self.endpoint.clone(),
            service_id: self.service_id.clone().unwrap_or_default(),
            template_id: self.template_id.clone().unwrap_or_default(),
            public_key: self.public_key.clone().unwrap_or_default(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..DeliverySettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_flags_build_settings() {
        let cli = Cli::try_parse_from([
            "contact",
            "send",
            "--name",
            "Jo",
            "--email",
            "jo@x.com",
            "--service-id",
            "svc",
            "--template-id",
            "tpl",
            "--public-key",
            "key",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        match cli.command {
            Command::Send { form, delivery } => {
                let payload = form.payload();
                assert_eq!(payload.name, "Jo");
                assert!(payload.subject.is_empty());
                let settings = delivery.settings();
                assert_eq!(settings.service_id, "svc");
                assert_eq!(settings.request_timeout, Duration::from_secs(5));
                assert!(settings.check().is_ok());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn theme_toggle_parses() {
        let cli = Cli::try_parse_from(["contact", "--log", "file", "theme", "toggle"]).unwrap();
        assert_eq!(cli.log, LogDestination::File);
        assert!(matches!(
            cli.command,
            Command::Theme {
                action: ThemeAction::Toggle
            }
        ));
    }
}
