use std::time::Duration;

use contact_core::DeliveryRequest;
use serde::Serialize;

use crate::{DeliveryError, FailureKind, SettingsError};

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Static configuration for the delivery collaborator.
#[derive(Debug, Clone)]
pub struct DeliverySettings {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            endpoint: EMAILJS_ENDPOINT.to_string(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl DeliverySettings {
    pub fn check(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("endpoint", &self.endpoint),
            ("service_id", &self.service_id),
            ("template_id", &self.template_id),
            ("public_key", &self.public_key),
        ] {
            if value.trim().is_empty() {
                return Err(SettingsError::Missing(name));
            }
        }
        Ok(())
    }
}

/// Sends a validated contact message somewhere a human will read it.
#[async_trait::async_trait]
pub trait Deliverer: Send + Sync {
    async fn deliver(&self, request: &DeliveryRequest) -> Result<(), DeliveryError>;
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct SendBody<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// Delivers through the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsDeliverer {
    settings: DeliverySettings,
    client: reqwest::Client,
}

impl EmailJsDeliverer {
    pub fn new(settings: DeliverySettings) -> Result<Self, SettingsError> {
        settings.check()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SettingsError::Client(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &DeliverySettings {
        &self.settings
    }

    fn body<'a>(&'a self, request: &'a DeliveryRequest) -> SendBody<'a> {
        SendBody {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: TemplateParams {
                from_name: &request.from_name,
                from_email: &request.from_email,
                subject: &request.subject,
                message: &request.message,
            },
        }
    }
}

#[async_trait::async_trait]
impl Deliverer for EmailJsDeliverer {
    async fn deliver(&self, request: &DeliveryRequest) -> Result<(), DeliveryError> {
        let url = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| DeliveryError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

        let response = self
            .client
            .post(url)
            .json(&self.body(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DeliveryError::new(
                FailureKind::HttpStatus(status.as_u16()),
                if detail.is_empty() {
                    status.to_string()
                } else {
                    detail
                },
            ));
        }
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DeliveryError {
    if err.is_timeout() {
        return DeliveryError::new(FailureKind::Timeout, err.to_string());
    }
    DeliveryError::new(FailureKind::Network, err.to_string())
}
