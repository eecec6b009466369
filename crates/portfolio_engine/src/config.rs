use std::time::Duration;

use portfolio_core::DispatchStage;
use thiserror::Error;
use url::Url;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub const ENV_SERVICE_ID: &str = "PORTFOLIO_RELAY_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "PORTFOLIO_RELAY_TEMPLATE_ID";
pub const ENV_NOTIFICATION_TEMPLATE_ID: &str = "PORTFOLIO_RELAY_NOTIFICATION_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "PORTFOLIO_RELAY_PUBLIC_KEY";
pub const ENV_ENDPOINT: &str = "PORTFOLIO_RELAY_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid relay endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },
}

/// Deployment identifiers of the email relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub endpoint: Url,
    pub service_id: String,
    /// Template of the acknowledgment sent to the person who wrote in.
    pub applicant_template_id: String,
    /// Template of the notification sent to the site owner.
    pub admin_template_id: String,
    pub public_key: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let endpoint_raw = lookup(ENV_ENDPOINT)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_RELAY_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw).map_err(|err| ConfigError::InvalidEndpoint {
            value: endpoint_raw.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            endpoint,
            service_id: required(ENV_SERVICE_ID)?,
            applicant_template_id: required(ENV_TEMPLATE_ID)?,
            admin_template_id: required(ENV_NOTIFICATION_TEMPLATE_ID)?,
            public_key: required(ENV_PUBLIC_KEY)?,
        })
    }

    pub fn template_for(&self, stage: DispatchStage) -> &str {
        match stage {
            DispatchStage::ApplicantAcknowledgment => &self.applicant_template_id,
            DispatchStage::AdministratorNotification => &self.admin_template_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}
