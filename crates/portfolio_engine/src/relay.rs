use portfolio_core::{DispatchStage, RelayPayload};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use site_logging::site_debug;

use crate::config::{RelayConfig, RelaySettings};
use crate::{RelayError, RelayFailureKind};

/// Sends one templated email through the relay service.
#[async_trait::async_trait]
pub trait RelayClient: Send + Sync {
    async fn dispatch(
        &self,
        stage: DispatchStage,
        payload: &RelayPayload,
    ) -> Result<(), RelayError>;
}

#[derive(Debug, Serialize)]
struct RelayRequestBody<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
}

/// HTTP client for the EmailJS REST endpoint.
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    config: RelayConfig,
    client: reqwest::Client,
}

impl EmailJsRelay {
    pub fn new(config: RelayConfig, settings: RelaySettings) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RelayError::new(RelayFailureKind::Network, err.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl RelayClient for EmailJsRelay {
    async fn dispatch(
        &self,
        stage: DispatchStage,
        payload: &RelayPayload,
    ) -> Result<(), RelayError> {
        let body = RelayRequestBody {
            service_id: &self.config.service_id,
            template_id: self.config.template_for(stage),
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: &payload.from_name,
                from_email: &payload.from_email,
                message: &payload.message,
            },
        };
        let body = serde_json::to_vec(&body)
            .map_err(|err| RelayError::new(RelayFailureKind::InvalidRequest, err.to_string()))?;

        site_debug!("relay {} via {}", stage.label(), self.config.endpoint);
        let response = self
            .client
            .post(self.config.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let message = if detail.trim().is_empty() {
                status.to_string()
            } else {
                format!("{status}: {}", detail.trim())
            };
            return Err(RelayError::new(
                RelayFailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }
        Ok(())
    }
}

/// Stand-in used when no relay credentials are configured: every dispatch fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredRelay;

#[async_trait::async_trait]
impl RelayClient for UnconfiguredRelay {
    async fn dispatch(
        &self,
        stage: DispatchStage,
        _payload: &RelayPayload,
    ) -> Result<(), RelayError> {
        Err(RelayError::new(
            RelayFailureKind::NotConfigured,
            format!("no relay credentials for {}", stage.label()),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        return RelayError::new(RelayFailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return RelayError::new(RelayFailureKind::InvalidRequest, err.to_string());
    }
    RelayError::new(RelayFailureKind::Network, err.to_string())
}
