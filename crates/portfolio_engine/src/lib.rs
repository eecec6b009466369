//! Portfolio engine: relay transport, timers and page geometry.
mod config;
mod engine;
mod relay;
mod types;
mod viewport;

pub use config::{
    ConfigError, RelayConfig, RelaySettings, DEFAULT_RELAY_ENDPOINT, ENV_ENDPOINT,
    ENV_NOTIFICATION_TEMPLATE_ID, ENV_PUBLIC_KEY, ENV_SERVICE_ID, ENV_TEMPLATE_ID,
};
pub use engine::EngineHandle;
pub use relay::{EmailJsRelay, RelayClient, UnconfiguredRelay};
pub use types::{EngineEvent, RelayError, RelayFailureKind};
pub use viewport::{LayoutViewport, PageLayout, SectionBox, Viewport, ViewportEvents};
