use std::collections::HashMap;

use portfolio_core::DispatchStage;
use portfolio_engine::{
    ConfigError, RelayConfig, DEFAULT_RELAY_ENDPOINT, ENV_ENDPOINT, ENV_NOTIFICATION_TEMPLATE_ID,
    ENV_PUBLIC_KEY, ENV_SERVICE_ID, ENV_TEMPLATE_ID,
};

fn complete() -> HashMap<&'static str, String> {
    HashMap::from([
        (ENV_SERVICE_ID, "service".to_string()),
        (ENV_TEMPLATE_ID, "ack".to_string()),
        (ENV_NOTIFICATION_TEMPLATE_ID, "admin".to_string()),
        (ENV_PUBLIC_KEY, "key".to_string()),
    ])
}

fn load(vars: &HashMap<&'static str, String>) -> Result<RelayConfig, ConfigError> {
    RelayConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_endpoint_and_maps_templates() {
    let config = load(&complete()).unwrap();
    assert_eq!(config.endpoint.as_str(), DEFAULT_RELAY_ENDPOINT);
    assert_eq!(config.template_for(DispatchStage::ApplicantAcknowledgment), "ack");
    assert_eq!(config.template_for(DispatchStage::AdministratorNotification), "admin");
}

#[test]
fn missing_or_blank_values_are_reported() {
    let mut vars = complete();
    vars.remove(ENV_PUBLIC_KEY);
    assert_eq!(load(&vars), Err(ConfigError::Missing(ENV_PUBLIC_KEY)));

    let mut vars = complete();
    vars.insert(ENV_SERVICE_ID, "   ".to_string());
    assert_eq!(load(&vars), Err(ConfigError::Missing(ENV_SERVICE_ID)));
}

#[test]
fn endpoint_must_be_a_url() {
    let mut vars = complete();
    vars.insert(ENV_ENDPOINT, "not a url".to_string());
    assert!(matches!(load(&vars), Err(ConfigError::InvalidEndpoint { .. })));

    vars.insert(ENV_ENDPOINT, "http://127.0.0.1:9000/send".to_string());
    assert_eq!(load(&vars).unwrap().endpoint.as_str(), "http://127.0.0.1:9000/send");
}
