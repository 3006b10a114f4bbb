use support_relay::{
    config::{Config, InferenceConfig, PromptConfig},
    relay::Relay,
};
use std::sync::Arc;

use super::mocks::MockInferenceClient;

/// Create a test configuration with a short system prompt
pub fn create_test_config() -> Config {
    Config {
        prompt: PromptConfig {
            system_prompt: "You are a supportive assistant.".to_string(),
            ..PromptConfig::default()
        },
        ..Config::default()
    }
}

/// Configuration pointing the inference client at `url`
pub fn create_config_for(url: &str, timeout_secs: u64) -> Config {
    let mut config = create_test_config();
    config.inference = InferenceConfig {
        url: url.to_string(),
        timeout_secs,
        ..InferenceConfig::default()
    };
    config
}

/// Build a relay around a mock client, keeping a handle to inspect requests
pub fn create_mock_relay(mock: MockInferenceClient) -> (Relay, Arc<MockInferenceClient>) {
    let mock = Arc::new(mock);
    let relay = Relay::new(mock.clone(), &create_test_config());
    (relay, mock)
}

/// URL of a local port nothing listens on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/generate", port)
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  logs:
    level: "debug"

inference:
  url: "http://ollama:11434/api/generate"
  model: "llama3.1:8b"
  timeout_secs: 30

prompt:
  system_prompt: "Be gentle."
  system_header: "Системные инструкции:"
  user_label: "Пользователь"
  assistant_label: "Ассистент"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;
