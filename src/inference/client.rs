use super::types::*;
use crate::{Result, config::InferenceConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> std::result::Result<GenerateResponse, InferenceError>;
}

pub struct OllamaClient {
    http: reqwest::Client,
    url: String,
}

impl OllamaClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> std::result::Result<GenerateResponse, InferenceError> {
        debug!(
            "Sending generate request to {} (model {}, prompt {} bytes)",
            self.url,
            request.model,
            request.prompt.len()
        );

        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| InferenceError::Transport(error_chain(&e)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| InferenceError::Transport(error_chain(&e)))?;

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| InferenceError::Malformed(e.to_string()))?;
        if !value.is_object() {
            return Err(InferenceError::Malformed(
                "expected a JSON object".to_string(),
            ));
        }

        let generated: GenerateResponse =
            serde_json::from_value(value).map_err(|e| InferenceError::Malformed(e.to_string()))?;

        debug!(
            "Received generate response (model {:?}, done {:?}, eval_count {:?}, total_duration {:?})",
            generated.model, generated.done, generated.eval_count, generated.total_duration
        );

        Ok(generated)
    }
}

/// Renders an error together with its sources, e.g. the OS error behind a
/// failed connect.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
