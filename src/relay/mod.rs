use crate::{
    Result,
    config::Config,
    error::RelayError,
    inference::{GenerateRequest, InferenceClient, InferenceError, OllamaClient},
    prompt::{ChatRequest, ChatTurn, PromptBuilder},
};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// JSON body returned by `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatReply {
    Reply {
        reply: String,
    },
    Error {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl From<&RelayError> for ChatReply {
    fn from(err: &RelayError) -> Self {
        Self::Error {
            error: err.to_string(),
            details: err.details().map(str::to_string),
        }
    }
}

/// Turns a browser transcript into one model call and maps the outcome to a
/// reply. Holds no per-request state.
pub struct Relay {
    client: Arc<dyn InferenceClient>,
    prompt: PromptBuilder,
    model: String,
}

impl Relay {
    pub fn new(client: Arc<dyn InferenceClient>, config: &Config) -> Self {
        Self {
            client,
            prompt: PromptBuilder::new(config.prompt.clone()),
            model: config.inference.model.clone(),
        }
    }

    /// Builds a relay talking to the Ollama endpoint named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OllamaClient::new(&config.inference)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Decodes a raw `/chat` body. Anything that is not an object with a
    /// non-empty `messages` list of turns is rejected.
    pub fn decode(body: &[u8]) -> std::result::Result<Vec<ChatTurn>, RelayError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            debug!("Rejecting unparsable request body: {}", e);
            RelayError::NoMessages
        })?;

        if !value.is_object() {
            debug!("Rejecting request body that is not a JSON object");
            return Err(RelayError::NoMessages);
        }

        let request: ChatRequest = serde_json::from_value(value).map_err(|e| {
            debug!("Rejecting request with malformed messages: {}", e);
            RelayError::NoMessages
        })?;

        if request.messages.is_empty() {
            return Err(RelayError::NoMessages);
        }

        Ok(request.messages)
    }

    /// Sends the transcript to the model and returns its trimmed reply.
    pub async fn chat(&self, turns: &[ChatTurn]) -> std::result::Result<String, RelayError> {
        if turns.is_empty() {
            return Err(RelayError::NoMessages);
        }

        let prompt = self.prompt.build(turns);
        info!(
            "Relaying {} turns to model {} ({} prompt bytes)",
            turns.len(),
            self.model,
            prompt.len()
        );

        let request = GenerateRequest::new(self.model.clone(), prompt);
        let response = self.client.generate(&request).await.map_err(|e| match e {
            InferenceError::Transport(details) => {
                error!("Inference service unreachable: {}", details);
                RelayError::UpstreamUnreachable { details }
            }
            InferenceError::Malformed(reason) => {
                error!("Inference service returned malformed body: {}", reason);
                RelayError::UpstreamMalformed
            }
        })?;

        let reply = response.response.trim();
        if reply.is_empty() {
            warn!("Model {} returned an empty reply", self.model);
            return Err(RelayError::EmptyModelOutput);
        }

        Ok(reply.to_string())
    }

    /// Full request cycle: decode, relay, translate to status and payload.
    pub async fn handle(&self, body: &[u8]) -> (StatusCode, ChatReply) {
        let result = match Self::decode(body) {
            Ok(turns) => self.chat(&turns).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(reply) => (StatusCode::OK, ChatReply::Reply { reply }),
            Err(e) => (e.status_code(), ChatReply::from(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_keeps_order() {
        let body = json!({
            "messages": [
                {"role": "user", "content": "A"},
                {"role": "assistant", "content": "B"}
            ]
        });

        let turns = Relay::decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(turns, vec![ChatTurn::user("A"), ChatTurn::assistant("B")]);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert_eq!(
            Relay::decode(br#"[{"messages": []}]"#),
            Err(RelayError::NoMessages)
        );
        assert_eq!(Relay::decode(b"\"hi\""), Err(RelayError::NoMessages));
        assert_eq!(Relay::decode(b"not json"), Err(RelayError::NoMessages));
        assert_eq!(Relay::decode(b""), Err(RelayError::NoMessages));
    }

    #[test]
    fn test_decode_rejects_malformed_turn() {
        assert_eq!(
            Relay::decode(br#"{"messages": ["hello"]}"#),
            Err(RelayError::NoMessages)
        );
        assert_eq!(
            Relay::decode(br#"{"messages": [{"content": 5}]}"#),
            Err(RelayError::NoMessages)
        );
    }

    #[test]
    fn test_decode_accepts_blank_turns() {
        let turns = Relay::decode(br#"{"messages": [{"content": "  "}]}"#).unwrap();
        assert_eq!(turns, vec![ChatTurn::user("  ")]);
    }

    #[test]
    fn test_reply_serialization() {
        let ok = ChatReply::Reply {
            reply: "Hello".to_string(),
        };
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"reply": "Hello"}));

        let malformed = ChatReply::from(&RelayError::UpstreamMalformed);
        assert_eq!(
            serde_json::to_value(&malformed).unwrap(),
            json!({"error": "Invalid response from Ollama."})
        );

        let unreachable = ChatReply::from(&RelayError::UpstreamUnreachable {
            details: "refused".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&unreachable).unwrap(),
            json!({
                "error": "Could not reach Ollama. Make sure the service is running.",
                "details": "refused"
            })
        );
    }
}
