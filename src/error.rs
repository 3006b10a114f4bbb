use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failures of a single `/chat` request. None of them affect the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("No messages received.")]
    NoMessages,

    #[error("Could not reach Ollama. Make sure the service is running.")]
    UpstreamUnreachable { details: String },

    #[error("Invalid response from Ollama.")]
    UpstreamMalformed,

    #[error("Empty reply from the model.")]
    EmptyModelOutput,
}

impl RelayError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            Self::NoMessages => StatusCode::BAD_REQUEST,
            Self::UpstreamUnreachable { .. } | Self::UpstreamMalformed | Self::EmptyModelOutput => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Diagnostic text forwarded to the client, only for transport failures.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::UpstreamUnreachable { details } => Some(details.as_str()),
            _ => None,
        }
    }
}
