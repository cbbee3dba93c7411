use thiserror::Error;

const MAX_BODY_CHARS: usize = 300;

/// Why a call to the generation service failed. Never shown to the visitor;
/// the gateway logs it and answers with a canned sentence instead.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("failed to connect to the LLM server: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("invalid API key or authentication failed ({status}): {body}")]
    Auth { status: u16, body: String },

    #[error("API endpoint or model not found: {body}")]
    NotFound { body: String },

    #[error("API request failed with status code {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl LlmError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = truncate_body(body);
        match status {
            401 | 403 => LlmError::Auth { status, body },
            404 => LlmError::NotFound { body },
            _ => LlmError::Status { status, body },
        }
    }

    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() { LlmError::Connect(err) } else { LlmError::Transport(err) }
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_BODY_CHARS).collect();
    cut.push_str("...");
    cut
}
