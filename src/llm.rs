use reqwest::blocking::Client;
use serde::{Serialize, Deserialize};
use tracing::debug;
use crate::{config::Config, error::LlmError, gateway::TextGenerator, message::Role};

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self { role, parts: vec![Part { text: text.into() }] }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
}

/// Body of a `generateContent` call.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub system_instruction: SystemInstruction,
    pub generation_config: GenerationConfig,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

impl GenerateResponse {
    /// Text of the first candidate, thought parts excluded. `None` when the
    /// candidate carries no text at all.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

pub struct GeminiClient {
    client: Client,
    api_addr: String,
    api_key: String,
    model: String,
    has_api_key: bool,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_addr: config.api_addr.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            has_api_key: config.has_api_key(),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_addr, self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, LlmError> {
        if !self.has_api_key {
            return Err(LlmError::MissingApiKey);
        }

        debug!(
            model = %self.model,
            payload = %serde_json::to_string(request).unwrap_or_default(),
            "sending generateContent request"
        );

        let res = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .map_err(LlmError::from_send)?;

        let status = res.status();
        let body = res.text()?;
        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), &body));
        }

        debug!(response = %body, "generateContent response");
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        Ok(parsed.text())
    }
}
