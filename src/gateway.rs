use tracing::{debug, error};
use crate::{
    config::ChatProfile,
    error::LlmError,
    llm::{Content, GenerateRequest, GenerationConfig, Part, SystemInstruction},
    message::{Message, Role},
};

/// A hosted text-generation service. `Ok(None)` means the call succeeded
/// but produced no text.
pub trait TextGenerator {
    fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, LlmError>;
}

/// Turns a transcript plus a new message into exactly one generator call
/// and always hands back something to show the visitor.
pub struct Gateway<G> {
    generator: G,
    profile: ChatProfile,
    temperature: f32,
}

impl<G: TextGenerator> Gateway<G> {
    /// Blank profile fields are replaced with the built-in text so there is
    /// always something to answer with.
    pub fn new(generator: G, mut profile: ChatProfile, temperature: f32) -> Self {
        profile.restore_blank_fields();
        Self { generator, profile, temperature }
    }

    pub fn profile(&self) -> &ChatProfile {
        &self.profile
    }

    pub fn build_request(&self, new_message: &str, history: &[Message]) -> GenerateRequest {
        let contents = history
            .iter()
            .map(|m| Content::new(m.role(), m.text()))
            .chain(std::iter::once(Content::new(Role::User, new_message)))
            .collect();

        GenerateRequest {
            contents,
            system_instruction: SystemInstruction {
                parts: vec![Part { text: self.profile.system_instruction.clone() }],
            },
            generation_config: GenerationConfig { temperature: self.temperature },
        }
    }

    pub fn reply(&self, new_message: &str, history: &[Message]) -> String {
        let request = self.build_request(new_message, history);
        match self.generator.generate(&request) {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                debug!(history_len = history.len(), "service returned no text");
                self.profile.empty_reply_fallback.clone()
            }
            Err(e) => {
                error!(error = %e, "chat response failed");
                self.profile.unavailable_fallback.clone()
            }
        }
    }
}
