use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::event::CameraEvent;
use crate::message::Message;

/// The standing instruction appended to every turn request.
pub const ADVANCE_PROMPT: &str = "PROCEED. REPORT NEXT OBSERVATIONS.";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError),
    #[error("Generator returned an empty response")]
    EmptyResponse,
    #[error("Failed to parse turn report: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    System,
    Operator,
    Generator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// The generator's running conversational context: the transcript sent
/// back with every request. Opaque to the session beyond cloning; each
/// turn yields a NEW context value and the old one goes into the turn
/// snapshot, so an undo rewinds the generator to exactly the point the
/// event log rewinds to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorContext {
    entries: Vec<ContextEntry>,
}

impl GeneratorContext {
    /// Fresh context seeded with the caller's system instruction.
    pub fn with_instruction(instruction: impl Into<String>) -> Self {
        Self {
            entries: vec![ContextEntry {
                speaker: Speaker::System,
                text: instruction.into(),
            }],
        }
    }

    /// The context after one more exchange. Does not mutate `self`; the
    /// previous value stays valid inside any snapshot that captured it.
    pub fn extended(&self, prompt: String, reply: String) -> Self {
        let mut entries = self.entries.clone();
        entries.push(ContextEntry {
            speaker: Speaker::Operator,
            text: prompt,
        });
        entries.push(ContextEntry {
            speaker: Speaker::Generator,
            text: reply,
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }
}

/// One parsed generation response. The original generator only produced
/// events; `messages` defaults to empty so both shapes parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub events: Vec<CameraEvent>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// The turn-generation boundary. A turn takes the running context plus an
/// optional operator command and yields the parsed report together with
/// the successor context.
#[allow(async_fn_in_trait)]
pub trait TurnGenerator {
    async fn next_turn(
        &self,
        context: &GeneratorContext,
        operator_command: Option<&str>,
    ) -> Result<(TurnReport, GeneratorContext), GenerationError>;
}

/// Builds the prompt for one advance. A pending operator command rides
/// along ahead of the standing instruction.
pub fn advance_prompt(operator_command: Option<&str>) -> String {
    match operator_command {
        Some(command) => format!("USER ACTION: {command}\n{ADVANCE_PROMPT}"),
        None => ADVANCE_PROMPT.to_string(),
    }
}

/// Parses a raw generator reply into a [`TurnReport`]. Models wrap JSON
/// in markdown fences often enough that we strip them before parsing.
pub fn parse_turn_report(raw: &str) -> Result<TurnReport, GenerationError> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    serde_json::from_str(cleaned).map_err(|e| {
        warn!("Discarding malformed turn report: {e}");
        GenerationError::Parse(e.to_string())
    })
}

/// Chat-completions implementation of the boundary.
pub struct IrisGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl IrisGenerator {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }

    fn request_messages(
        context: &GeneratorContext,
        prompt: &str,
    ) -> Result<Vec<ChatCompletionRequestMessage>, GenerationError> {
        let mut messages = Vec::with_capacity(context.entries().len() + 1);
        for entry in context.entries() {
            let message: ChatCompletionRequestMessage = match entry.speaker {
                Speaker::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(entry.text.as_str())
                    .build()?
                    .into(),
                Speaker::Operator => ChatCompletionRequestUserMessageArgs::default()
                    .content(entry.text.as_str())
                    .build()?
                    .into(),
                Speaker::Generator => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(entry.text.as_str())
                    .build()?
                    .into(),
            };
            messages.push(message);
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        );
        Ok(messages)
    }
}

impl TurnGenerator for IrisGenerator {
    async fn next_turn(
        &self,
        context: &GeneratorContext,
        operator_command: Option<&str>,
    ) -> Result<(TurnReport, GeneratorContext), GenerationError> {
        let prompt = advance_prompt(operator_command);
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(Self::request_messages(context, &prompt)?)
            .build()?;

        let response = self.client.chat().create(request).await?;
        let reply = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(GenerationError::EmptyResponse)?;

        debug!("Generator replied with {} bytes", reply.len());
        let report = parse_turn_report(&reply)?;
        Ok((report, context.extended(prompt, reply)))
    }
}
