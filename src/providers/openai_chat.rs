//! OpenAI chat-completions shape.
//!
//! Shared by OpenAI, Mistral, XAI and 硅基智能: they differ only in
//! base URL and key format.

use log::trace;
use serde::{Deserialize, Serialize};

use super::{decode_envelope, require_text, ChatMessage};
use crate::error::Error;
use crate::request::{HttpRequestSpec, ResolvedRequest};
use crate::ProviderId;

pub const TEXT_PATH: &str = "choices[0].message.content";

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse
{   #[serde(default)]
    pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   #[serde(default)]
    pub message: Option<ChoiceMessage>
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage
{   #[serde(default)]
    pub content: Option<String>
}

pub fn build(request: &ResolvedRequest<'_>)
  -> Result<HttpRequestSpec, Error>
{   let body = ChatCompletionRequest
    {   model: request.model.to_string()
      , messages: vec![ChatMessage::user(request.prompt)]
    };
    trace!("{} chat request: {:?}", request.provider(), body);

    Ok(
      HttpRequestSpec::post_json(
        request.endpoint("chat/completions"),
        &body
      )?
      .bearer_auth(request.api_key)
    )
}

pub fn extract(provider: ProviderId, body: &serde_json::Value)
  -> Result<String, Error>
{   let response: ChatCompletionResponse
      = decode_envelope(provider, body, TEXT_PATH)?;

    let text = response.choices
      .into_iter()
      .next()
      .and_then(|choice| {
        trace!("finish_reason: {:?}", choice.finish_reason);
        choice.message
      })
      .and_then(|message| message.content);

    require_text(provider, text, TEXT_PATH)
}
