//! Anthropic messages shape.

use serde::{Deserialize, Serialize};

use super::{decode_envelope, require_text, ChatMessage};
use crate::error::Error;
use crate::request::{HttpRequestSpec, ResolvedRequest};
use crate::ProviderId;

pub const TEXT_PATH: &str = "content[0].text";

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse
{   #[serde(default)]
    pub content: Vec<ContentBlock>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock
{   #[serde(default)]
    pub text: Option<String>
}

pub fn build(request: &ResolvedRequest<'_>)
  -> Result<HttpRequestSpec, Error>
{   let body = MessagesRequest
    {   model: request.model.to_string()
      , messages: vec![ChatMessage::user(request.prompt)]
    };

    Ok(
      HttpRequestSpec::post_json(request.endpoint("messages"), &body)?
        .header("x-api-key", request.api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
    )
}

pub fn extract(provider: ProviderId, body: &serde_json::Value)
  -> Result<String, Error>
{   let response: MessagesResponse
      = decode_envelope(provider, body, TEXT_PATH)?;

    let text = response.content
      .into_iter()
      .next()
      .and_then(|block| block.text);

    require_text(provider, text, TEXT_PATH)
}
