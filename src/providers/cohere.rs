use serde::{Deserialize, Serialize};

use super::{decode_envelope, require_text};
use crate::error::Error;
use crate::request::{HttpRequestSpec, ResolvedRequest};
use crate::ProviderId;

pub const TEXT_PATH: &str = "generations[0].text";

/// Fixed generation cap sent with every request.
pub const MAX_TOKENS: usize = 2000;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest
{   pub model: String
  , pub prompt: String
  , pub max_tokens: usize
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse
{   #[serde(default)]
    pub generations: Vec<Generation>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Generation
{   #[serde(default)]
    pub text: Option<String>
}

pub fn build(request: &ResolvedRequest<'_>)
  -> Result<HttpRequestSpec, Error>
{   let body = GenerateRequest
    {   model: request.model.to_string()
      , prompt: request.prompt.to_string()
      , max_tokens: MAX_TOKENS
    };

    Ok(
      HttpRequestSpec::post_json(request.endpoint("generate"), &body)?
        .bearer_auth(request.api_key)
    )
}

pub fn extract(provider: ProviderId, body: &serde_json::Value)
  -> Result<String, Error>
{   let response: GenerateResponse
      = decode_envelope(provider, body, TEXT_PATH)?;

    let text = response.generations
      .into_iter()
      .next()
      .and_then(|generation| generation.text);

    require_text(provider, text, TEXT_PATH)
}
