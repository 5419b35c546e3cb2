//! Local Ollama server, `/api/generate`.

use serde::{Deserialize, Serialize};

use super::{decode_envelope, require_text};
use crate::error::Error;
use crate::request::{HttpRequestSpec, ResolvedRequest};
use crate::ProviderId;

pub const TEXT_PATH: &str = "response";

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest
{   pub model: String
  , pub prompt: String
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse
{   #[serde(default)]
    pub response: Option<String>
}

pub fn build(request: &ResolvedRequest<'_>)
  -> Result<HttpRequestSpec, Error>
{   let body = GenerateRequest
    {   model: request.model.to_string()
      , prompt: request.prompt.to_string()
    };

    HttpRequestSpec::post_json(request.endpoint("api/generate"), &body)
}

pub fn extract(provider: ProviderId, body: &serde_json::Value)
  -> Result<String, Error>
{   let response: GenerateResponse
      = decode_envelope(provider, body, TEXT_PATH)?;

    require_text(provider, response.response, TEXT_PATH)
}
