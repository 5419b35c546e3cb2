//! Google Gemini `generateContent` shape. The key rides in the query
//! string, not in a header.

use serde::{Deserialize, Serialize};

use super::{decode_envelope, require_text};
use crate::error::Error;
use crate::request::{HttpRequestSpec, ResolvedRequest};
use crate::ProviderId;

pub const TEXT_PATH: &str = "candidates[0].content.parts[0].text";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part
{   #[serde(default)]
    pub text: Option<String>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content
{   #[serde(default)]
    pub parts: Vec<Part>
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest
{   pub contents: Vec<Content>
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse
{   #[serde(default)]
    pub candidates: Vec<Candidate>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate
{   #[serde(default)]
    pub content: Option<Content>
}

pub fn build(request: &ResolvedRequest<'_>)
  -> Result<HttpRequestSpec, Error>
{   let endpoint = request.endpoint("models");
    let mut url = reqwest::Url::parse(&endpoint).map_err(|e| {
      Error::invalid(format!("invalid Gemini URL '{}': {}", endpoint, e))
    })?;
    // One segment, so `?`, `#` and `/` in a model name are escaped.
    url.path_segments_mut()
      .map_err(|_| {
        Error::invalid(format!("Gemini base URL cannot take a path: {}", endpoint))
      })?
      .push(&format!("{}:generateContent", request.model));
    url.query_pairs_mut().append_pair("key", request.api_key);

    let body = GenerateContentRequest
    {   contents: vec![
          Content
          {   parts: vec![
                Part
                {   text: Some(request.prompt.to_string())
                }
              ]
          }
        ]
    };

    HttpRequestSpec::post_json(url.as_str(), &body)
}

pub fn extract(provider: ProviderId, body: &serde_json::Value)
  -> Result<String, Error>
{   let response: GenerateContentResponse
      = decode_envelope(provider, body, TEXT_PATH)?;

    let text = response.candidates
      .into_iter()
      .next()
      .and_then(|candidate| candidate.content)
      .and_then(|content| content.parts.into_iter().next())
      .and_then(|part| part.text);

    require_text(provider, text, TEXT_PATH)
}
