//! Wire families: request builders and response extractors.
//!
//! Providers that share a request/response shape share a family, so
//! a new OpenAI-compatible vendor is one registry entry and no code.

pub mod openai_chat;
pub mod gemini;
pub mod claude;
pub mod cohere;
pub mod ollama;

use log::{debug, error, trace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::request::{HttpRequestSpec, ResolvedRequest};
use crate::ProviderId;

/// Turns a validated request into a transport-ready HTTP request.
pub type BuildFn = fn(&ResolvedRequest<'_>) -> Result<HttpRequestSpec, Error>;

/// Pulls the generated text out of a parsed 2xx body.
pub type ExtractFn = fn(ProviderId, &serde_json::Value) -> Result<String, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFamily
{   /// `{base}/chat/completions`, bearer auth
    OpenAiChat
  , /// `{base}/models/{model}:generateContent?key=`
    Gemini
  , /// `{base}/messages`, `x-api-key`
    Claude
  , /// `{base}/generate`, bearer auth
    Cohere
  , /// `{base}/api/generate`, no auth
    Ollama
}

/// Builder/extractor pair for one wire family.
#[derive(Clone, Copy)]
pub struct WireCodec
{   pub family: WireFamily
  , /// Documented path of the generated text in a success body
    pub text_path: &'static str
  , build_fn: BuildFn
  , extract_fn: ExtractFn
}

static CODECS: [WireCodec; 5] = [
    WireCodec
    {   family: WireFamily::OpenAiChat
      , text_path: openai_chat::TEXT_PATH
      , build_fn: openai_chat::build
      , extract_fn: openai_chat::extract
    }
  , WireCodec
    {   family: WireFamily::Gemini
      , text_path: gemini::TEXT_PATH
      , build_fn: gemini::build
      , extract_fn: gemini::extract
    }
  , WireCodec
    {   family: WireFamily::Claude
      , text_path: claude::TEXT_PATH
      , build_fn: claude::build
      , extract_fn: claude::extract
    }
  , WireCodec
    {   family: WireFamily::Cohere
      , text_path: cohere::TEXT_PATH
      , build_fn: cohere::build
      , extract_fn: cohere::extract
    }
  , WireCodec
    {   family: WireFamily::Ollama
      , text_path: ollama::TEXT_PATH
      , build_fn: ollama::build
      , extract_fn: ollama::extract
    }
];

impl WireFamily
{   pub fn codec(&self) -> &'static WireCodec
    {   match self
        {   WireFamily::OpenAiChat => &CODECS[0]
          , WireFamily::Gemini => &CODECS[1]
          , WireFamily::Claude => &CODECS[2]
          , WireFamily::Cohere => &CODECS[3]
          , WireFamily::Ollama => &CODECS[4]
        }
    }
}

impl std::fmt::Debug for WireCodec
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {   f.debug_struct("WireCodec")
          .field("family", &self.family)
          .field("text_path", &self.text_path)
          .finish()
    }
}

impl WireCodec
{   pub fn build(&self, request: &ResolvedRequest<'_>)
      -> Result<HttpRequestSpec, Error>
    {   debug!(
          "Building {:?} request for {}",
          self.family, request.provider()
        );
        (self.build_fn)(request)
    }

    /// Extract generated text from a response.
    ///
    /// Non-2xx statuses fail with [`Error::Transport`] before the body
    /// is looked at.
    pub fn extract(
      &self
    , provider: ProviderId
    , status: u16
    , reason: &str
    , body: &serde_json::Value
    ) -> Result<String, Error>
    {   ensure_success(provider, status, reason)?;
        let text = (self.extract_fn)(provider, body)?;
        trace!("{} text read from {}", provider, self.text_path);
        Ok(text)
    }
}

/// Fail with [`Error::Transport`] on any non-2xx status.
pub fn ensure_success(
  provider: ProviderId
, status: u16
, reason: &str
) -> Result<(), Error>
{   if (200..300).contains(&status)
    {   return Ok(());
    }
    error!(
      "{} returned status {} {}",
      provider.display_name(), status, reason
    );
    Err(Error::Transport
    {   provider
      , status: Some(status)
      , reason: reason.to_string()
    })
}

/// Decode a success body into a family envelope, mapping any type
/// mismatch along the way to [`Error::MalformedResponse`].
pub(crate) fn decode_envelope<T: DeserializeOwned>(
  provider: ProviderId
, body: &serde_json::Value
, path: &'static str
) -> Result<T, Error>
{   T::deserialize(body).map_err(|e| {
      error!(
        "{} response did not match {}: {}",
        provider.display_name(), path, e
      );
      Error::malformed(provider, path)
    })
}

/// Unwrap the innermost text, or fail naming the documented path.
pub(crate) fn require_text(
  provider: ProviderId
, text: Option<String>
, path: &'static str
) -> Result<String, Error>
{   text.ok_or_else(|| {
      error!("{} response missing {}", provider.display_name(), path);
      Error::malformed(provider, path)
    })
}

/// Single chat message, shared by the chat-shaped families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

impl ChatMessage
{   pub fn user(content: &str) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: content.to_string()
        }
    }
}
