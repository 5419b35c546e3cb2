//! Unified request and response types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::registry::ProviderProfile;
use crate::ProviderId;

/// Unified generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// Provider to use
    pub provider: ProviderId
  , /// Model name
    pub model: String
  , /// API key, may stay empty for key-optional providers
    #[serde(default)]
    pub api_key: String
  , /// The prompt text
    pub prompt: String
  , /// Endpoint base, empty means the registry default
    #[serde(default)]
    pub base_url: String
}

impl GenerationRequest
{   pub fn new(
      provider: ProviderId
    , model: impl Into<String>
    , prompt: impl Into<String>
    ) -> Self
    {   GenerationRequest
        {   provider
          , model: model.into()
          , api_key: String::new()
          , prompt: prompt.into()
          , base_url: String::new()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self
    {   self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self
    {   self.base_url = base_url.into();
        self
    }

    /// Validate against the provider profile and fill in defaults.
    ///
    /// Pure: no I/O, nothing is sent.
    pub fn resolve(&self) -> Result<ResolvedRequest<'_>, Error>
    {   let profile = crate::registry::lookup(self.provider)?;

        let model = self.model.trim();
        if model.is_empty()
        {   return Err(Error::invalid("model must not be empty"));
        }

        if self.prompt.trim().is_empty()
        {   return Err(Error::invalid("prompt must not be empty"));
        }

        let api_key = if profile.key_hint.is_required()
        {   let key = self.api_key.trim();
            if key.is_empty()
            {   return Err(Error::invalid(format!(
                  "{} requires an API key", profile.display_name
                )));
            }
            key
        } else
        {   ""
        };

        let base_url = match self.base_url.trim()
        {   "" => profile.default_base_url
          , explicit => explicit
        };
        let base_url = base_url.trim_end_matches('/');
        check_base_url(base_url)?;

        Ok(ResolvedRequest
        {   profile
          , model
          , api_key
          , prompt: &self.prompt
          , base_url
        })
    }
}

fn check_base_url(base_url: &str) -> Result<(), Error>
{   let parsed = reqwest::Url::parse(base_url).map_err(|e| {
      Error::invalid(format!("invalid base URL '{}': {}", base_url, e))
    })?;
    if !matches!(parsed.scheme(), "http" | "https")
    {   return Err(Error::invalid(format!(
          "base URL must be http or https: {}", base_url
        )));
    }
    Ok(())
}

/// A validated request with defaults applied. Borrowed from the
/// [`GenerationRequest`] it came from.
#[derive(Clone, Copy)]
pub struct ResolvedRequest<'a>
{   pub profile: &'static ProviderProfile
  , /// Trimmed model name
    pub model: &'a str
  , /// Empty for providers that need no key
    pub api_key: &'a str
  , pub prompt: &'a str
  , /// Without trailing slash
    pub base_url: &'a str
}

impl fmt::Debug for ResolvedRequest<'_>
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("ResolvedRequest")
          .field("provider", &self.profile.id)
          .field("model", &self.model)
          .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
          .field("base_url", &self.base_url)
          .finish_non_exhaustive()
    }
}

impl ResolvedRequest<'_>
{   pub fn provider(&self) -> ProviderId
    {   self.profile.id
    }

    /// `{base}/{path}`
    pub fn endpoint(&self, path: &str) -> String
    {   format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Every provider call is a POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method
{   Post
}

/// Transport-ready HTTP request description.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequestSpec
{   pub method: Method
  , pub url: String
  , pub headers: BTreeMap<String, String>
  , pub body: Vec<u8>
}

impl HttpRequestSpec
{   /// JSON POST with `Content-Type: application/json`.
    pub fn post_json<B: Serialize>(
      url: impl Into<String>
    , body: &B
    ) -> Result<Self, Error>
    {   let body = serde_json::to_vec(body).map_err(|e| {
          Error::invalid(format!("failed to encode body: {}", e))
        })?;
        let mut headers = BTreeMap::new();
        headers.insert(
          "Content-Type".to_string(),
          "application/json".to_string()
        );
        Ok(HttpRequestSpec
        {   method: Method::Post
          , url: url.into()
          , headers
          , body
        })
    }

    pub fn header(
      mut self
    , name: impl Into<String>
    , value: impl Into<String>
    ) -> Self
    {   self.headers.insert(name.into(), value.into());
        self
    }

    pub fn bearer_auth(self, token: &str) -> Self
    {   self.header("Authorization", format!("Bearer {}", token))
    }

    /// Body decoded as JSON, for inspection and logging.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error>
    {   serde_json::from_slice(&self.body)
    }
}

const SECRET_HEADERS: &[&str] = &["authorization", "x-api-key"];

// Keys travel in headers and, for Gemini, in the query string.
impl fmt::Debug for HttpRequestSpec
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   let headers: BTreeMap<&str, &str> = self.headers
          .iter()
          .map(|(name, value)| {
            let secret = SECRET_HEADERS
              .iter()
              .any(|s| name.eq_ignore_ascii_case(s));
            (name.as_str(), if secret { "<redacted>" } else { value.as_str() })
          })
          .collect();
        f.debug_struct("HttpRequestSpec")
          .field("method", &self.method)
          .field("url", &redact_query_key(&self.url))
          .field("headers", &headers)
          .field("body", &String::from_utf8_lossy(&self.body))
          .finish()
    }
}

// Every `key` query parameter, however it is spelled in the raw
// query, is replaced before the URL reaches a log line.
fn redact_query_key(url: &str) -> String
{   let mut parsed = match reqwest::Url::parse(url)
    {   Ok(parsed) => parsed
      , Err(_) => {
          let head = url.split(['?', '#']).next().unwrap_or_default();
          return format!("{}?<unparsed query dropped>", head);
        }
    };
    if parsed.query().is_none()
    {   return parsed.to_string();
    }
    let pairs: Vec<(String, String)> = parsed
      .query_pairs()
      .map(|(name, value)| {
        let value = if name == "key"
        {   REDACTED_QUERY_VALUE.to_string()
        } else
        {   value.into_owned()
        };
        (name.into_owned(), value)
      })
      .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

const REDACTED_QUERY_VALUE: &str = "REDACTED";

/// Unified generation response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation
{   /// Generated text
    pub text: String
  , /// Provider that generated it
    pub provider: ProviderId
  , /// Model that generated it
    pub model: String
}
