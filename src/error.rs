use thiserror::Error as ThisError;

use crate::ProviderId;

/// Custom error type for dispatch operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error
{   /// Provider identifier outside the known set
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String)
  , /// Request rejected before any network call
    #[error("Invalid request: {0}")]
    InvalidRequest(String)
  , /// Network failure or non-2xx status
    #[error(
      "{} API error: {}",
      .provider.display_name(),
      transport_detail(.status, .reason)
    )]
    Transport
    {   provider: ProviderId
      , status: Option<u16>
      , reason: String
    }
  , /// 2xx response without the expected field
    #[error(
      "{} response missing {}",
      .provider.display_name(),
      .path
    )]
    MalformedResponse
    {   provider: ProviderId
      , path: String
    }
  , /// Caller cancelled before completion
    #[error("Request cancelled")]
    Cancelled
  , /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Configuration(String)
}

impl Error
{   /// Whether a caller-side retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool
    {   match self
        {   Error::Transport { status: None, .. } => true
          , Error::Transport { status: Some(code), .. } => {
              *code == 408 || *code == 429 || *code >= 500
            }
          , _ => false
        }
    }

    /// Provider the failure is attributed to, when there is one.
    pub fn provider(&self) -> Option<ProviderId>
    {   match self
        {   Error::Transport { provider, .. }
          | Error::MalformedResponse { provider, .. } => Some(*provider)
          , _ => None
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self
    {   Error::InvalidRequest(msg.into())
    }

    pub(crate) fn malformed(
      provider: ProviderId
    , path: impl Into<String>
    ) -> Self
    {   Error::MalformedResponse
        {   provider
          , path: path.into()
        }
    }
}

fn transport_detail(status: &Option<u16>, reason: &str) -> String
{   match status
    {   Some(code) if reason.is_empty() => code.to_string()
      , Some(code) => format!("{} {}", code, reason)
      , None => format!("network failure: {}", reason)
    }
}

#[cfg(test)]
mod tests
{   use super::Error;
    use crate::ProviderId;

    #[test]
    fn transport_error_names_provider_and_status()
    {   let err = Error::Transport
        {   provider: ProviderId::OpenAi
          , status: Some(401)
          , reason: "Unauthorized".to_string()
        };
        assert_eq!(err.to_string(), "OpenAI API error: 401 Unauthorized");
        assert!(!err.is_retryable());
        assert_eq!(err.provider(), Some(ProviderId::OpenAi));
    }

    #[test]
    fn network_failure_is_retryable()
    {   let err = Error::Transport
        {   provider: ProviderId::Ollama
          , status: None
          , reason: "connection refused".to_string()
        };
        assert_eq!(
          err.to_string(),
          "Ollama API error: network failure: connection refused"
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn server_errors_and_throttling_are_retryable()
    {   for code in [408, 429, 500, 503]
        {   let err = Error::Transport
            {   provider: ProviderId::Mistral
              , status: Some(code)
              , reason: String::new()
            };
            assert!(err.is_retryable(), "{} should be retryable", code);
        }
    }

    #[test]
    fn malformed_response_names_path()
    {   let err = Error::malformed(
          ProviderId::Gemini,
          "candidates[0].content.parts[0].text"
        );
        assert_eq!(
          err.to_string(),
          "Gemini response missing candidates[0].content.parts[0].text"
        );
        assert!(!Error::Cancelled.is_retryable());
    }
}
