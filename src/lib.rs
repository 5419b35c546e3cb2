pub mod error;
pub mod config;
pub mod registry;
pub mod request;
pub mod providers;
pub mod transport;
pub mod dispatcher;

use serde::{Deserialize, Serialize};

/*

llm-dispatch: one async "generate text" call in front of several
LLM vendors, each with its own wire protocol, auth scheme and
response envelope.

llm-dispatch/
├── Cargo.toml
├── src/
│   ├── lib.rs          # ProviderId, re-exports
│   ├── error.rs        # Error taxonomy
│   ├── config.rs       # Transport + logging configuration
│   ├── registry.rs     # Static provider profiles (defaults, hints)
│   ├── request.rs      # GenerationRequest, HttpRequestSpec
│   ├── providers/      # One module per wire family
│   │   ├── mod.rs      # WireFamily -> (builder, extractor) table
│   │   ├── openai_chat.rs
│   │   ├── gemini.rs
│   │   ├── claude.rs
│   │   ├── cohere.rs
│   │   └── ollama.rs
│   ├── transport.rs    # Transport trait + reqwest transport
│   └── dispatcher.rs   # Single entry point
└── tests/

request flow:
  caller -> Dispatcher::generate -> registry::lookup
         -> WireCodec::build -> Transport::send
         -> WireCodec::extract -> Generation

*/

pub use error::Error;
pub use config::{DispatchConfig, TransportConfig};
pub use registry::{KeyHint, ProviderProfile};
pub use request::{Generation, GenerationRequest, HttpRequestSpec, Method};
pub use providers::WireFamily;
pub use transport::{NetworkError, ReqwestTransport, Transport, TransportResponse};
pub use dispatcher::Dispatcher;
pub use tokio_util::sync::CancellationToken;

/// Reply of a single dispatch: generated text or a typed failure.
pub type GenerationResult = Result<Generation, crate::error::Error>;

/// Closed set of supported LLM providers.
///
/// Adding a provider means adding a variant here and a profile in
/// [`registry::PROVIDERS`]; nothing at runtime extends the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProviderId
{
  /// OpenAI (GPT models)
  OpenAi
  ,
  /// Google Gemini (AI Studio)
  Gemini
  ,
  /// Anthropic Claude
  Claude
  ,
  /// Mistral AI
  Mistral
  ,
  /// Cohere (generate endpoint)
  Cohere
  ,
  /// Ollama, local/self-hosted
  Ollama
  ,
  /// XAI Foundation
  Xai
  ,
  /// 硅基智能 (SiliconFlow cloud)
  Guiji
}

impl ProviderId
{   /// Every provider, in selector order.
    pub const ALL: [ProviderId; 8] = [
      ProviderId::OpenAi
    , ProviderId::Gemini
    , ProviderId::Claude
    , ProviderId::Mistral
    , ProviderId::Cohere
    , ProviderId::Ollama
    , ProviderId::Xai
    , ProviderId::Guiji
    ];

    /// Stable wire name, as accepted by `FromStr` and serde.
    pub fn as_str(&self) -> &'static str
    {   match self
        {   ProviderId::OpenAi => "openai"
          , ProviderId::Gemini => "gemini"
          , ProviderId::Claude => "claude"
          , ProviderId::Mistral => "mistral"
          , ProviderId::Cohere => "cohere"
          , ProviderId::Ollama => "ollama"
          , ProviderId::Xai => "xai"
          , ProviderId::Guiji => "guiji"
        }
    }
}

impl std::fmt::Display for ProviderId
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderId
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   let wanted = s.trim();
        ProviderId::ALL
          .iter()
          .copied()
          .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
          .ok_or_else(|| {
            crate::error::Error::UnsupportedProvider(s.to_string())
          })
    }
}

// Deserialization goes through `FromStr`, so config files accept the
// same spellings and fail with the same error as parsed names.
impl TryFrom<String> for ProviderId
{   type Error = crate::error::Error;

    fn try_from(name: String) -> Result<Self, Self::Error>
    {   name.parse()
    }
}

#[cfg(test)]
mod tests
{   use super::ProviderId;

    #[test]
    fn provider_id_parses_wire_names()
    {   for id in ProviderId::ALL
        {   assert_eq!(id.as_str().parse::<ProviderId>(), Ok(id));
        }
        assert_eq!(" Claude ".parse::<ProviderId>(), Ok(ProviderId::Claude));
    }

    #[test]
    fn provider_id_rejects_unknown_names()
    {   let err = "palm".parse::<ProviderId>().unwrap_err();
        assert_eq!(
          err,
          crate::Error::UnsupportedProvider("palm".to_string())
        );
    }

    #[test]
    fn provider_id_serde_uses_lowercase_names()
    {   let json = serde_json::to_string(&ProviderId::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let parsed: ProviderId
          = serde_json::from_str("\"guiji\"").unwrap();
        assert_eq!(parsed, ProviderId::Guiji);
        assert!(serde_json::from_str::<ProviderId>("\"palm\"").is_err());
    }

    #[test]
    fn provider_id_deserializes_like_it_parses()
    {   let parsed: ProviderId
          = serde_json::from_str("\" OpenAI\"").unwrap();
        assert_eq!(parsed, ProviderId::OpenAi);

        let err = serde_json::from_str::<ProviderId>("\"palm\"").unwrap_err();
        assert!(
          err.to_string().contains("Unsupported provider: palm"),
          "{}", err
        );
    }
}
