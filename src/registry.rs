//! Provider registry: static defaults and hints for every provider.
//!
//! The table is a `static` slice built at compile time and never
//! mutated, so lookups need no synchronization.

use log::error;

use crate::error::Error;
use crate::providers::WireFamily;
use crate::ProviderId;

/// API key requirement and placeholder text for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHint
{   /// A key must be supplied; the placeholder shows its usual shape
    Required(&'static str)
  , /// The provider accepts requests without a key
    NotRequired
}

impl KeyHint
{   pub fn is_required(&self) -> bool
    {   matches!(self, KeyHint::Required(_))
    }

    /// Placeholder/help text for an API key input.
    pub fn placeholder(&self) -> &'static str
    {   match self
        {   KeyHint::Required(placeholder) => placeholder
          , KeyHint::NotRequired => "Not required"
        }
    }
}

/// Static description of one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile
{   pub id: ProviderId
  , /// Name shown in provider selectors
    pub label: &'static str
  , /// Name used in error messages
    pub display_name: &'static str
  , /// Base URL used when the request leaves it empty
    pub default_base_url: &'static str
  , /// Example model names, comma separated
    pub model_hint: &'static str
  , pub key_hint: KeyHint
  , /// Request/response shape shared with structurally identical vendors
    pub family: WireFamily
}

/// All provider profiles, in selector order.
pub static PROVIDERS: &[ProviderProfile] = &[
    ProviderProfile
    {   id: ProviderId::OpenAi
      , label: "OpenAI"
      , display_name: "OpenAI"
      , default_base_url: "https://api.openai.com/v1"
      , model_hint: "gpt-4, gpt-3.5-turbo"
      , key_hint: KeyHint::Required("sk-...")
      , family: WireFamily::OpenAiChat
    }
  , ProviderProfile
    {   id: ProviderId::Gemini
      , label: "Google Gemini"
      , display_name: "Gemini"
      , default_base_url
          : "https://generativelanguage.googleapis.com/v1"
      , model_hint: "gemini-pro, gemini-pro-vision"
      , key_hint: KeyHint::Required("AI...")
      , family: WireFamily::Gemini
    }
  , ProviderProfile
    {   id: ProviderId::Claude
      , label: "Anthropic Claude"
      , display_name: "Claude"
      , default_base_url: "https://api.anthropic.com/v1"
      , model_hint: "claude-3-opus, claude-3-sonnet"
      , key_hint: KeyHint::Required("sk-ant-...")
      , family: WireFamily::Claude
    }
  , ProviderProfile
    {   id: ProviderId::Mistral
      , label: "Mistral AI"
      , display_name: "Mistral"
      , default_base_url: "https://api.mistral.ai/v1"
      , model_hint: "mistral-tiny, mistral-small, mistral-medium"
      , key_hint: KeyHint::Required("...")
      , family: WireFamily::OpenAiChat
    }
  , ProviderProfile
    {   id: ProviderId::Cohere
      , label: "Cohere"
      , display_name: "Cohere"
      , default_base_url: "https://api.cohere.ai/v1"
      , model_hint: "command, command-light, command-nightly"
      , key_hint: KeyHint::Required("...")
      , family: WireFamily::Cohere
    }
  , ProviderProfile
    {   id: ProviderId::Ollama
      , label: "Ollama (Local)"
      , display_name: "Ollama"
      , default_base_url: "http://localhost:11434"
      , model_hint: "codellama, codellama:13b, deepseek-coder"
      , key_hint: KeyHint::NotRequired
      , family: WireFamily::Ollama
    }
  , ProviderProfile
    {   id: ProviderId::Xai
      , label: "XAI Foundation"
      , display_name: "XAI"
      , default_base_url: "https://api.xai-foundation.org/v1"
      , model_hint: "xai-large, xai-medium"
      , key_hint: KeyHint::Required("...")
      , family: WireFamily::OpenAiChat
    }
  , ProviderProfile
    {   id: ProviderId::Guiji
      , label: "硅基智能"
      , display_name: "硅基智能"
      , default_base_url: "https://api.siliconflow.cn/v1"
      , model_hint: "guiji-large, guiji-medium"
      , key_hint: KeyHint::Required("sk-...")
      , family: WireFamily::OpenAiChat
    }
];

/// Profile for a provider.
///
/// Total over [`ProviderId`]; the error arm only fires if a variant
/// was added without a table entry.
pub fn lookup(id: ProviderId)
  -> Result<&'static ProviderProfile, Error>
{   PROVIDERS
      .iter()
      .find(|profile| profile.id == id)
      .ok_or_else(|| {
        error!("No registry entry for provider: {}", id);
        Error::UnsupportedProvider(id.to_string())
      })
}

/// Profile for an untyped provider name (config files, form input).
pub fn lookup_name(name: &str)
  -> Result<&'static ProviderProfile, Error>
{   let id: ProviderId = name.parse()?;
    lookup(id)
}

/// Every profile, in selector order.
pub fn all() -> &'static [ProviderProfile]
{   PROVIDERS
}

impl ProviderId
{   /// Vendor name used in error messages.
    pub fn display_name(&self) -> &'static str
    {   lookup(*self)
          .map(|profile| profile.display_name)
          .unwrap_or_else(|_| self.as_str())
    }

    pub fn profile(&self)
      -> Result<&'static ProviderProfile, Error>
    {   lookup(*self)
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn every_provider_has_exactly_one_profile()
    {   for id in ProviderId::ALL
        {   let count = PROVIDERS.iter().filter(|p| p.id == id).count();
            assert_eq!(count, 1, "{} should have one profile", id);
        }
        assert_eq!(PROVIDERS.len(), ProviderId::ALL.len());
    }

    #[test]
    fn default_base_urls_are_well_formed()
    {   for profile in all()
        {   let url = reqwest::Url::parse(profile.default_base_url)
              .unwrap_or_else(|e| {
                panic!("{}: {}", profile.id, e)
              });
            assert!(
              matches!(url.scheme(), "http" | "https"),
              "{} has scheme {}", profile.id, url.scheme()
            );
            assert!(url.host_str().is_some());
            assert!(!profile.default_base_url.ends_with('/'));
        }
    }

    #[test]
    fn only_ollama_skips_the_key()
    {   for profile in all()
        {   assert_eq!(
              profile.key_hint.is_required(),
              profile.id != ProviderId::Ollama
            );
        }
        let ollama = lookup(ProviderId::Ollama).unwrap();
        assert_eq!(ollama.key_hint.placeholder(), "Not required");
    }

    #[test]
    fn openai_compatible_vendors_share_a_family()
    {   for id in [
          ProviderId::OpenAi
        , ProviderId::Mistral
        , ProviderId::Xai
        , ProviderId::Guiji
        ]
        {   assert_eq!(lookup(id).unwrap().family, WireFamily::OpenAiChat);
        }
    }

    #[test]
    fn lookup_name_rejects_unknown_provider()
    {   assert_eq!(
          lookup_name("bard"),
          Err(Error::UnsupportedProvider("bard".to_string()))
        );
        assert_eq!(
          lookup_name("gemini").unwrap().default_base_url,
          "https://generativelanguage.googleapis.com/v1"
        );
    }
}
