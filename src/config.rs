//! Configuration for the HTTP transport and logging
//!
//! Provider defaults live in the registry and are not configurable.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Transport configuration, handed to [`crate::ReqwestTransport`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig
{   /// Whole-request timeout in seconds, none means reqwest's default
    pub timeout_secs: Option<u64>
  , /// Connect timeout in seconds
    pub connect_timeout_secs: Option<u64>
  , /// User-Agent header
    pub user_agent: Option<String>
}

/// Dispatch configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig
{   pub transport: TransportConfig
  , /// env_logger filter, e.g. "llm_dispatch=debug"
    pub log_level: Option<String>
}

impl DispatchConfig
{   pub fn from_json_str(json: &str) -> Result<Self, Error>
    {   serde_json::from_str(json).map_err(|e| {
          Error::Configuration(format!("failed to parse config: {}", e))
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error>
    {   let path = path.as_ref();
        debug!("Loading dispatch config from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| {
          Error::Configuration(format!(
            "failed to read {}: {}", path.display(), e
          ))
        })?;
        Self::from_json_str(&text)
    }

    /// Install env_logger. `RUST_LOG` wins over `log_level`; a logger
    /// that is already installed is left alone.
    pub fn init_logging(&self)
    {   let default_filter = self.log_level
          .as_deref()
          .unwrap_or("info");
        let env = env_logger::Env::default()
          .default_filter_or(default_filter);
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn empty_object_gives_defaults()
    {   let config = DispatchConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DispatchConfig::default());
        assert_eq!(config.transport.timeout_secs, None);
    }

    #[test]
    fn partial_config_parses()
    {   let config = DispatchConfig::from_json_str(r#"{
          "transport": { "timeout_secs": 30, "user_agent": "coder/1.0" },
          "log_level": "debug"
        }"#).unwrap();
        assert_eq!(config.transport.timeout_secs, Some(30));
        assert_eq!(config.transport.connect_timeout_secs, None);
        assert_eq!(config.transport.user_agent.as_deref(), Some("coder/1.0"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_json_is_a_configuration_error()
    {   let err = DispatchConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn missing_file_is_a_configuration_error()
    {   let err = DispatchConfig::from_path("/definitely/not/here.json")
          .unwrap_err();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains("here.json")));
    }

    #[test]
    fn init_logging_is_idempotent()
    {   let config = DispatchConfig::default();
        config.init_logging();
        config.init_logging();
    }
}
