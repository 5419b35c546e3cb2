//! HTTP transport collaborator.
//!
//! The dispatcher talks to every provider through the same
//! [`Transport`]; nothing here knows about providers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, trace, warn};

use crate::config::TransportConfig;
use crate::error::Error;
use crate::request::{HttpRequestSpec, Method};

/// Raw outcome of an HTTP exchange. The body is left unparsed so
/// failure paths never decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse
{   pub status: u16
  , /// Status line reason, e.g. "Unauthorized"
    pub reason: String
  , pub body: Vec<u8>
}

/// The exchange never produced a usable answer: DNS, connect, TLS,
/// timeout, or a success body cut short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkError
{   pub reason: String
}

impl std::fmt::Display for NetworkError
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {   f.write_str(&self.reason)
    }
}

impl std::error::Error for NetworkError {}

#[async_trait]
pub trait Transport: Send + Sync
{   /// Perform exactly one HTTP exchange.
    async fn send(&self, request: &HttpRequestSpec)
      -> Result<TransportResponse, NetworkError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T>
{   async fn send(&self, request: &HttpRequestSpec)
      -> Result<TransportResponse, NetworkError>
    {   (**self).send(request).await
    }
}

/// Production transport over a single `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport
{   http_client: reqwest::Client
}

impl ReqwestTransport
{   pub fn new(config: &TransportConfig) -> Result<Self, Error>
    {   debug!("Creating ReqwestTransport: {:?}", config);
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs
        {   builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &config.user_agent
        {   builder = builder.user_agent(agent.clone());
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          Error::Configuration(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(ReqwestTransport { http_client })
    }

    /// Wrap an already configured client.
    pub fn with_client(http_client: reqwest::Client) -> Self
    {   ReqwestTransport { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport
{   async fn send(&self, request: &HttpRequestSpec)
      -> Result<TransportResponse, NetworkError>
    {   trace!("Sending {:?}", request);
        let mut builder = match request.method
        {   Method::Post => self.http_client.post(&request.url)
        };
        for (name, value) in &request.headers
        {   builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.body.is_empty()
        {   builder = builder.body(request.body.clone());
        }

        let response = builder.send().await.map_err(|e| {
          let reason = describe_reqwest_error(e);
          error!("HTTP error: {}", reason);
          NetworkError { reason }
        })?;

        let status = response.status();
        trace!("Response status: {}", status);
        let reason = status.canonical_reason().unwrap_or("").to_string();

        let body = match response.bytes().await
        {   Ok(body) => body.to_vec()
          , Err(e) if !status.is_success() => {
              // Failure bodies are never read, the status is the answer.
              warn!(
                "Dropped unreadable body of {} response: {}",
                status, describe_reqwest_error(e)
              );
              Vec::new()
            }
          , Err(e) => {
              let reason = describe_reqwest_error(e);
              error!("Failed to read response body: {}", reason);
              return Err(NetworkError { reason });
            }
        };

        Ok(TransportResponse
        {   status: status.as_u16()
          , reason
          , body
        })
    }
}

// The URL may carry an API key (Gemini), keep it out of messages.
fn describe_reqwest_error(e: reqwest::Error) -> String
{   let e = e.without_url();
    if e.is_timeout()
    {   format!("request timed out: {}", e)
    } else if e.is_connect()
    {   format!("connection failed: {}", e)
    } else
    {   e.to_string()
    }
}
