use log::{debug, error, info, trace, warn};
use tokio_util::sync::CancellationToken;

use crate::config::DispatchConfig;
use crate::error::Error;
use crate::providers::WireCodec;
use crate::request::{Generation, GenerationRequest, HttpRequestSpec};
use crate::transport::{ReqwestTransport, Transport};
use crate::{GenerationResult, ProviderId};

/// Single entry point: routes a request to its wire family and
/// performs one HTTP exchange through the transport.
///
/// Holds nothing but the transport, so concurrent calls on one
/// dispatcher are independent.
#[derive(Debug, Clone)]
pub struct Dispatcher<T>
{   transport: T
}

impl Dispatcher<ReqwestTransport>
{   /// Dispatcher over a reqwest transport built from `config`.
    pub fn from_config(config: &DispatchConfig) -> Result<Self, Error>
    {   debug!("Creating Dispatcher from config");
        let transport = ReqwestTransport::new(&config.transport)?;
        Ok(Dispatcher::new(transport))
    }
}

impl<T: Transport> Dispatcher<T>
{   pub fn new(transport: T) -> Self
    {   Dispatcher { transport }
    }

    pub fn transport(&self) -> &T
    {   &self.transport
    }

    /// Validate and build the HTTP request without sending it.
    pub fn prepare(&self, request: &GenerationRequest)
      -> Result<HttpRequestSpec, Error>
    {   plan(request).map(|(_, spec)| spec)
    }

    /// Generate text; runs to completion.
    pub async fn generate(&self, request: &GenerationRequest)
      -> GenerationResult
    {   self.generate_cancellable(request, &CancellationToken::new())
          .await
    }

    /// Generate text, settling as [`Error::Cancelled`] once `cancel`
    /// fires. The in-flight exchange is dropped, which aborts it.
    pub async fn generate_cancellable(
      &self
    , request: &GenerationRequest
    , cancel: &CancellationToken
    ) -> GenerationResult
    {   let provider = request.provider;
        debug!("generate for {} model: {}", provider, request.model);

        let (codec, spec) = plan(request)?;
        trace!("{} request: {:?}", provider, spec);

        if cancel.is_cancelled()
        {   warn!("{} request cancelled before dispatch", provider);
            return Err(Error::Cancelled);
        }

        let response = tokio::select!
        {   biased;
            _ = cancel.cancelled() => {
              warn!("{} request cancelled in flight", provider);
              return Err(Error::Cancelled);
            }
          , sent = self.transport.send(&spec) => sent
        };

        let response = response.map_err(|e| {
          error!("{} transport failure: {}", provider, e);
          Error::Transport
          {   provider
            , status: None
            , reason: e.reason
          }
        })?;

        crate::providers::ensure_success(
          provider,
          response.status,
          &response.reason
        )?;

        let body: serde_json::Value = serde_json::from_slice(&response.body)
          .map_err(|e| {
            error!("{} returned a non-JSON body: {}", provider, e);
            Error::malformed(provider, "$")
          })?;

        let text = codec.extract(
          provider,
          response.status,
          &response.reason,
          &body
        )?;

        info!(
          "{} generated {} bytes with {}",
          provider.display_name(), text.len(), request.model
        );
        Ok(Generation
        {   text
          , provider
          , model: request.model.trim().to_string()
        })
    }

    /// Flat form of [`Dispatcher::generate`]; an empty or missing
    /// `base_url` means the provider default.
    pub async fn generate_text(
      &self
    , provider: ProviderId
    , model: &str
    , api_key: &str
    , prompt: &str
    , base_url: Option<&str>
    ) -> Result<String, Error>
    {   let request = GenerationRequest::new(provider, model, prompt)
          .with_api_key(api_key)
          .with_base_url(base_url.unwrap_or_default());
        self.generate(&request)
          .await
          .map(|generation| generation.text)
    }
}

fn plan(request: &GenerationRequest)
  -> Result<(&'static WireCodec, HttpRequestSpec), Error>
{   let resolved = request.resolve().map_err(|e| {
      error!("Rejected {} request: {}", request.provider, e);
      e
    })?;
    let codec = resolved.profile.family.codec();
    let spec = codec.build(&resolved)?;
    Ok((codec, spec))
}
