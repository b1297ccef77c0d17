//! HTTP client adapter.
//!
//! The lookup service only depends on [`HttpGet`]; the production
//! implementation is [`CurlClient`], built once at startup from the
//! `[request]` config section and shared read-only afterwards.

mod curl_client;
mod tls;

pub use curl_client::CurlClient;
pub use tls::TlsMaterial;

use anyhow::Result;
use std::collections::HashMap;

use crate::config::RequestConfig;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// The request never produced an HTTP status (DNS, connect, TLS, read failure).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Curl(#[from] curl::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Blocking GET. Implementations must be shareable across worker threads.
pub trait HttpGet: Send + Sync {
    fn get(&self, url: &str, headers: &HashMap<String, String>)
        -> Result<RawResponse, TransportError>;
}

/// Read TLS material from the configured paths and build the client.
/// Fails if any configured file cannot be read.
pub fn initialize(request: &RequestConfig) -> Result<CurlClient> {
    let tls = TlsMaterial::load(request)?;
    tracing::debug!(
        client_cert = tls.has_client_cert(),
        ca = tls.has_ca(),
        proxy = tls.has_proxy(),
        "http client initialized"
    );
    Ok(CurlClient::new(tls))
}
