//! libcurl-backed [`HttpGet`].

use std::collections::HashMap;

use super::{HttpGet, RawResponse, TlsMaterial, TransportError};

/// One easy handle per request, configured with the startup TLS material.
/// Follows redirects; no retries.
#[derive(Debug, Clone, Default)]
pub struct CurlClient {
    tls: TlsMaterial,
}

impl CurlClient {
    pub fn new(tls: TlsMaterial) -> Self {
        Self { tls }
    }
}

impl HttpGet for CurlClient {
    fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<RawResponse, TransportError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        self.tls.apply(&mut easy)?;

        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(RawResponse { status, body })
    }
}
