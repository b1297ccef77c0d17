//! Request construction for a single indicator.

use std::collections::HashMap;
use url::Url;

use super::{LookupError, LookupOptions};
use crate::indicator::Indicator;

pub const API_KEY_HEADER: &str = "X-Apikey";

/// GET `{base}/api/v3/files/{hash}` with the API key header.
#[derive(Clone)]
pub struct LookupRequest {
    pub indicator: Indicator,
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl LookupRequest {
    pub fn new(indicator: Indicator, options: &LookupOptions) -> Result<Self, LookupError> {
        let url = file_url(&options.url, &indicator.value)?;
        let mut headers = HashMap::new();
        headers.insert(API_KEY_HEADER.to_string(), options.api_key.clone());
        headers.insert("Accept".to_string(), "application/json".to_string());
        Ok(Self {
            indicator,
            url,
            headers,
        })
    }
}

fn file_url(base: &str, hash: &str) -> Result<String, LookupError> {
    let invalid = |reason: String| LookupError::InvalidUrl {
        base: base.to_string(),
        reason,
    };
    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(["api", "v3", "files", hash]);
    Ok(url.into())
}

impl std::fmt::Debug for LookupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        f.debug_struct("LookupRequest")
            .field("indicator", &self.indicator)
            .field("url", &self.url)
            .field("headers", &headers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::IndicatorType;

    fn opts(url: &str) -> LookupOptions {
        LookupOptions {
            url: url.to_string(),
            api_key: "secret-key".to_string(),
        }
    }

    fn md5() -> Indicator {
        Indicator::new("d41d8cd98f00b204e9800998ecf8427e", IndicatorType::Md5)
    }

    #[test]
    fn builds_files_url_and_api_key_header() {
        let req = LookupRequest::new(md5(), &opts("https://reputation.app.stairwell.com")).unwrap();
        assert_eq!(
            req.url,
            "https://reputation.app.stairwell.com/api/v3/files/d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(req.headers.get("X-Apikey").map(String::as_str), Some("secret-key"));
    }

    #[test]
    fn trailing_slash_and_prefix_path_are_kept_clean() {
        let req = LookupRequest::new(md5(), &opts("https://proxy.example.test/rep/")).unwrap();
        assert_eq!(
            req.url,
            "https://proxy.example.test/rep/api/v3/files/d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn invalid_base_url_is_error() {
        let err = LookupRequest::new(md5(), &opts("not a url")).unwrap_err();
        assert!(matches!(err, LookupError::InvalidUrl { .. }));
    }

    #[test]
    fn debug_hides_api_key() {
        let req = LookupRequest::new(md5(), &opts("https://reputation.app.stairwell.com")).unwrap();
        let dbg = format!("{:?}", req);
        assert!(dbg.contains("X-Apikey"));
        assert!(!dbg.contains("secret-key"));
    }
}
