//! Batch lookup: one GET per indicator, bounded concurrency, fail-fast on
//! transport errors and unexpected statuses.

mod error;
mod request;
mod result;
mod service;

pub use error::LookupError;
pub use request::LookupRequest;
pub use result::{LookupOutcome, LookupResult};
pub use service::LookupService;

/// Default maximum number of requests in flight per batch.
pub const MAX_CONCURRENT_LOOKUPS: usize = 10;

/// Per-invocation options supplied by the host.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupOptions {
    /// Service base URL, e.g. `https://reputation.app.stairwell.com`.
    pub url: String,
    pub api_key: String,
}

impl std::fmt::Debug for LookupOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupOptions")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
