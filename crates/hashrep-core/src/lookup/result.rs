//! Per-indicator lookup results.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::indicator::Indicator;
use crate::normalize::ResultData;

/// How a single indicator resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The service returned reputation data.
    Hit(ResultData),
    /// Successful lookup with no matching record.
    Miss,
    /// The service answered 429; retry later.
    RateLimited,
}

/// One result per submitted indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub entity: Indicator,
    pub outcome: LookupOutcome,
}

impl LookupResult {
    /// Normalized data; None for misses and rate-limited lookups.
    pub fn data(&self) -> Option<&ResultData> {
        match &self.outcome {
            LookupOutcome::Hit(data) => Some(data),
            LookupOutcome::Miss | LookupOutcome::RateLimited => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self.outcome, LookupOutcome::RateLimited)
    }
}

// Host shape: `{ entity, data: null | {summary, details} }`, plus
// `rateLimited: true` when the service throttled the request.
impl Serialize for LookupResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rate_limited = self.is_rate_limited();
        let len = if rate_limited { 3 } else { 2 };
        let mut s = serializer.serialize_struct("LookupResult", len)?;
        s.serialize_field("entity", &self.entity)?;
        s.serialize_field("data", &self.data())?;
        if rate_limited {
            s.serialize_field("rateLimited", &true)?;
        }
        s.end()
    }
}
