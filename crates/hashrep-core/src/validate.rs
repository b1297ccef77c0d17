//! Option validation. Problems are reported as data, never as errors.

use serde::Serialize;
use std::fmt;

use crate::lookup::LookupOptions;

/// One misconfigured option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Option key, e.g. `apiKey`.
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Check the user options. Returns an empty list when they are usable.
pub fn validate_options(options: &LookupOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if options.api_key.is_empty() {
        errors.push(ValidationError {
            key: "apiKey".to_string(),
            message: "You must provide a valid API key".to_string(),
        });
    }
    errors
}
