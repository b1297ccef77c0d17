//! Bounded-concurrency batch lookup.
//!
//! Keeps up to `max_concurrent` requests in flight; when one settles the next
//! queued indicator is started until the queue is empty. Each result is stored
//! in the slot of its input index, so output order matches input order no
//! matter which request finishes first.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::{LookupError, LookupOptions, LookupOutcome, LookupRequest, LookupResult};
use super::MAX_CONCURRENT_LOOKUPS;
use crate::http::{HttpGet, RawResponse, TransportError};
use crate::indicator::Indicator;
use crate::normalize::{classify_body, normalize};

/// Runs lookup batches against an injected HTTP client. Holds no per-batch
/// state, so one service can serve any number of batches.
pub struct LookupService<C> {
    client: Arc<C>,
    max_concurrent: usize,
}

impl<C: HttpGet + 'static> LookupService<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
            max_concurrent: MAX_CONCURRENT_LOOKUPS,
        }
    }

    /// Override the in-flight limit (clamped to at least 1).
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Look up every indicator. Returns one result per indicator in input
    /// order, or the first fatal error. On a fatal error no further requests
    /// are started and queued ones are cancelled; transfers already running
    /// finish on the blocking pool and their results are discarded.
    pub async fn lookup(
        &self,
        indicators: &[Indicator],
        options: &LookupOptions,
    ) -> Result<Vec<LookupResult>, LookupError> {
        tracing::trace!(entities = ?indicators, "entities");

        let mut queue = indicators
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, ind)| LookupRequest::new(ind, options).map(|req| (index, req)))
            .collect::<Result<VecDeque<_>, _>>()?;

        let mut slots: Vec<Option<LookupResult>> = vec![None; indicators.len()];
        let mut join_set = JoinSet::new();

        loop {
            while join_set.len() < self.max_concurrent {
                let Some((index, request)) = queue.pop_front() else {
                    break;
                };
                tracing::debug!(request = ?request, "request URI");
                let client = Arc::clone(&self.client);
                join_set.spawn_blocking(move || {
                    let response = client.get(&request.url, &request.headers);
                    (index, request.indicator, response)
                });
            }

            let Some(joined) = join_set.join_next().await else {
                break;
            };
            let (index, entity, response) = joined?;
            let outcome = match resolve(&entity, response) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(entity = %entity.value, error = %e, "lookup batch aborted");
                    join_set.abort_all();
                    return Err(e);
                }
            };
            tracing::trace!(entity = %entity.value, ?outcome, "checking on the results");
            slots[index] = Some(LookupResult { entity, outcome });
        }

        let results: Vec<LookupResult> = slots.into_iter().flatten().collect();
        debug_assert_eq!(results.len(), indicators.len());
        tracing::trace!(results = ?results, "lookup results");
        Ok(results)
    }
}

/// Map one response to an outcome or a fatal error.
fn resolve(
    entity: &Indicator,
    response: Result<RawResponse, TransportError>,
) -> Result<LookupOutcome, LookupError> {
    let response = response.map_err(|source| LookupError::Transport {
        entity: entity.value.clone(),
        source,
    })?;

    match response.status {
        200 => {
            let body = classify_body(&response.body).map_err(|source| LookupError::InvalidBody {
                entity: entity.value.clone(),
                source,
            })?;
            Ok(match body {
                Some(body) => LookupOutcome::Hit(normalize(body)),
                None => LookupOutcome::Miss,
            })
        }
        429 => {
            tracing::warn!(entity = %entity.value, "reached API lookup limit");
            Ok(LookupOutcome::RateLimited)
        }
        status => Err(LookupError::UnexpectedStatus {
            entity: entity.value.clone(),
            status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }),
    }
}
