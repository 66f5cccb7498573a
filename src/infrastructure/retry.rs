//! Retry controller - bounded retries with classification and backoff
//!
//! Wraps one fetch-and-extract operation in an explicit state machine:
//! `Attempting → (Succeeded | Exhausted | Backoff → Attempting)`. Each raw
//! attempt outcome goes through a pure classification into terminal,
//! retryable, or success; only retryable outcomes consume further attempts.
//! Not-found is terminal on the first sighting - retrying cannot change
//! whether a profile exists.
//!
//! Every attempt's document is released before the next attempt opens a
//! new one, and before any backoff sleep.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use super::fetcher::{Document, DocumentFetcher, FetchError};

/// Request-level failure surfaced to the caller, one human-readable cause
/// category each.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The identity does not exist on the source. Terminal, never retried.
    #[error("summoner not found")]
    NotFound,

    /// Non-success HTTP status, most commonly anti-bot interception.
    #[error("temporarily blocked by the source (http {status})")]
    Blocked { status: u16 },

    /// Navigation exceeded its bound.
    #[error("request timed out")]
    Timeout,

    /// Transport failure below HTTP.
    #[error("network failure: {0}")]
    Network(String),
}

impl From<FetchError> for LookupError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::Timeout => Self::Timeout,
            FetchError::Network(message) => Self::Network(message),
        }
    }
}

/// Pure classification of one attempt's outcome.
#[derive(Debug)]
pub(crate) enum AttemptOutcome<T> {
    Success(T),
    Terminal(LookupError),
    Retryable(LookupError),
}

pub(crate) fn classify<T>(result: Result<T, LookupError>) -> AttemptOutcome<T> {
    match result {
        Ok(value) => AttemptOutcome::Success(value),
        Err(LookupError::NotFound) => AttemptOutcome::Terminal(LookupError::NotFound),
        Err(retryable) => AttemptOutcome::Retryable(retryable),
    }
}

/// Retry state machine positions.
#[derive(Debug)]
enum RetryState {
    /// About to run the numbered attempt.
    Attempting(u32),
    /// Waiting out a delay before the numbered attempt.
    Backoff(u32, Duration),
}

/// Drives a fetch-and-extract operation with bounded retries and growing
/// backoff delays.
#[derive(Debug, Clone)]
pub struct RetryController {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryController {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(2000),
        }
    }
}

impl RetryController {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before the attempt after `attempt` failures: grows linearly,
    /// so consecutive delays are strictly increasing.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Open `url` via `fetcher` and run `extract` over the document, with
    /// blocking/timeout classification and bounded retries.
    ///
    /// `extract` is synchronous and read-only against the document; it
    /// reports [`LookupError::NotFound`] when the identity cannot be
    /// resolved at all, which short-circuits immediately.
    pub async fn run<T, F>(
        &self,
        fetcher: &dyn DocumentFetcher,
        url: &str,
        timeout: Duration,
        extract: F,
    ) -> Result<T, LookupError>
    where
        F: Fn(&Document) -> Result<T, LookupError>,
    {
        let mut state = RetryState::Attempting(1);
        let mut last_error = LookupError::Network("no attempt made".to_string());

        loop {
            match state {
                RetryState::Backoff(next_attempt, delay) => {
                    debug!(attempt = next_attempt, ?delay, "backing off before retry");
                    tokio::time::sleep(delay).await;
                    state = RetryState::Attempting(next_attempt);
                }
                RetryState::Attempting(attempt) => {
                    // The document handle lives only inside this block; it
                    // is dropped before any backoff sleep.
                    let outcome = match fetcher.open(url, timeout).await {
                        Ok(doc) if !doc.is_success() => {
                            AttemptOutcome::Retryable(LookupError::Blocked {
                                status: doc.status(),
                            })
                        }
                        Ok(doc) => classify(extract(&doc)),
                        Err(fetch_error) => classify(Err(fetch_error.into())),
                    };

                    match outcome {
                        AttemptOutcome::Success(value) => {
                            debug!(attempt, url, "lookup succeeded");
                            return Ok(value);
                        }
                        AttemptOutcome::Terminal(error) => {
                            debug!(attempt, url, %error, "terminal failure, not retrying");
                            return Err(error);
                        }
                        AttemptOutcome::Retryable(error) => {
                            warn!(attempt, url, %error, "attempt failed");
                            last_error = error;
                            if attempt >= self.max_attempts {
                                warn!(url, attempts = attempt, "retries exhausted");
                                return Err(last_error);
                            }
                            state =
                                RetryState::Backoff(attempt + 1, self.backoff_delay(attempt));
                        }
                    }
                }
            }
        }
    }
}
