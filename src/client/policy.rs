//! Retry decisions: which outcomes get another attempt and how long to wait.

use crate::transport::{Method, TransportError, TransportResponse};
use std::time::Duration;

/// Statuses worth another attempt.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Upper bound for a single backoff sleep.
pub const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Internal decision for how to proceed after one transport attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Done,
}

/// Retry policy for the transport call.
///
/// Prefer deterministic, explainable behavior over clever heuristics: the
/// delay depends only on the attempt number, the multiplier and an optional
/// server `Retry-After` hint.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_multiplier: f64) -> Self {
        Self {
            max_retries,
            backoff_multiplier,
        }
    }

    pub fn allows_method(&self, method: Method) -> bool {
        matches!(
            method,
            Method::Get | Method::Post | Method::Put | Method::Delete | Method::Patch
        )
    }

    pub fn is_retryable_status(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// `multiplier * 2^attempt` seconds, capped at [`MAX_BACKOFF`].
    ///
    /// `attempt` is 0-based (delay before the first retry => attempt=0).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2f64.powi(attempt.min(63) as i32);
        let secs = self.backoff_multiplier * factor;
        if !secs.is_finite() || secs >= MAX_BACKOFF.as_secs_f64() {
            return MAX_BACKOFF;
        }
        if secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(secs)
    }

    /// Decide what to do after a received response.
    pub(crate) fn decide_response(
        &self,
        method: Method,
        response: &TransportResponse,
        attempt: u32,
    ) -> Decision {
        if attempt >= self.max_retries
            || !self.allows_method(method)
            || !Self::is_retryable_status(response.status)
        {
            return Decision::Done;
        }
        let mut delay = self.backoff_delay(attempt);
        if matches!(response.status, 429 | 503) {
            if let Some(hint) = response.retry_after() {
                delay = delay.max(hint).min(MAX_BACKOFF);
            }
        }
        Decision::Retry { delay }
    }

    /// Decide what to do after a transport failure (no response).
    pub(crate) fn decide_error(&self, method: Method, err: &TransportError, attempt: u32) -> Decision {
        if attempt >= self.max_retries || !self.allows_method(method) || !err.is_retryable() {
            return Decision::Done;
        }
        Decision::Retry {
            delay: self.backoff_delay(attempt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn backoff_is_exponential_and_monotonic() {
        let p = RetryPolicy::new(10, 0.5);
        assert_eq!(p.backoff_delay(0), Duration::from_millis(500));
        assert_eq!(p.backoff_delay(1), Duration::from_secs(1));
        assert_eq!(p.backoff_delay(2), Duration::from_secs(2));
        let mut prev = Duration::ZERO;
        for attempt in 0..80 {
            let d = p.backoff_delay(attempt);
            assert!(d >= prev, "attempt {}", attempt);
            assert!(d <= MAX_BACKOFF);
            prev = d;
        }
    }

    #[test]
    fn zero_multiplier_means_no_sleep() {
        let p = RetryPolicy::new(3, 0.0);
        assert_eq!(p.backoff_delay(5), Duration::ZERO);
    }

    #[test]
    fn retries_only_listed_statuses_within_budget() {
        let p = RetryPolicy::new(2, 0.0);
        let busy = TransportResponse::new(503, "");
        assert!(matches!(p.decide_response(Method::Get, &busy, 0), Decision::Retry { .. }));
        assert!(matches!(p.decide_response(Method::Post, &busy, 1), Decision::Retry { .. }));
        assert_eq!(p.decide_response(Method::Get, &busy, 2), Decision::Done);

        for status in [200, 400, 401, 404, 422, 501] {
            let resp = TransportResponse::new(status, "");
            assert_eq!(p.decide_response(Method::Get, &resp, 0), Decision::Done, "{}", status);
        }
    }

    #[test]
    fn retry_after_raises_delay_on_429() {
        let p = RetryPolicy::new(3, 1.0);
        let mut resp = TransportResponse::new(429, "");
        resp.headers.insert("retry-after", HeaderValue::from_static("5"));
        assert_eq!(
            p.decide_response(Method::Get, &resp, 0),
            Decision::Retry {
                delay: Duration::from_secs(5)
            }
        );
        // Backoff wins when it is already larger than the hint.
        resp.headers.insert("retry-after", HeaderValue::from_static("1"));
        assert_eq!(
            p.decide_response(Method::Get, &resp, 2),
            Decision::Retry {
                delay: Duration::from_secs(4)
            }
        );
    }

    #[test]
    fn transport_errors() {
        let p = RetryPolicy::new(1, 0.0);
        assert!(matches!(
            p.decide_error(Method::Delete, &TransportError::Timeout, 0),
            Decision::Retry { .. }
        ));
        assert!(matches!(
            p.decide_error(Method::Get, &TransportError::Connect("refused".into()), 0),
            Decision::Retry { .. }
        ));
        assert_eq!(
            p.decide_error(Method::Get, &TransportError::Other("bad url".into()), 0),
            Decision::Done
        );
        assert_eq!(p.decide_error(Method::Get, &TransportError::Timeout, 1), Decision::Done);
    }
}
