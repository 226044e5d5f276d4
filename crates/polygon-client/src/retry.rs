/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
//! Transient-error classification and retry policy for the request executor
//!
//! A [`TransportError`] is a failure below HTTP: the request never produced a
//! status line. Whether such a failure is worth repeating is decided by a
//! [`RetryClassifier`]; how often and how fast is decided by a [`RetryPolicy`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Broad category of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
  /// Could not establish a connection (DNS, refused, TLS)
  Connect,
  /// The request or connection timed out
  Timeout,
  /// Failure while sending the request or awaiting the response head
  Request,
  /// Failure while reading the response body
  Body,
  Other,
}

/// Transport-level failure with its flattened source chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
  pub kind: TransportErrorKind,
  pub message: String,
}

impl TransportError {
  pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
    Self { kind, message: message.into() }
  }
}

impl fmt::Display for TransportError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}: {}", self.kind, self.message)
  }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
  fn from(err: reqwest::Error) -> Self {
    let kind = if err.is_timeout() {
      TransportErrorKind::Timeout
    } else if err.is_connect() {
      TransportErrorKind::Connect
    } else if err.is_body() || err.is_decode() {
      TransportErrorKind::Body
    } else if err.is_request() {
      TransportErrorKind::Request
    } else {
      TransportErrorKind::Other
    };

    // hyper and h2 keep the interesting text (GOAWAY, REFUSED_STREAM) deep in the chain
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
      message.push_str(": ");
      message.push_str(&cause.to_string());
      source = cause.source();
    }

    Self { kind, message }
  }
}

/// Decides whether a transport failure may be retried
pub trait RetryClassifier: Send + Sync {
  fn is_retryable(&self, error: &TransportError) -> bool;
}

impl<F> RetryClassifier for F
where
  F: Fn(&TransportError) -> bool + Send + Sync,
{
  fn is_retryable(&self, error: &TransportError) -> bool {
    self(error)
  }
}

const CONNECTION_CLOSED_PATTERNS: &[&str] = &[
  "goaway",
  "refused stream",
  "refused_stream",
  "stream not processed",
  "connection closed before message completed",
];

fn mentions_any(message: &str, patterns: &[&str]) -> bool {
  let lower = message.to_ascii_lowercase();
  patterns.iter().any(|p| lower.contains(p))
}

/// Retries only when the server closed the connection or stream before
/// processing the request: HTTP/2 `GOAWAY`, `REFUSED_STREAM`, or a pooled
/// HTTP/1 connection that was closed underneath us.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionClosedClassifier;

impl RetryClassifier for ConnectionClosedClassifier {
  fn is_retryable(&self, error: &TransportError) -> bool {
    mentions_any(&error.message, CONNECTION_CLOSED_PATTERNS)
  }
}

/// [`ConnectionClosedClassifier`] plus timeouts and connection resets
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientNetworkClassifier;

impl RetryClassifier for TransientNetworkClassifier {
  fn is_retryable(&self, error: &TransportError) -> bool {
    error.kind == TransportErrorKind::Timeout
      || ConnectionClosedClassifier.is_retryable(error)
      || mentions_any(&error.message, &["connection reset"])
  }
}

/// Exponential delay between attempts, capped at `max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
  pub initial: Duration,
  pub max: Duration,
  pub multiplier: f64,
}

impl Backoff {
  /// Retry immediately
  pub fn none() -> Self {
    Self { initial: Duration::ZERO, max: Duration::ZERO, multiplier: 1.0 }
  }

  pub fn exponential(initial: Duration, max: Duration) -> Self {
    Self { initial, max, multiplier: 2.0 }
  }

  /// Delay before retry number `retry` (1-based)
  pub fn delay(&self, retry: u32) -> Duration {
    if self.initial.is_zero() {
      return Duration::ZERO;
    }
    let exponent = retry.saturating_sub(1).min(32) as i32;
    let secs = self.initial.as_secs_f64() * self.multiplier.powi(exponent);
    if !secs.is_finite() || secs >= self.max.as_secs_f64() {
      self.max
    } else if secs <= 0.0 {
      Duration::ZERO
    } else {
      Duration::from_secs_f64(secs)
    }
  }
}

impl Default for Backoff {
  fn default() -> Self {
    Self::none()
  }
}

/// How a single logical request reacts to transport failures
#[derive(Clone)]
pub struct RetryPolicy {
  /// Retries after the first attempt; `None` retries for as long as the classifier agrees
  pub max_retries: Option<u32>,
  pub backoff: Backoff,
  pub classifier: Arc<dyn RetryClassifier>,
}

impl RetryPolicy {
  pub fn new(classifier: impl RetryClassifier + 'static) -> Self {
    Self { classifier: Arc::new(classifier), ..Self::default() }
  }

  /// Never retry
  pub fn no_retry() -> Self {
    Self { max_retries: Some(0), ..Self::default() }
  }

  pub fn with_max_retries(mut self, max_retries: Option<u32>) -> Self {
    self.max_retries = max_retries;
    self
  }

  pub fn with_backoff(mut self, backoff: Backoff) -> Self {
    self.backoff = backoff;
    self
  }

  pub fn is_retryable(&self, error: &TransportError) -> bool {
    self.classifier.is_retryable(error)
  }

  /// Whether another attempt is allowed after `retries_done` retries
  pub fn has_budget(&self, retries_done: u32) -> bool {
    self.max_retries.map_or(true, |max| retries_done < max)
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self { max_retries: None, backoff: Backoff::none(), classifier: Arc::new(ConnectionClosedClassifier) }
  }
}

impl fmt::Debug for RetryPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RetryPolicy")
      .field("max_retries", &self.max_retries)
      .field("backoff", &self.backoff)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request_error(message: &str) -> TransportError {
    TransportError::new(TransportErrorKind::Request, message)
  }

  #[test]
  fn test_goaway_is_retryable() {
    let err = request_error("error sending request: http2: server sent GOAWAY and closed the connection");
    assert!(ConnectionClosedClassifier.is_retryable(&err));
  }

  #[test]
  fn test_refused_stream_is_retryable() {
    let err = request_error(
      "error sending request: stream error received: refused stream before processing any application logic",
    );
    assert!(ConnectionClosedClassifier.is_retryable(&err));

    let err = request_error("connection closed before message completed");
    assert!(ConnectionClosedClassifier.is_retryable(&err));
  }

  #[test]
  fn test_other_failures_are_not_retryable() {
    let dns = TransportError::new(TransportErrorKind::Connect, "dns error: failed to lookup address information");
    let timeout = TransportError::new(TransportErrorKind::Timeout, "operation timed out");
    let tls = TransportError::new(TransportErrorKind::Connect, "invalid peer certificate: UnknownIssuer");

    assert!(!ConnectionClosedClassifier.is_retryable(&dns));
    assert!(!ConnectionClosedClassifier.is_retryable(&timeout));
    assert!(!ConnectionClosedClassifier.is_retryable(&tls));
  }

  #[test]
  fn test_transient_network_classifier() {
    let timeout = TransportError::new(TransportErrorKind::Timeout, "operation timed out");
    let reset = request_error("connection reset by peer");
    let dns = TransportError::new(TransportErrorKind::Connect, "dns error");

    assert!(TransientNetworkClassifier.is_retryable(&timeout));
    assert!(TransientNetworkClassifier.is_retryable(&reset));
    assert!(TransientNetworkClassifier.is_retryable(&request_error("GOAWAY")));
    assert!(!TransientNetworkClassifier.is_retryable(&dns));
  }

  #[test]
  fn test_closure_classifier() {
    let policy = RetryPolicy::new(|e: &TransportError| e.kind == TransportErrorKind::Body);
    assert!(policy.is_retryable(&TransportError::new(TransportErrorKind::Body, "eof")));
    assert!(!policy.is_retryable(&request_error("GOAWAY")));
  }

  #[test]
  fn test_default_policy_is_unbounded() {
    let policy = RetryPolicy::default();
    assert!(policy.max_retries.is_none());
    assert!(policy.has_budget(u32::MAX - 1));
    assert_eq!(policy.backoff.delay(5), Duration::ZERO);
  }

  #[test]
  fn test_bounded_budget() {
    let policy = RetryPolicy::default().with_max_retries(Some(2));
    assert!(policy.has_budget(0));
    assert!(policy.has_budget(1));
    assert!(!policy.has_budget(2));
    assert!(!RetryPolicy::no_retry().has_budget(0));
  }

  #[test]
  fn test_backoff_grows_and_caps() {
    let backoff = Backoff::exponential(Duration::from_millis(100), Duration::from_millis(500));
    assert_eq!(backoff.delay(1), Duration::from_millis(100));
    assert_eq!(backoff.delay(2), Duration::from_millis(200));
    assert_eq!(backoff.delay(3), Duration::from_millis(400));
    assert_eq!(backoff.delay(4), Duration::from_millis(500));
    assert_eq!(backoff.delay(40), Duration::from_millis(500));
  }

  #[test]
  fn test_backoff_negative_multiplier_never_negative() {
    let backoff = Backoff { initial: Duration::from_millis(100), max: Duration::from_secs(1), multiplier: -2.0 };
    assert_eq!(backoff.delay(1), Duration::from_millis(100));
    assert_eq!(backoff.delay(2), Duration::ZERO);
    assert_eq!(backoff.delay(3), Duration::from_millis(400));
  }
}
