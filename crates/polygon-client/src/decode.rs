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
//! Response decoding and domain validation
//!
//! Decoding turns a 200 body into a typed model. Validation is separate and
//! pluggable: each endpoint family owns a [`StatusPolicy`] naming the status
//! strings it accepts and whether an empty result set is an error.

use polygon_core::{ApiError, Error, Result};
use polygon_models::ApiResponse;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::error;

/// Decode a JSON body into `T`
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
  serde_json::from_slice(body).map_err(|e| {
    let preview = String::from_utf8_lossy(&body[..body.len().min(200)]);
    error!("Failed to parse JSON response: {} (body starts with: {})", e, preview);
    Error::Serde(e)
  })
}

/// Parse a plain numeric body
pub fn decode_f64(body: &[u8]) -> Result<f64> {
  let text = String::from_utf8_lossy(body);
  text.trim().parse().map_err(|_| Error::Parse(format!("expected a number, got {:?}", text.trim())))
}

/// Acceptance rule for the `status` envelope of one endpoint family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
  /// Short family name used in error messages, e.g. `sma`
  pub family: &'static str,
  pub accepted: &'static [&'static str],
  /// Treat an empty result set as [`Error::NoResults`]
  pub require_results: bool,
}

impl StatusPolicy {
  /// `OK` only, results required
  pub const fn ok_only(family: &'static str) -> Self {
    Self { family, accepted: &["OK"], require_results: true }
  }

  /// `OK` or `DELAYED`, results required
  pub const fn ok_or_delayed(family: &'static str) -> Self {
    Self { family, accepted: &["OK", "DELAYED"], require_results: true }
  }

  pub const fn allow_empty(mut self) -> Self {
    self.require_results = false;
    self
  }

  pub fn accepts(&self, status: &str) -> bool {
    self.accepted.iter().any(|s| *s == status)
  }
}

/// Apply a status policy to a decoded response
pub fn ensure_valid<R: ApiResponse>(response: &R, policy: &StatusPolicy) -> Result<()> {
  if !policy.accepts(response.status()) {
    return Err(Error::UnexpectedStatus { family: policy.family, status: response.status().to_string() });
  }
  if policy.require_results && response.result_count() == 0 {
    return Err(Error::NoResults(policy.family));
  }
  Ok(())
}

#[derive(Deserialize)]
struct ErrorEnvelope {
  request_id: Option<String>,
  error: Option<String>,
  message: Option<String>,
}

/// Fill the request id of a non-200 error from its body when the body is a
/// Polygon JSON error envelope. The message is kept as the raw body text.
pub fn enrich_api_error(mut api_error: ApiError, body: &[u8]) -> ApiError {
  if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
    if let Some(id) = envelope.request_id.filter(|id| !id.is_empty()) {
      api_error = api_error.with_request_id(id);
    }
    if api_error.message.is_empty() {
      if let Some(text) = envelope.error.or(envelope.message) {
        api_error.message = text;
      }
    }
  }
  api_error
}

#[cfg(test)]
mod tests {
  use super::*;
  use polygon_models::{Aggregation, IndicatorResponse};

  const SMA: StatusPolicy = StatusPolicy::ok_only("sma");

  #[test]
  fn test_decode_success() {
    let agg: Aggregation = decode(br#"{"ticker":"AAPL","status":"OK","count":0}"#).unwrap();
    assert_eq!(agg.ticker, "AAPL");
  }

  #[test]
  fn test_decode_failure_is_serde_error() {
    let result: Result<Aggregation> = decode(b"<html>bad gateway</html>");
    assert!(matches!(result, Err(Error::Serde(_))));
  }

  #[test]
  fn test_decode_f64() {
    assert_eq!(decode_f64(b" 42.5\n").unwrap(), 42.5);
    assert!(decode_f64(b"abc").is_err());
  }

  #[test]
  fn test_ensure_valid_rejects_status() {
    let resp: IndicatorResponse =
      decode(br#"{"status":"DELAYED","results":{"values":[{"timestamp":1,"value":2.0}]}}"#).unwrap();
    let err = ensure_valid(&resp, &SMA).unwrap_err();

    assert!(matches!(err, Error::UnexpectedStatus { family: "sma", ref status } if status == "DELAYED"));
    assert!(ensure_valid(&resp, &StatusPolicy::ok_or_delayed("sma")).is_ok());
  }

  #[test]
  fn test_ensure_valid_requires_results() {
    let resp: IndicatorResponse = decode(br#"{"status":"OK","results":{"values":[]}}"#).unwrap();

    assert!(matches!(ensure_valid(&resp, &SMA), Err(Error::NoResults("sma"))));
    assert!(ensure_valid(&resp, &SMA.allow_empty()).is_ok());
  }

  #[test]
  fn test_enrich_api_error() {
    let body = br#"{"status":"NOT_FOUND","request_id":"abc123","message":"Data not found."}"#;
    let err = enrich_api_error(ApiError::new("404 Not Found", String::from_utf8_lossy(body)), body);
    assert_eq!(err.request_id.as_deref(), Some("abc123"));
    assert!(err.message.contains("Data not found."));

    let plain = enrich_api_error(ApiError::new("404 Not Found", "not found"), b"not found");
    assert_eq!(plain.request_id, None);
    assert_eq!(plain.message, "not found");

    let empty = enrich_api_error(ApiError::new("401 Unauthorized", ""), br#"{"error":"bad key"}"#);
    assert_eq!(empty.message, "bad key");
  }
}
