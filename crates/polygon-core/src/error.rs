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
use thiserror::Error;

/// Structured error for a non-200 HTTP response.
///
/// `status` is the HTTP status line (e.g. `404 Not Found`) and `message` the raw
/// response body. `request_id` is only known when the body was JSON carrying one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
  pub status: String,
  pub message: String,
  pub request_id: Option<String>,
}

impl ApiError {
  pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
    Self { status: status.into(), message: message.into(), request_id: None }
  }

  pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
    self.request_id = Some(request_id.into());
    self
  }
}

impl std::fmt::Display for ApiError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}: {} (request id: {})",
      self.status,
      self.message,
      self.request_id.as_deref().unwrap_or("")
    )
  }
}

impl std::error::Error for ApiError {}

/// The main error type for polygon-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// API key error
  #[error("Failed to retrieve API key: {0}")]
  ApiKey(String),

  /// Serialization/Deserialization error
  #[error("Serialization error: {0}")]
  Serde(#[from] serde_json::Error),

  /// Response body could not be parsed as the expected scalar
  #[error("Parse error: {0}")]
  Parse(String),

  /// Query option struct could not be encoded
  #[error("Query encoding error: {0}")]
  QueryEncode(String),

  /// Malformed request URL
  #[error("Invalid URL: {0}")]
  Url(#[from] url::ParseError),

  /// Non-retryable HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// Retryable transport failures persisted past the retry budget
  #[error("HTTP error after {attempts} attempts: {last}")]
  RetriesExhausted { attempts: u32, last: String },

  /// Non-200 response from Polygon
  #[error("API error: {0}")]
  Api(#[from] ApiError),

  /// Response `status` field outside the accepted set for the endpoint family
  #[error("{family}: unexpected status {status:?}")]
  UnexpectedStatus { family: &'static str, status: String },

  /// Endpoint returned an empty result set
  #[error("{0}: no results")]
  NoResults(&'static str),

  /// Operation only exists in edge mode
  #[error("{0} is only available in edge mode")]
  EdgeRequired(&'static str),

  /// Operation is not served in edge mode
  #[error("{0} is not available in edge mode")]
  EdgeUnsupported(&'static str),

  /// WebSocket transport error
  #[error("WebSocket error: {0}")]
  WebSocket(String),

  /// The remote end closed the websocket
  #[error("connection closed")]
  ConnectionClosed,

  /// A data frame could not be decoded
  #[error("Frame decode error: {0}")]
  FrameDecode(#[source] serde_json::Error),

  /// Subscription keys do not belong to the connection's asset class
  #[error("Subscription mismatch: {0}")]
  SubscriptionMismatch(String),

  /// Illegal connection state transition
  #[error("Invalid connection state transition from {from} to {to}")]
  InvalidState { from: String, to: String },

  /// Caller dropped the receiving end of an output channel
  #[error("output channel closed")]
  ChannelClosed,
}

/// Result type alias for polygon-* crates
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_display() {
    let err = ApiError::new("404 Not Found", "not found").with_request_id("abc123");
    assert_eq!(err.to_string(), "404 Not Found: not found (request id: abc123)");

    let err = ApiError::new("500 Internal Server Error", "");
    assert_eq!(err.request_id, None);
    assert!(err.to_string().starts_with("500 Internal Server Error"));
  }

  #[test]
  fn test_api_error_converts() {
    let err: Error = ApiError::new("403 Forbidden", "bad key").into();
    match err {
      Error::Api(api) => assert_eq!(api.message, "bad key"),
      other => panic!("Expected Api error, got {:?}", other),
    }
  }

  #[test]
  fn test_domain_error_messages() {
    let err = Error::UnexpectedStatus { family: "sma", status: "ERROR".to_string() };
    assert_eq!(err.to_string(), "sma: unexpected status \"ERROR\"");
    assert_eq!(Error::NoResults("rsi").to_string(), "rsi: no results");
  }
}
