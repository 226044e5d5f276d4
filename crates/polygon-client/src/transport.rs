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
//! HTTP transport layer for Polygon REST requests
//!
//! [`Transport::execute`] is the single path every REST call takes: build the
//! URL from an [`Endpoint`], send one GET through the [`HttpSend`] seam, retry
//! transport failures the [`RetryPolicy`] classifies as transient, and turn
//! any non-200 status into [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use polygon_core::{ApiError, Config, Error, Result, EDGE_ID_HEADER, EDGE_IP_HEADER};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::decode::{decode, decode_f64, enrich_api_error};
use crate::request::Endpoint;
use crate::retry::{Backoff, RetryPolicy, TransportError};

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: StatusCode,
  pub body: Bytes,
}

/// One GET round trip. Implementations must not retry on their own.
#[async_trait]
pub trait HttpSend: Send + Sync {
  async fn get(&self, url: &Url, headers: &HeaderMap) -> std::result::Result<HttpResponse, TransportError>;
}

/// Production [`HttpSend`] backed by `reqwest`
pub struct ReqwestSender {
  client: Client,
}

impl ReqwestSender {
  pub fn new(timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent("polygon-client/0.1.0")
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;
    Ok(Self { client })
  }
}

#[async_trait]
impl HttpSend for ReqwestSender {
  async fn get(&self, url: &Url, headers: &HeaderMap) -> std::result::Result<HttpResponse, TransportError> {
    let response = self.client.get(url.clone()).headers(headers.clone()).send().await?;
    let status = response.status();

    let body = match response.bytes().await {
      Ok(body) => body,
      // an unreadable error body still yields an ApiError, just with no message
      Err(e) if status != StatusCode::OK => {
        debug!("Could not read body of {} response: {}", status, e);
        Bytes::new()
      }
      Err(e) => return Err(e.into()),
    };

    Ok(HttpResponse { status, body })
  }
}

/// HTTP transport layer for making requests to the Polygon API
pub struct Transport {
  sender: Arc<dyn HttpSend>,
  base_url: String,
  api_key: String,
  headers: HeaderMap,
  edge: bool,
  timeout: Duration,
  policy: RetryPolicy,
}

impl Transport {
  /// Create a transport using `reqwest` with the configured timeout and retry settings
  pub fn new(config: &Config) -> Result<Self> {
    let sender = ReqwestSender::new(Duration::from_secs(config.timeout_secs))?;
    Self::with_sender(config, Arc::new(sender))
  }

  /// Create a transport over a custom [`HttpSend`]
  pub fn with_sender(config: &Config, sender: Arc<dyn HttpSend>) -> Result<Self> {
    let mut headers = HeaderMap::new();
    if let Some(edge) = &config.edge {
      headers.insert(header_name(EDGE_ID_HEADER)?, header_value(edge.id())?);
      headers.insert(header_name(EDGE_IP_HEADER)?, header_value(edge.ip_address())?);
    }

    let backoff = if config.retry_backoff_ms == 0 {
      Backoff::none()
    } else {
      Backoff::exponential(Duration::from_millis(config.retry_backoff_ms), MAX_BACKOFF)
    };
    let policy = RetryPolicy::default().with_max_retries(config.max_retries).with_backoff(backoff);

    Ok(Self {
      sender,
      base_url: config.base_url.clone(),
      api_key: config.api_key.clone(),
      headers,
      edge: config.is_edge(),
      timeout: Duration::from_secs(config.timeout_secs),
      policy,
    })
  }

  /// Replace the retry policy
  pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Fetch the raw body of a 200 response
  #[instrument(skip_all, fields(endpoint = %endpoint))]
  pub async fn execute(&self, endpoint: &Endpoint) -> Result<Bytes> {
    let url = endpoint.url(&self.base_url, &self.api_key)?;
    self.execute_url(&url).await
  }

  /// Fetch and decode a JSON response
  pub async fn get_json<T>(&self, endpoint: &Endpoint) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let body = self.execute(endpoint).await?;
    decode(&body)
  }

  /// Fetch a response whose body is a bare number
  pub async fn get_f64(&self, endpoint: &Endpoint) -> Result<f64> {
    let body = self.execute(endpoint).await?;
    decode_f64(&body)
  }

  /// Follow an absolute URL returned by the API, such as a `next_url` cursor.
  ///
  /// The credential is appended when the URL does not already carry one.
  #[instrument(skip_all)]
  pub async fn fetch_url_json<T>(&self, url: &str) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let mut url = Url::parse(url)?;
    if !url.query_pairs().any(|(k, _)| k == "apiKey") {
      url.query_pairs_mut().append_pair("apiKey", &self.api_key);
    }
    let body = self.execute_url(&url).await?;
    decode(&body)
  }

  async fn execute_url(&self, url: &Url) -> Result<Bytes> {
    debug!("Making request to: {}", redact(url));

    let mut retries = 0u32;
    loop {
      match self.sender.get(url, &self.headers).await {
        Ok(response) if response.status == StatusCode::OK => {
          info!("Request succeeded ({} bytes)", response.body.len());
          return Ok(response.body);
        }
        Ok(response) => {
          error!("Request failed with status: {}", response.status);
          let message = String::from_utf8_lossy(&response.body).into_owned();
          let api_error = ApiError::new(response.status.to_string(), message);
          return Err(Error::Api(enrich_api_error(api_error, &response.body)));
        }
        Err(transport_error) => {
          if !self.policy.is_retryable(&transport_error) {
            error!("Request failed: {}", transport_error);
            return Err(Error::Http(transport_error.to_string()));
          }
          if !self.policy.has_budget(retries) {
            error!("Giving up after {} attempts: {}", retries + 1, transport_error);
            return Err(Error::RetriesExhausted { attempts: retries + 1, last: transport_error.to_string() });
          }

          retries += 1;
          let delay = self.policy.backoff.delay(retries);
          warn!("Retrying request in {}ms (attempt {}): {}", delay.as_millis(), retries + 1, transport_error);
          if !delay.is_zero() {
            tokio::time::sleep(delay).await;
          }
        }
      }
    }
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }

  pub fn policy(&self) -> &RetryPolicy {
    &self.policy
  }

  /// Whether requests carry edge headers
  pub fn is_edge(&self) -> bool {
    self.edge
  }
}

impl std::fmt::Debug for Transport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Transport")
      .field("base_url", &self.base_url)
      .field("edge", &self.edge)
      .field("policy", &self.policy)
      .finish_non_exhaustive()
  }
}

fn header_name(name: &str) -> Result<HeaderName> {
  HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::Config(format!("invalid header name {}: {}", name, e)))
}

fn header_value(value: &str) -> Result<HeaderValue> {
  HeaderValue::from_str(value).map_err(|e| Error::Config(format!("invalid edge header value {:?}: {}", value, e)))
}

fn redact(url: &Url) -> String {
  let mut shown = url.clone();
  let pairs: Vec<(String, String)> = url
    .query_pairs()
    .map(|(k, v)| if k == "apiKey" { (k.into_owned(), "***".to_string()) } else { (k.into_owned(), v.into_owned()) })
    .collect();
  shown.query_pairs_mut().clear().extend_pairs(pairs);
  shown.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use polygon_core::ApiVersion;
  use std::collections::VecDeque;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;

  use crate::retry::{ConnectionClosedClassifier, RetryClassifier, TransportErrorKind};

  type Scripted = std::result::Result<HttpResponse, TransportError>;

  /// Replays a fixed sequence of outcomes and records what it was asked
  struct ScriptedSender {
    outcomes: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(Url, HeaderMap)>>,
  }

  impl ScriptedSender {
    fn new(outcomes: Vec<Scripted>) -> Arc<Self> {
      Arc::new(Self { outcomes: Mutex::new(outcomes.into()), calls: AtomicUsize::new(0), seen: Mutex::new(Vec::new()) })
    }

    fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }
  }

  #[async_trait]
  impl HttpSend for ScriptedSender {
    async fn get(&self, url: &Url, headers: &HeaderMap) -> std::result::Result<HttpResponse, TransportError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      self.seen.lock().unwrap().push((url.clone(), headers.clone()));
      self
        .outcomes
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(TransportError::new(TransportErrorKind::Other, "no more scripted responses")))
    }
  }

  /// Counts classifier consultations
  struct CountingClassifier(Arc<AtomicUsize>);

  impl RetryClassifier for CountingClassifier {
    fn is_retryable(&self, error: &TransportError) -> bool {
      self.0.fetch_add(1, Ordering::SeqCst);
      ConnectionClosedClassifier.is_retryable(error)
    }
  }

  fn ok(body: &'static str) -> Scripted {
    Ok(HttpResponse { status: StatusCode::OK, body: Bytes::from_static(body.as_bytes()) })
  }

  fn goaway() -> Scripted {
    Err(TransportError::new(
      TransportErrorKind::Request,
      "http2: server sent GOAWAY and closed the connection; LastStreamID=1",
    ))
  }

  fn config() -> Config {
    Config::default_with_key("test-api-key".to_string())
  }

  fn endpoint() -> Endpoint {
    Endpoint::new(ApiVersion::V1, "test-endpoint")
  }

  #[tokio::test]
  async fn test_retry_then_success() {
    let sender = ScriptedSender::new(vec![goaway(), goaway(), ok(r#"{"status":"OK"}"#)]);
    let consulted = Arc::new(AtomicUsize::new(0));
    let transport = Transport::with_sender(&config(), sender.clone())
      .unwrap()
      .with_retry_policy(RetryPolicy::new(CountingClassifier(consulted.clone())));

    let body = transport.execute(&endpoint()).await.unwrap();

    assert_eq!(&body[..], br#"{"status":"OK"}"#);
    assert_eq!(sender.calls(), 3);
    assert_eq!(consulted.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_success_without_retry() {
    let sender = ScriptedSender::new(vec![ok(r#"{"status":"OK"}"#)]);
    let consulted = Arc::new(AtomicUsize::new(0));
    let transport = Transport::with_sender(&config(), sender.clone())
      .unwrap()
      .with_retry_policy(RetryPolicy::new(CountingClassifier(consulted.clone())));

    transport.execute(&endpoint()).await.unwrap();

    assert_eq!(sender.calls(), 1);
    assert_eq!(consulted.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_non_retryable_error_fails_immediately() {
    let sender = ScriptedSender::new(vec![
      Err(TransportError::new(TransportErrorKind::Connect, "dns error: no such host")),
      ok("{}"),
    ]);
    let transport = Transport::with_sender(&config(), sender.clone()).unwrap();

    let err = transport.execute(&endpoint()).await.unwrap_err();

    assert!(matches!(err, Error::Http(ref msg) if msg.contains("dns error")));
    assert_eq!(sender.calls(), 1);
  }

  #[tokio::test]
  async fn test_bounded_retries_exhaust() {
    let sender = ScriptedSender::new(vec![goaway(), goaway(), goaway(), ok("{}")]);
    let transport = Transport::with_sender(&config(), sender.clone())
      .unwrap()
      .with_retry_policy(RetryPolicy::default().with_max_retries(Some(2)));

    let err = transport.execute(&endpoint()).await.unwrap_err();

    assert!(matches!(err, Error::RetriesExhausted { attempts: 3, .. }));
    assert_eq!(sender.calls(), 3);
  }

  #[tokio::test]
  async fn test_non_200_is_api_error_and_not_retried() {
    let sender = ScriptedSender::new(vec![
      Ok(HttpResponse { status: StatusCode::NOT_FOUND, body: Bytes::from_static(b"not found") }),
      ok("{}"),
    ]);
    let transport = Transport::with_sender(&config(), sender.clone()).unwrap();

    let err = transport.execute(&endpoint()).await.unwrap_err();

    match err {
      Error::Api(api) => {
        assert_eq!(api.status, "404 Not Found");
        assert_eq!(api.message, "not found");
        assert_eq!(api.request_id, None);
      }
      other => panic!("Expected Api error, got {:?}", other),
    }
    assert_eq!(sender.calls(), 1);
  }

  #[tokio::test]
  async fn test_edge_headers_and_api_key() {
    let sender = ScriptedSender::new(vec![ok("{}")]);
    let config = config().with_edge("edge-1", "10.0.0.7");
    let transport = Transport::with_sender(&config, sender.clone()).unwrap();
    assert!(transport.is_edge());

    transport.execute(&endpoint()).await.unwrap();

    let seen = sender.seen.lock().unwrap();
    let (url, headers) = &seen[0];
    assert_eq!(url.as_str(), "https://api.polygon.io/v1/test-endpoint?apiKey=test-api-key");
    assert_eq!(headers.get(EDGE_ID_HEADER).unwrap(), "edge-1");
    assert_eq!(headers.get(EDGE_IP_HEADER).unwrap(), "10.0.0.7");
  }

  #[tokio::test]
  async fn test_fetch_url_appends_key_once() {
    let sender = ScriptedSender::new(vec![ok(r#"{"status":"OK"}"#), ok(r#"{"status":"OK"}"#)]);
    let transport = Transport::with_sender(&config(), sender.clone()).unwrap();

    let _: serde_json::Value = transport.fetch_url_json("https://api.polygon.io/v3/reference/dividends?cursor=abc").await.unwrap();
    let _: serde_json::Value =
      transport.fetch_url_json("https://api.polygon.io/v3/reference/dividends?cursor=abc&apiKey=other").await.unwrap();

    let seen = sender.seen.lock().unwrap();
    assert_eq!(seen[0].0.as_str(), "https://api.polygon.io/v3/reference/dividends?cursor=abc&apiKey=test-api-key");
    assert_eq!(seen[1].0.query_pairs().filter(|(k, _)| k == "apiKey").count(), 1);
  }

  #[test]
  fn test_redact_hides_key() {
    let url = Url::parse("https://api.polygon.io/v1/x?a=1&apiKey=secret").unwrap();
    let shown = redact(&url);
    assert!(!shown.contains("secret"));
    assert!(shown.contains("a=1"));
  }
}
