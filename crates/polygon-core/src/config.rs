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
//! Configuration management for the Polygon client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Edge (launchpad) deployment descriptor.
///
/// Only used to stamp two identifying headers on every outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Edge {
  id: String,
  ip_address: String,
}

impl Edge {
  pub fn new(id: impl Into<String>, ip_address: impl Into<String>) -> Self {
    Self { id: id.into(), ip_address: ip_address.into() }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn ip_address(&self) -> &str {
    &self.ip_address
  }
}

/// Main configuration struct for the Polygon client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Polygon API key, sent as the `apiKey` query parameter and as the
  /// websocket auth token
  pub api_key: String,

  /// Base URL for the REST API, without version segment
  pub base_url: String,

  /// Base URL for the realtime websocket cluster
  pub ws_url: String,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Maximum retries of a transient transport failure (`None` = unlimited)
  pub max_retries: Option<u32>,

  /// Initial backoff between retries in milliseconds
  pub retry_backoff_ms: u64,

  /// Edge mode descriptor
  pub edge: Option<Edge>,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_key = env::var("POLYGON_API_KEY")
      .map_err(|_| Error::ApiKey("POLYGON_API_KEY not set".to_string()))?;
    if api_key.trim().is_empty() {
      return Err(Error::ApiKey("POLYGON_API_KEY is empty".to_string()));
    }

    let base_url = env::var("POLYGON_BASE_URL").unwrap_or_else(|_| crate::POLYGON_BASE_URL.to_string());
    let ws_url = env::var("POLYGON_WS_URL").unwrap_or_else(|_| crate::POLYGON_WS_URL.to_string());

    let timeout_secs = env::var("POLYGON_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid POLYGON_TIMEOUT_SECS".to_string()))?;

    let max_retries = match env::var("POLYGON_MAX_RETRIES") {
      Ok(value) => Some(
        value.parse().map_err(|_| Error::Config("Invalid POLYGON_MAX_RETRIES".to_string()))?,
      ),
      Err(_) => None,
    };

    let retry_backoff_ms = env::var("POLYGON_RETRY_BACKOFF_MS")
      .unwrap_or_else(|_| "0".to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid POLYGON_RETRY_BACKOFF_MS".to_string()))?;

    let edge = match (env::var("POLYGON_EDGE_ID"), env::var("POLYGON_EDGE_IP")) {
      (Ok(id), Ok(ip)) => Some(Edge::new(id, ip)),
      (Err(_), Err(_)) => None,
      _ => {
        return Err(Error::Config(
          "POLYGON_EDGE_ID and POLYGON_EDGE_IP must be set together".to_string(),
        ))
      }
    };

    Ok(Config { api_key, base_url, ws_url, timeout_secs, max_retries, retry_backoff_ms, edge })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_key(api_key: String) -> Self {
    Config {
      api_key,
      base_url: crate::POLYGON_BASE_URL.to_string(),
      ws_url: crate::POLYGON_WS_URL.to_string(),
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      max_retries: None,
      retry_backoff_ms: 0,
      edge: None,
    }
  }

  /// Switch the config to edge mode
  pub fn with_edge(mut self, id: impl Into<String>, ip_address: impl Into<String>) -> Self {
    self.edge = Some(Edge::new(id, ip_address));
    self
  }

  /// Whether requests go through an edge deployment
  pub fn is_edge(&self) -> bool {
    self.edge.is_some()
  }
}
