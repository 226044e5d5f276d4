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

//! Connection settings for the CLI, layered as flag > environment > default

use anyhow::{bail, Result};
use clap::Args;
use polygon_core::Config;

#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
  /// Polygon API key
  #[arg(long, env = "POLYGON_API_KEY", hide_env_values = true, global = true)]
  pub api_key: Option<String>,

  /// REST base URL
  #[arg(long, env = "POLYGON_BASE_URL", default_value = polygon_core::POLYGON_BASE_URL, global = true)]
  pub base_url: String,

  /// Websocket base URL
  #[arg(long, env = "POLYGON_WS_URL", default_value = polygon_core::POLYGON_WS_URL, global = true)]
  pub ws_url: String,

  /// HTTP timeout in seconds
  #[arg(long, env = "POLYGON_TIMEOUT_SECS", default_value_t = polygon_core::DEFAULT_TIMEOUT_SECS, global = true)]
  pub timeout_secs: u64,

  /// Retry limit for dropped connections (unlimited when unset)
  #[arg(long, env = "POLYGON_MAX_RETRIES", global = true)]
  pub max_retries: Option<u32>,

  /// Initial delay between retries in milliseconds
  #[arg(long, env = "POLYGON_RETRY_BACKOFF_MS", default_value_t = 0, global = true)]
  pub retry_backoff_ms: u64,

  /// Edge identifier (edge mode)
  #[arg(long, env = "POLYGON_EDGE_ID", global = true)]
  pub edge_id: Option<String>,

  /// Edge source address (edge mode)
  #[arg(long, env = "POLYGON_EDGE_IP", global = true)]
  pub edge_ip: Option<String>,
}

impl ApiArgs {
  pub fn to_config(&self) -> Result<Config> {
    let api_key = match self.api_key.as_deref().map(str::trim) {
      Some(key) if !key.is_empty() => key.to_string(),
      _ => bail!("POLYGON_API_KEY environment variable not set (or pass --api-key)"),
    };

    let mut config = Config::default_with_key(api_key);
    config.base_url = self.base_url.clone();
    config.ws_url = self.ws_url.clone();
    config.timeout_secs = self.timeout_secs;
    config.max_retries = self.max_retries;
    config.retry_backoff_ms = self.retry_backoff_ms;

    match (&self.edge_id, &self.edge_ip) {
      (Some(id), Some(ip)) => config = config.with_edge(id.clone(), ip.clone()),
      (None, None) => {}
      _ => bail!("--edge-id and --edge-ip must be given together"),
    }

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args() -> ApiArgs {
    ApiArgs {
      api_key: Some("key".to_string()),
      base_url: "http://localhost:1234".to_string(),
      ws_url: polygon_core::POLYGON_WS_URL.to_string(),
      timeout_secs: 5,
      max_retries: Some(3),
      retry_backoff_ms: 100,
      edge_id: None,
      edge_ip: None,
    }
  }

  #[test]
  fn test_to_config() {
    let config = args().to_config().unwrap();
    assert_eq!(config.base_url, "http://localhost:1234");
    assert_eq!(config.max_retries, Some(3));
    assert!(!config.is_edge());
  }

  #[test]
  fn test_edge_pairing() {
    let mut half = args();
    half.edge_id = Some("e1".to_string());
    assert!(half.to_config().is_err());

    half.edge_ip = Some("10.0.0.1".to_string());
    assert!(half.to_config().unwrap().is_edge());
  }

  #[test]
  fn test_missing_key() {
    let mut missing = args();
    missing.api_key = Some("  ".to_string());
    assert!(missing.to_config().is_err());
  }
}
