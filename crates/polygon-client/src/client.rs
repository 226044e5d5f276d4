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

use crate::endpoints::{
  aggregates::AggregatesEndpoints, fundamentals::FundamentalsEndpoints, indicators::IndicatorEndpoints,
  market::MarketEndpoints, reference::ReferenceEndpoints,
};
use crate::retry::RetryPolicy;
use crate::stream::StreamClient;
use crate::transport::{HttpSend, Transport};
use polygon_core::{Config, Result};
use std::sync::Arc;

/// Main Polygon API client
///
/// Provides access to the REST endpoint groups and to realtime streams. All
/// endpoint groups share one [`Transport`], so they share its retry policy and
/// edge headers.
///
/// # Examples
///
/// ```ignore
/// use polygon_client::PolygonClient;
/// use polygon_core::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PolygonClient::new(Config::from_env()?)?;
///
///     let status = client.market().status().await?;
///     println!("Market is {:?}", status.market);
///
///     let rsi = client.indicators().latest_rsi("AAPL").await?;
///     println!("AAPL RSI(2): {:.2}", rsi);
///
///     Ok(())
/// }
/// ```
pub struct PolygonClient {
  transport: Arc<Transport>,
  config: Config,
}

impl PolygonClient {
  /// Create a new Polygon API client
  ///
  /// # Arguments
  ///
  /// * `config` - Configuration containing the API key, base URLs and retry settings
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    let transport = Arc::new(Transport::new(&config)?);
    Ok(Self { transport, config })
  }

  /// Create a client with an explicit retry policy
  pub fn with_retry_policy(config: Config, policy: RetryPolicy) -> Result<Self> {
    let transport = Arc::new(Transport::new(&config)?.with_retry_policy(policy));
    Ok(Self { transport, config })
  }

  /// Create a client sending requests through a custom [`HttpSend`]
  pub fn with_sender(config: Config, sender: Arc<dyn HttpSend>) -> Result<Self> {
    let transport = Arc::new(Transport::with_sender(&config, sender)?);
    Ok(Self { transport, config })
  }

  /// Get access to aggregate bar endpoints
  ///
  /// # Examples
  ///
  /// ```ignore
  /// let bars = client.aggregates().range("AAPL", 1, Timespan::Day, from, to, None).await?;
  /// let prev = client.aggregates().previous_close("AAPL", Some(true)).await?;
  /// ```
  pub fn aggregates(&self) -> AggregatesEndpoints {
    AggregatesEndpoints::new(self.transport.clone())
  }

  /// Get access to technical indicator endpoints
  pub fn indicators(&self) -> IndicatorEndpoints {
    IndicatorEndpoints::new(self.transport.clone())
  }

  /// Get access to reference data endpoints
  ///
  /// # Examples
  ///
  /// ```ignore
  /// let dividend = client.reference().latest_dividend("AAPL", None).await?;
  /// let details = client.reference().ticker_details("AAPL", None).await?;
  /// ```
  pub fn reference(&self) -> ReferenceEndpoints {
    ReferenceEndpoints::new(self.transport.clone())
  }

  /// Get access to fundamentals endpoints
  pub fn fundamentals(&self) -> FundamentalsEndpoints {
    FundamentalsEndpoints::new(self.transport.clone())
  }

  /// Get access to market status and summary endpoints
  pub fn market(&self) -> MarketEndpoints {
    MarketEndpoints::new(self.transport.clone())
  }

  /// Get a realtime stream client using this client's websocket URL and key
  pub fn stream(&self) -> StreamClient {
    StreamClient::new(&self.config)
  }

  /// The shared transport
  pub fn transport(&self) -> &Arc<Transport> {
    &self.transport
  }

  /// The configuration the client was built from
  pub fn config(&self) -> &Config {
    &self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_client_creation() {
    let config = Config::default_with_key("test_key".to_string()).with_edge("e1", "10.0.0.1");
    let client = PolygonClient::new(config).unwrap();

    assert!(client.transport().is_edge());
    assert_eq!(client.config().api_key, "test_key");
    assert_eq!(client.stream().ws_url(), polygon_core::POLYGON_WS_URL);
  }

  #[test]
  fn test_custom_retry_policy() {
    let config = Config::default_with_key("test_key".to_string());
    let client = PolygonClient::with_retry_policy(config, RetryPolicy::no_retry()).unwrap();

    assert_eq!(client.transport().policy().max_retries, Some(0));
  }
}
