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
pub mod aggregates;
pub mod fundamentals;
pub mod indicators;
pub mod market;
pub mod reference;

use crate::transport::Transport;
use chrono::NaiveDate;
use polygon_core::{Error, Result};
use std::sync::Arc;

/// Base trait for endpoint implementations
///
/// Provides common functionality needed by all endpoint modules
pub trait EndpointBase {
  /// Get a reference to the transport layer
  fn transport(&self) -> &Arc<Transport>;

  /// Fail unless the client is configured for edge mode
  fn require_edge(&self, operation: &'static str) -> Result<()> {
    if self.transport().is_edge() {
      Ok(())
    } else {
      Err(Error::EdgeRequired(operation))
    }
  }

  /// Fail when the client is configured for edge mode
  fn reject_edge(&self, operation: &'static str) -> Result<()> {
    if self.transport().is_edge() {
      Err(Error::EdgeUnsupported(operation))
    } else {
      Ok(())
    }
  }
}

/// Macro to implement the EndpointBase trait for endpoint structs
macro_rules! impl_endpoint_base {
  ($struct_name:ident) => {
    impl EndpointBase for $struct_name {
      fn transport(&self) -> &Arc<Transport> {
        &self.transport
      }
    }
  };
}

pub(crate) use impl_endpoint_base;

/// Upper-case and trim a ticker the way the indicator and financials routes expect
pub(crate) fn normalize_ticker(ticker: &str) -> String {
  ticker.trim().to_uppercase()
}

/// `YYYY-MM-DD`, the date layout used in path segments
pub(crate) fn format_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

/// Transport pointed at a mock server, no retries
#[cfg(test)]
pub(crate) fn test_transport(base_url: &str, edge: bool) -> Arc<Transport> {
  let mut config = polygon_core::Config::default_with_key("test_key".to_string());
  config.base_url = base_url.to_string();
  if edge {
    config = config.with_edge("edge-id", "10.1.2.3");
  }
  let transport =
    Transport::new(&config).unwrap().with_retry_policy(crate::retry::RetryPolicy::no_retry());
  Arc::new(transport)
}

#[cfg(test)]
mod tests {
  use super::*;
  use polygon_core::Config;

  struct Probe {
    transport: Arc<Transport>,
  }

  impl_endpoint_base!(Probe);

  fn probe(config: Config) -> Probe {
    Probe { transport: Arc::new(Transport::new(&config).unwrap()) }
  }

  #[test]
  fn test_edge_gates() {
    let plain = probe(Config::default_with_key("k".to_string()));
    assert!(matches!(plain.require_edge("summaries"), Err(Error::EdgeRequired("summaries"))));
    assert!(plain.reject_edge("rsi").is_ok());

    let edge = probe(Config::default_with_key("k".to_string()).with_edge("id", "127.0.0.1"));
    assert!(edge.require_edge("summaries").is_ok());
    assert!(matches!(edge.reject_edge("rsi"), Err(Error::EdgeUnsupported("rsi"))));
  }

  #[test]
  fn test_helpers() {
    assert_eq!(normalize_ticker("  aapl "), "AAPL");
    assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()), "2024-03-07");
  }
}
