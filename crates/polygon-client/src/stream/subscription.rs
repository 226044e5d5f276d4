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
//! Subscription keys and channel specs

use polygon_core::types::AssetClass;
use polygon_core::{Error, Result};
use polygon_models::stream::EventType;
use std::fmt;

/// One `<event>.<symbol>` channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionKey {
  event: EventType,
  symbol: String,
}

impl SubscriptionKey {
  pub fn new(event: EventType, symbol: impl Into<String>) -> Self {
    Self { event, symbol: symbol.into() }
  }

  pub fn event(&self) -> EventType {
    self.event
  }

  pub fn symbol(&self) -> &str {
    &self.symbol
  }
}

impl fmt::Display for SubscriptionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.event.as_str(), self.symbol)
  }
}

/// The channels of one connection. Every key belongs to the same asset class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
  asset: AssetClass,
  keys: Vec<SubscriptionKey>,
}

impl Subscription {
  /// Build a subscription, rejecting keys of another asset class and empty key sets
  pub fn new(asset: AssetClass, keys: Vec<SubscriptionKey>) -> Result<Self> {
    if keys.is_empty() {
      return Err(Error::SubscriptionMismatch(format!("no channels to subscribe on {}", asset)));
    }
    if let Some(key) = keys.iter().find(|k| k.event.asset_class() != asset) {
      return Err(Error::SubscriptionMismatch(format!("{} is not a {} channel", key, asset)));
    }
    Ok(Self { asset, keys })
  }

  /// One event type over many symbols
  ///
  /// # Examples
  ///
  /// ```ignore
  /// let sub = Subscription::for_symbols(AssetClass::Stocks, EventType::StockMinute, &["AAPL", "NVDA"])?;
  /// assert_eq!(sub.channel_spec(), "AM.AAPL,AM.NVDA");
  /// ```
  pub fn for_symbols<S: AsRef<str>>(asset: AssetClass, event: EventType, symbols: &[S]) -> Result<Self> {
    let keys = symbols.iter().map(|s| SubscriptionKey::new(event, s.as_ref())).collect();
    Self::new(asset, keys)
  }

  pub fn asset(&self) -> AssetClass {
    self.asset
  }

  pub fn keys(&self) -> &[SubscriptionKey] {
    &self.keys
  }

  /// Comma-joined channel list sent in the subscribe frame
  pub fn channel_spec(&self) -> String {
    self.keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
  }

  /// Websocket URL for this subscription's asset class
  pub fn url(&self, ws_base: &str) -> String {
    format!("{}/{}", ws_base.trim_end_matches('/'), self.asset.ws_path())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_channel_spec() {
    let sub = Subscription::for_symbols(AssetClass::Stocks, EventType::StockMinute, &["AAPL", "NVDA"]).unwrap();
    assert_eq!(sub.channel_spec(), "AM.AAPL,AM.NVDA");

    let single = Subscription::for_symbols(AssetClass::Crypto, EventType::CryptoSecond, &["BTC-USD"]).unwrap();
    assert_eq!(single.channel_spec(), "XAS.BTC-USD");
  }

  #[test]
  fn test_mismatched_asset_rejected() {
    let err = Subscription::for_symbols(AssetClass::Forex, EventType::StockMinute, &["AAPL"]).unwrap_err();
    assert!(matches!(err, Error::SubscriptionMismatch(_)));

    let empty: [&str; 0] = [];
    let err = Subscription::for_symbols(AssetClass::Stocks, EventType::StockSecond, &empty).unwrap_err();
    assert!(matches!(err, Error::SubscriptionMismatch(_)));
  }

  #[test]
  fn test_url_per_asset_class() {
    let sub = Subscription::for_symbols(AssetClass::Forex, EventType::ForexMinute, &["EUR/USD"]).unwrap();
    assert_eq!(sub.url("wss://socket.polygon.io/"), "wss://socket.polygon.io/forex");
  }
}
