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
//! Market status and multi-asset summary models

use polygon_core::types::{AssetClass, MarketState};
use serde::{Deserialize, Serialize};

use crate::common::{ApiResponse, Branding};

/// Current trading status of markets and exchanges
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketStatus {
  pub market: MarketState,
  #[serde(rename = "earlyHours")]
  pub early_hours: bool,
  #[serde(rename = "afterHours")]
  pub after_hours: bool,
  #[serde(rename = "serverTime")]
  pub server_time: String,
  pub exchanges: ExchangeStatus,
  pub currencies: CurrencyStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeStatus {
  pub nyse: MarketState,
  pub nasdaq: MarketState,
  pub otc: MarketState,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyStatus {
  pub fx: MarketState,
  pub crypto: MarketState,
}

impl MarketStatus {
  /// Session state for one asset class.
  ///
  /// For stocks an explicit open, closed or overnight status wins; otherwise
  /// the early/after hours flags decide, and `Unknown` is returned when
  /// neither is set.
  pub fn state_for(&self, asset: AssetClass) -> MarketState {
    match asset {
      AssetClass::Stocks => match self.market {
        MarketState::Open | MarketState::Closed | MarketState::Overnight => self.market,
        _ if self.early_hours => MarketState::EarlyHours,
        _ if self.after_hours => MarketState::AfterHours,
        _ => MarketState::Unknown,
      },
      AssetClass::Crypto => self.currencies.crypto,
      AssetClass::Forex => self.currencies.fx,
    }
  }
}

/// Asset kinds accepted by the summaries endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryAssetKind {
  Stock,
  Option,
  Forex,
  Crypto,
}

/// A ticker to summarise, in the caller's notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryAsset {
  pub ticker: String,
  pub kind: SummaryAssetKind,
}

impl SummaryAsset {
  pub fn new(ticker: impl Into<String>, kind: SummaryAssetKind) -> Self {
    Self { ticker: ticker.into(), kind }
  }

  /// Prefixed ticker as the summaries endpoint expects it
  pub fn resolved_ticker(&self) -> String {
    match self.kind {
      SummaryAssetKind::Stock => self.ticker.clone(),
      SummaryAssetKind::Option => format!("O:{}", self.ticker.to_uppercase()),
      SummaryAssetKind::Forex => format!("C:{}", self.ticker.replace('/', "").to_uppercase()),
      SummaryAssetKind::Crypto => format!("X:{}USD", self.ticker.to_uppercase()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
  pub request_id: Option<String>,
  pub results: Vec<SummaryResult>,
  pub status: String,
}

impl ApiResponse for Summary {
  fn status(&self) -> &str {
    &self.status
  }

  fn request_id(&self) -> Option<&str> {
    self.request_id.as_deref()
  }

  fn result_count(&self) -> usize {
    self.results.len()
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryResult {
  pub branding: Branding,
  pub market_status: MarketState,
  pub name: String,
  pub price: f64,
  pub session: SummarySession,
  pub options: SummaryOptions,
  pub ticker: String,
  #[serde(rename = "type")]
  pub asset_type: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySession {
  pub change: f64,
  pub change_percent: f64,
  pub close: f64,
  pub early_trading_change: f64,
  pub early_trading_change_percent: f64,
  pub high: f64,
  pub late_trading_change: f64,
  pub late_trading_change_percent: f64,
  pub low: f64,
  pub open: f64,
  pub previous_close: f64,
  pub volume: f64,
}

/// Contract details, populated for option tickers only
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
  pub contract_type: String,
  pub exercise_style: String,
  pub expiration_date: String,
  pub shares_per_contract: u32,
  pub strike_price: f64,
  pub underlying_ticker: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use polygon_core::test_utils::assert_price_eq;

  fn sample_market_json(market: &str, early: bool, after: bool) -> String {
    format!(
      r#"{{
        "market": "{market}",
        "earlyHours": {early},
        "afterHours": {after},
        "serverTime": "2020-11-10T17:37:37-05:00",
        "exchanges": {{"nyse": "extended-hours", "nasdaq": "extended-hours", "otc": "closed"}},
        "currencies": {{"fx": "open", "crypto": "open"}}
      }}"#
    )
  }

  #[test]
  fn test_market_status_deserialization() {
    let status: MarketStatus = serde_json::from_str(&sample_market_json("extended-hours", false, true)).unwrap();

    assert_eq!(status.market, MarketState::ExtendedHours);
    assert_eq!(status.exchanges.nyse, MarketState::ExtendedHours);
    assert_eq!(status.exchanges.otc, MarketState::Closed);
    assert_eq!(status.state_for(AssetClass::Stocks), MarketState::AfterHours);
    assert_eq!(status.state_for(AssetClass::Crypto), MarketState::Open);
    assert_eq!(status.state_for(AssetClass::Forex), MarketState::Open);
  }

  #[test]
  fn test_stock_state_prefers_explicit_status() {
    let status: MarketStatus = serde_json::from_str(&sample_market_json("closed", true, true)).unwrap();
    assert_eq!(status.state_for(AssetClass::Stocks), MarketState::Closed);

    let status: MarketStatus = serde_json::from_str(&sample_market_json("extended-hours", true, false)).unwrap();
    assert_eq!(status.state_for(AssetClass::Stocks), MarketState::EarlyHours);

    let status: MarketStatus = serde_json::from_str(&sample_market_json("extended-hours", false, false)).unwrap();
    assert_eq!(status.state_for(AssetClass::Stocks), MarketState::Unknown);
  }

  #[test]
  fn test_summary_ticker_resolution() {
    assert_eq!(SummaryAsset::new("AAPL", SummaryAssetKind::Stock).resolved_ticker(), "AAPL");
    assert_eq!(
      SummaryAsset::new("aapl211119c00085000", SummaryAssetKind::Option).resolved_ticker(),
      "O:AAPL211119C00085000"
    );
    assert_eq!(SummaryAsset::new("usd/jpy", SummaryAssetKind::Forex).resolved_ticker(), "C:USDJPY");
    assert_eq!(SummaryAsset::new("btc", SummaryAssetKind::Crypto).resolved_ticker(), "X:BTCUSD");
  }

  #[test]
  fn test_summary_deserialization() {
    let json = r#"{
      "request_id": "abc123",
      "results": [{
        "branding": {"icon_url": "https://example.com/icon.png", "logo_url": "https://example.com/logo.svg"},
        "market_status": "closed",
        "name": "Apple Inc.",
        "price": 189.25,
        "session": {"change": -1.45, "change_percent": -0.76, "close": 189.25, "high": 191.0, "low": 188.5, "open": 190.5, "previous_close": 190.7, "volume": 45123456},
        "ticker": "AAPL",
        "type": "stocks"
      }],
      "status": "OK"
    }"#;

    let summary: Summary = serde_json::from_str(json).unwrap();
    assert_eq!(summary.result_count(), 1);
    let result = &summary.results[0];
    assert_eq!(result.market_status, MarketState::Closed);
    assert_eq!(result.asset_type, "stocks");
    assert_price_eq(result.session.previous_close, 190.7);
    assert!(result.options.underlying_ticker.is_empty());
  }
}
