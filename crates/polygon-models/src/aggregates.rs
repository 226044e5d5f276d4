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
//! Aggregate bar models: custom ranges, previous close and daily open/close

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{millis_to_datetime, ApiResponse};

/// Aggregate bars for a ticker over a date range
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Aggregation {
  pub ticker: String,
  #[serde(rename = "queryCount")]
  pub query_count: u64,
  #[serde(rename = "resultsCount")]
  pub results_count: u64,
  pub adjusted: bool,
  pub results: Vec<AggregationResult>,
  pub status: String,
  pub request_id: Option<String>,
  pub count: u64,
}

impl Aggregation {
  /// `OK` or `DELAYED` with at least one bar counted
  pub fn is_valid(&self) -> bool {
    (self.status == "OK" || self.status == "DELAYED") && self.count > 0
  }

  /// Sort bars oldest first
  pub fn sort_by_time(&mut self) {
    self.results.sort_by_key(|bar| bar.timestamp);
  }
}

impl ApiResponse for Aggregation {
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

/// One OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationResult {
  #[serde(rename = "o")]
  pub open: f64,
  #[serde(rename = "c")]
  pub close: f64,
  #[serde(rename = "h")]
  pub high: f64,
  #[serde(rename = "l")]
  pub low: f64,
  #[serde(rename = "n")]
  pub transactions: u64,
  #[serde(rename = "v")]
  pub volume: f64,
  #[serde(rename = "vw")]
  pub vwap: f64,
  /// Start of the window, Unix milliseconds
  #[serde(rename = "t")]
  pub timestamp: i64,
}

impl AggregationResult {
  pub fn time(&self) -> Option<DateTime<Utc>> {
    millis_to_datetime(self.timestamp)
  }
}

/// Previous trading day's bar
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrevClose {
  pub ticker: String,
  #[serde(rename = "queryCount")]
  pub query_count: u64,
  #[serde(rename = "resultsCount")]
  pub results_count: u64,
  pub adjusted: bool,
  pub results: Vec<PrevCloseResult>,
  pub status: String,
  pub request_id: Option<String>,
  pub count: u64,
}

impl PrevClose {
  pub fn is_valid(&self) -> bool {
    (self.status == "OK" || self.status == "DELAYED") && self.count > 0
  }
}

impl ApiResponse for PrevClose {
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
pub struct PrevCloseResult {
  #[serde(rename = "T")]
  pub ticker: String,
  #[serde(rename = "o")]
  pub open: f64,
  #[serde(rename = "c")]
  pub close: f64,
  #[serde(rename = "h")]
  pub high: f64,
  #[serde(rename = "l")]
  pub low: f64,
  #[serde(rename = "n")]
  pub transactions: u64,
  #[serde(rename = "v")]
  pub volume: f64,
  #[serde(rename = "vw")]
  pub vwap: f64,
  #[serde(rename = "t")]
  pub timestamp: i64,
}

impl PrevCloseResult {
  pub fn time(&self) -> Option<DateTime<Utc>> {
    millis_to_datetime(self.timestamp)
  }
}

/// Open, close and extended-hours prices of a stock on one date
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenClose {
  pub status: String,
  /// Requested date, `YYYY-MM-DD`
  pub from: String,
  pub symbol: String,
  pub open: f64,
  pub close: f64,
  pub high: f64,
  pub low: f64,
  pub volume: f64,
  #[serde(rename = "afterHours")]
  pub after_hours: f64,
  #[serde(rename = "preMarket")]
  pub pre_market: f64,
}

impl OpenClose {
  pub fn is_valid(&self) -> bool {
    self.status == "OK" || self.status == "DELAYED"
  }
}

impl ApiResponse for OpenClose {
  fn status(&self) -> &str {
    &self.status
  }

  fn result_count(&self) -> usize {
    usize::from(!self.symbol.is_empty())
  }
}

/// Open and close of a crypto pair on one date, with the trades that set them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoOpenClose {
  pub symbol: String,
  #[serde(rename = "isUTC")]
  pub is_utc: bool,
  pub day: String,
  pub open: f64,
  pub close: f64,
  #[serde(rename = "openTrades")]
  pub open_trades: Vec<CryptoTrade>,
  #[serde(rename = "closingTrades")]
  pub closing_trades: Vec<CryptoTrade>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoTrade {
  #[serde(rename = "p")]
  pub price: f64,
  #[serde(rename = "s")]
  pub size: f64,
  #[serde(rename = "x")]
  pub exchange: i64,
  #[serde(rename = "c")]
  pub conditions: Vec<i64>,
  #[serde(rename = "i")]
  pub id: String,
  #[serde(rename = "t")]
  pub timestamp: i64,
}

#[cfg(test)]
mod tests {
  use super::*;
  use polygon_core::test_utils::assert_price_eq;

  fn sample_aggregation_json() -> &'static str {
    r#"{
      "ticker": "AAPL",
      "queryCount": 2,
      "resultsCount": 2,
      "adjusted": true,
      "results": [
        {"v": 70790813, "vw": 131.6292, "o": 132.43, "c": 131.01, "h": 132.63, "l": 130.23, "t": 1610168400000, "n": 500529},
        {"v": 68418392, "vw": 129.5934, "o": 128.5, "c": 130.92, "h": 131.45, "l": 128.49, "t": 1610082000000, "n": 487000}
      ],
      "status": "OK",
      "request_id": "6a7e466379af0a71039d60cc78e72282",
      "count": 2
    }"#
  }

  #[test]
  fn test_aggregation_deserialization() {
    let agg: Aggregation = serde_json::from_str(sample_aggregation_json()).unwrap();

    assert_eq!(agg.ticker, "AAPL");
    assert_eq!(agg.query_count, 2);
    assert_eq!(agg.results.len(), 2);
    assert!(agg.is_valid());
    assert_eq!(agg.request_id(), Some("6a7e466379af0a71039d60cc78e72282"));
    assert_price_eq(agg.results[0].close, 131.01);
    assert_eq!(agg.results[0].transactions, 500529);
  }

  #[test]
  fn test_aggregation_sort_by_time() {
    let mut agg: Aggregation = serde_json::from_str(sample_aggregation_json()).unwrap();
    agg.sort_by_time();

    assert_eq!(agg.results[0].timestamp, 1610082000000);
    assert_eq!(agg.results[0].time().unwrap().to_rfc3339(), "2021-01-08T05:00:00+00:00");
  }

  #[test]
  fn test_aggregation_validity() {
    let delayed = Aggregation { status: "DELAYED".to_string(), count: 1, ..Default::default() };
    assert!(delayed.is_valid());

    let empty = Aggregation { status: "OK".to_string(), count: 0, ..Default::default() };
    assert!(!empty.is_valid());

    let error = Aggregation { status: "ERROR".to_string(), count: 3, ..Default::default() };
    assert!(!error.is_valid());
  }

  #[test]
  fn test_prev_close_deserialization() {
    let json = r#"{
      "ticker": "AAPL",
      "queryCount": 1,
      "resultsCount": 1,
      "adjusted": true,
      "results": [{"T": "AAPL", "v": 131704427, "vw": 116.3058, "o": 115.55, "c": 115.97, "h": 117.59, "l": 114.13, "t": 1605042000000}],
      "status": "OK",
      "request_id": "6a7e466379af0a71039d60cc78e72282",
      "count": 1
    }"#;

    let prev: PrevClose = serde_json::from_str(json).unwrap();
    assert!(prev.is_valid());
    assert_eq!(prev.results[0].ticker, "AAPL");
    assert_price_eq(prev.results[0].vwap, 116.3058);
  }

  #[test]
  fn test_open_close_deserialization() {
    let json = r#"{
      "status": "OK",
      "from": "2023-01-09",
      "symbol": "AAPL",
      "open": 130.465,
      "high": 133.41,
      "low": 129.89,
      "close": 130.15,
      "volume": 70790813,
      "afterHours": 129.85,
      "preMarket": 129.6
    }"#;

    let oc: OpenClose = serde_json::from_str(json).unwrap();
    assert!(oc.is_valid());
    assert_eq!(oc.result_count(), 1);
    assert_price_eq(oc.pre_market, 129.6);
    assert_price_eq(oc.after_hours, 129.85);
  }

  #[test]
  fn test_crypto_open_close_deserialization() {
    let json = r#"{
      "symbol": "BTC-USD",
      "isUTC": true,
      "day": "2020-10-09T00:00:00.000Z",
      "open": 10932.44,
      "close": 11050.64,
      "openTrades": [{"s": 0.002, "p": 10932.44, "x": 1, "t": 1602201600056, "c": [2], "i": "511235746"}],
      "closingTrades": []
    }"#;

    let oc: CryptoOpenClose = serde_json::from_str(json).unwrap();
    assert!(oc.is_utc);
    assert_eq!(oc.open_trades.len(), 1);
    assert_eq!(oc.open_trades[0].conditions, vec![2]);
    assert!(oc.closing_trades.is_empty());
  }
}
