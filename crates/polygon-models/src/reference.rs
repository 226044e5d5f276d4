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
//! Reference data models: dividends, splits, ticker details, ticker events and news

use serde::{Deserialize, Serialize};

use crate::common::{ApiResponse, Branding};

/// Dividend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DividendType {
  /// Consistent schedule
  #[serde(rename = "CD")]
  Consistent,
  /// Special cash
  #[serde(rename = "SC")]
  SpecialCash,
  /// Long-term capital gain
  #[serde(rename = "LT")]
  LongTermGain,
  /// Short-term capital gain
  #[serde(rename = "ST")]
  ShortTermGain,
  #[default]
  #[serde(other)]
  Other,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dividends {
  pub results: Vec<Dividend>,
  pub status: String,
  pub request_id: Option<String>,
  pub next_url: Option<String>,
}

impl ApiResponse for Dividends {
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
pub struct Dividend {
  pub cash_amount: f64,
  pub currency: String,
  pub declaration_date: String,
  pub dividend_type: DividendType,
  pub ex_dividend_date: String,
  /// Payments per year; 0 for one-off
  pub frequency: u32,
  pub pay_date: String,
  pub record_date: String,
  pub ticker: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockSplits {
  pub results: Vec<StockSplit>,
  pub status: String,
  pub request_id: Option<String>,
  pub next_url: Option<String>,
}

impl ApiResponse for StockSplits {
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
pub struct StockSplit {
  pub execution_date: String,
  pub split_from: f64,
  pub split_to: f64,
  pub ticker: String,
}

impl StockSplit {
  /// New shares per old share
  pub fn ratio(&self) -> Option<f64> {
    if self.split_from == 0.0 {
      None
    } else {
      Some(self.split_to / self.split_from)
    }
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerDetails {
  pub results: TickerDetailsResult,
  pub status: String,
  pub request_id: Option<String>,
}

impl ApiResponse for TickerDetails {
  fn status(&self) -> &str {
    &self.status
  }

  fn request_id(&self) -> Option<&str> {
    self.request_id.as_deref()
  }

  fn result_count(&self) -> usize {
    usize::from(!self.results.ticker.is_empty())
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerDetailsResult {
  pub ticker: String,
  pub name: String,
  pub market: String,
  pub locale: String,
  pub primary_exchange: String,
  /// Ticker type code, `CS` for common stock
  #[serde(rename = "type")]
  pub ticker_type: String,
  pub active: bool,
  pub currency_name: String,
  pub market_cap: f64,
  pub phone_number: String,
  pub address: Address,
  pub description: String,
  #[serde(rename = "sic_description")]
  pub sector: String,
  pub sic_code: String,
  pub homepage_url: String,
  pub total_employees: u64,
  pub list_date: String,
  pub branding: Branding,
}

impl TickerDetailsResult {
  pub fn is_common_stock(&self) -> bool {
    self.ticker_type == "CS"
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
  pub address1: String,
  pub city: String,
  pub state: String,
  pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerEvents {
  pub results: TickerEventsResult,
  pub status: String,
  pub request_id: Option<String>,
}

impl ApiResponse for TickerEvents {
  fn status(&self) -> &str {
    &self.status
  }

  fn request_id(&self) -> Option<&str> {
    self.request_id.as_deref()
  }

  fn result_count(&self) -> usize {
    self.results.events.len()
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerEventsResult {
  pub name: String,
  pub figi: String,
  pub cik: String,
  pub events: Vec<TickerEvent>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerEvent {
  #[serde(rename = "type")]
  pub event_type: String,
  pub date: String,
  pub ticker_change: TickerChange,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerChange {
  pub ticker: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct News {
  pub results: Vec<NewsArticle>,
  pub status: String,
  pub request_id: Option<String>,
  pub count: u64,
  pub next_url: Option<String>,
}

impl ApiResponse for News {
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
pub struct NewsArticle {
  pub id: String,
  pub publisher: Publisher,
  pub title: String,
  pub author: String,
  pub published_utc: String,
  pub article_url: String,
  pub tickers: Vec<String>,
  pub image_url: String,
  pub description: String,
  pub keywords: Vec<String>,
}

impl NewsArticle {
  pub fn mentions(&self, ticker: &str) -> bool {
    self.tickers.iter().any(|t| t.eq_ignore_ascii_case(ticker))
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publisher {
  pub name: String,
  pub homepage_url: String,
  pub logo_url: String,
  pub favicon_url: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use polygon_core::test_utils::assert_price_eq;

  #[test]
  fn test_dividends_deserialization() {
    let json = r#"{
      "results": [{
        "cash_amount": 0.24,
        "currency": "USD",
        "declaration_date": "2023-05-04",
        "dividend_type": "CD",
        "ex_dividend_date": "2023-05-12",
        "frequency": 4,
        "pay_date": "2023-05-18",
        "record_date": "2023-05-15",
        "ticker": "AAPL"
      }],
      "status": "OK",
      "request_id": "eca2e3ea1b4d1d6a9a2a6e2e2b0b2b3a",
      "next_url": "https://api.polygon.io/v3/reference/dividends?cursor=abc"
    }"#;

    let divs: Dividends = serde_json::from_str(json).unwrap();
    assert_eq!(divs.result_count(), 1);
    assert_eq!(divs.results[0].dividend_type, DividendType::Consistent);
    assert_eq!(divs.results[0].frequency, 4);
    assert_price_eq(divs.results[0].cash_amount, 0.24);
  }

  #[test]
  fn test_unknown_dividend_type() {
    let div: Dividend = serde_json::from_str(r#"{"dividend_type": "XX"}"#).unwrap();
    assert_eq!(div.dividend_type, DividendType::Other);
    assert_eq!(serde_json::to_string(&DividendType::SpecialCash).unwrap(), "\"SC\"");
  }

  #[test]
  fn test_stock_split_ratio() {
    let json = r#"{
      "results": [{"execution_date": "2020-08-31", "split_from": 1, "split_to": 4, "ticker": "AAPL"}],
      "status": "OK"
    }"#;

    let splits: StockSplits = serde_json::from_str(json).unwrap();
    assert_price_eq(splits.results[0].ratio().unwrap(), 4.0);
    assert!(StockSplit::default().ratio().is_none());
  }

  #[test]
  fn test_ticker_details_deserialization() {
    let json = r#"{
      "results": {
        "ticker": "AAPL",
        "name": "Apple Inc.",
        "market": "stocks",
        "locale": "us",
        "primary_exchange": "XNAS",
        "type": "CS",
        "active": true,
        "currency_name": "usd",
        "market_cap": 2771126040150.0,
        "phone_number": "(408) 996-1010",
        "address": {"address1": "ONE APPLE PARK WAY", "city": "CUPERTINO", "state": "CA", "postal_code": "95014"},
        "description": "Apple designs a wide variety of consumer electronic devices.",
        "sic_code": "3571",
        "sic_description": "ELECTRONIC COMPUTERS",
        "homepage_url": "https://www.apple.com",
        "total_employees": 154000,
        "list_date": "1980-12-12",
        "branding": {
          "logo_url": "https://api.polygon.io/v1/reference/company-branding/logo.svg",
          "icon_url": "https://api.polygon.io/v1/reference/company-branding/icon.png"
        }
      },
      "status": "OK",
      "request_id": "31d59dda-80e5-4721-8496-d0d32a654afe"
    }"#;

    let details: TickerDetails = serde_json::from_str(json).unwrap();
    assert_eq!(details.result_count(), 1);
    assert!(details.results.is_common_stock());
    assert_eq!(details.results.sector, "ELECTRONIC COMPUTERS");
    assert_eq!(details.results.address.city, "CUPERTINO");
    assert!(details.results.branding.icon_url.ends_with("icon.png"));
  }

  #[test]
  fn test_ticker_events_deserialization() {
    let json = r#"{
      "results": {
        "name": "Meta Platforms, Inc. Class A Common Stock",
        "figi": "BBG000MM2P62",
        "cik": "0001326801",
        "events": [
          {"ticker_change": {"ticker": "META"}, "type": "ticker_change", "date": "2022-06-09"},
          {"ticker_change": {"ticker": "FB"}, "type": "ticker_change", "date": "2012-05-18"}
        ]
      },
      "status": "OK",
      "request_id": "8c911ff1-5ca8-41e8-9bbf-e625141caacc"
    }"#;

    let events: TickerEvents = serde_json::from_str(json).unwrap();
    assert_eq!(events.result_count(), 2);
    assert_eq!(events.results.events[1].ticker_change.ticker, "FB");
    assert_eq!(events.results.events[0].event_type, "ticker_change");
  }

  #[test]
  fn test_news_deserialization() {
    let json = r#"{
      "results": [{
        "id": "8ec638777ca03b553ae516761c2a22ba2fdd2f37befae3ab6fdab74e9e5193eb",
        "publisher": {"name": "Investing.com", "homepage_url": "https://www.investing.com/", "logo_url": "", "favicon_url": ""},
        "title": "Markets open higher",
        "author": "Staff",
        "published_utc": "2021-04-26T02:33:17Z",
        "article_url": "https://www.investing.com/news/1",
        "tickers": ["AAPL", "MSFT"],
        "image_url": "",
        "description": "",
        "keywords": ["markets"]
      }],
      "status": "OK",
      "count": 1
    }"#;

    let news: News = serde_json::from_str(json).unwrap();
    assert_eq!(news.count, 1);
    assert!(news.results[0].mentions("msft"));
    assert!(!news.results[0].mentions("NVDA"));
    assert_eq!(news.results[0].publisher.name, "Investing.com");
  }
}
