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
//! Realtime aggregate events pushed over the websocket feed

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use polygon_core::types::AssetClass;
use serde::{Deserialize, Serialize};

use crate::common::millis_to_datetime;

/// Event type tag (`ev`) of a realtime aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
  /// Per-minute stock aggregate
  #[serde(rename = "AM")]
  StockMinute,
  /// Per-second stock aggregate
  #[serde(rename = "A")]
  StockSecond,
  #[serde(rename = "XA")]
  CryptoMinute,
  #[serde(rename = "XAS")]
  CryptoSecond,
  #[serde(rename = "CA")]
  ForexMinute,
  #[serde(rename = "CAS")]
  ForexSecond,
}

impl EventType {
  pub fn as_str(&self) -> &'static str {
    match self {
      EventType::StockMinute => "AM",
      EventType::StockSecond => "A",
      EventType::CryptoMinute => "XA",
      EventType::CryptoSecond => "XAS",
      EventType::ForexMinute => "CA",
      EventType::ForexSecond => "CAS",
    }
  }

  /// The socket this event type is served on
  pub fn asset_class(&self) -> AssetClass {
    match self {
      EventType::StockMinute | EventType::StockSecond => AssetClass::Stocks,
      EventType::CryptoMinute | EventType::CryptoSecond => AssetClass::Crypto,
      EventType::ForexMinute | EventType::ForexSecond => AssetClass::Forex,
    }
  }

  pub fn is_per_second(&self) -> bool {
    matches!(self, EventType::StockSecond | EventType::CryptoSecond | EventType::ForexSecond)
  }
}

impl fmt::Display for EventType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EventType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "AM" => Ok(EventType::StockMinute),
      "A" => Ok(EventType::StockSecond),
      "XA" => Ok(EventType::CryptoMinute),
      "XAS" => Ok(EventType::CryptoSecond),
      "CA" => Ok(EventType::ForexMinute),
      "CAS" => Ok(EventType::ForexSecond),
      other => Err(format!("unknown event type: {}", other)),
    }
  }
}

fn stock_minute() -> EventType {
  EventType::StockMinute
}

fn crypto_minute() -> EventType {
  EventType::CryptoMinute
}

fn forex_minute() -> EventType {
  EventType::ForexMinute
}

/// Stock aggregate bar (`AM` / `A`)
///
/// An element without `ev` is taken as a minute bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAggregate {
  #[serde(default = "stock_minute")]
  pub ev: EventType,
  pub sym: String,
  /// Tick volume
  #[serde(default)]
  pub v: f64,
  /// Accumulated volume for the day
  #[serde(default)]
  pub av: f64,
  /// Official opening price of the day, 0 before the open print
  #[serde(default)]
  pub op: f64,
  /// Tick volume-weighted average price
  #[serde(default)]
  pub vw: f64,
  #[serde(default)]
  pub o: f64,
  #[serde(default)]
  pub c: f64,
  #[serde(default)]
  pub h: f64,
  #[serde(default)]
  pub l: f64,
  /// Day's volume-weighted average price
  #[serde(default)]
  pub a: f64,
  /// Average trade size
  #[serde(default)]
  pub z: f64,
  /// Window start, Unix milliseconds
  #[serde(default)]
  pub s: i64,
  /// Window end, Unix milliseconds
  #[serde(default)]
  pub e: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub otc: Option<bool>,
}

impl StockAggregate {
  /// Official open when printed, else the window's open
  pub fn valid_open(&self) -> f64 {
    if self.op == 0.0 {
      self.o
    } else {
      self.op
    }
  }
}

/// Crypto aggregate bar (`XA` / `XAS`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoAggregate {
  #[serde(default = "crypto_minute")]
  pub ev: EventType,
  pub pair: String,
  #[serde(default)]
  pub v: f64,
  #[serde(default)]
  pub vw: f64,
  #[serde(default)]
  pub z: f64,
  #[serde(default)]
  pub o: f64,
  #[serde(default)]
  pub c: f64,
  #[serde(default)]
  pub h: f64,
  #[serde(default)]
  pub l: f64,
  #[serde(default)]
  pub s: i64,
  #[serde(default)]
  pub e: i64,
}

/// Forex aggregate bar (`CA` / `CAS`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexAggregate {
  #[serde(default = "forex_minute")]
  pub ev: EventType,
  pub pair: String,
  #[serde(default)]
  pub o: f64,
  #[serde(default)]
  pub c: f64,
  #[serde(default)]
  pub h: f64,
  #[serde(default)]
  pub l: f64,
  #[serde(default)]
  pub v: f64,
  #[serde(default)]
  pub s: i64,
  #[serde(default)]
  pub e: i64,
}

/// One decoded aggregate, tagged by asset class
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateEvent {
  Stock(StockAggregate),
  Crypto(CryptoAggregate),
  Forex(ForexAggregate),
}

impl AggregateEvent {
  pub fn asset_class(&self) -> AssetClass {
    match self {
      AggregateEvent::Stock(_) => AssetClass::Stocks,
      AggregateEvent::Crypto(_) => AssetClass::Crypto,
      AggregateEvent::Forex(_) => AssetClass::Forex,
    }
  }

  pub fn event_type(&self) -> EventType {
    match self {
      AggregateEvent::Stock(agg) => agg.ev,
      AggregateEvent::Crypto(agg) => agg.ev,
      AggregateEvent::Forex(agg) => agg.ev,
    }
  }

  /// Ticker for stocks, pair for crypto and forex
  pub fn symbol(&self) -> &str {
    match self {
      AggregateEvent::Stock(agg) => &agg.sym,
      AggregateEvent::Crypto(agg) => &agg.pair,
      AggregateEvent::Forex(agg) => &agg.pair,
    }
  }

  pub fn open(&self) -> f64 {
    match self {
      AggregateEvent::Stock(agg) => agg.o,
      AggregateEvent::Crypto(agg) => agg.o,
      AggregateEvent::Forex(agg) => agg.o,
    }
  }

  pub fn close(&self) -> f64 {
    match self {
      AggregateEvent::Stock(agg) => agg.c,
      AggregateEvent::Crypto(agg) => agg.c,
      AggregateEvent::Forex(agg) => agg.c,
    }
  }

  pub fn high(&self) -> f64 {
    match self {
      AggregateEvent::Stock(agg) => agg.h,
      AggregateEvent::Crypto(agg) => agg.h,
      AggregateEvent::Forex(agg) => agg.h,
    }
  }

  pub fn low(&self) -> f64 {
    match self {
      AggregateEvent::Stock(agg) => agg.l,
      AggregateEvent::Crypto(agg) => agg.l,
      AggregateEvent::Forex(agg) => agg.l,
    }
  }

  pub fn volume(&self) -> f64 {
    match self {
      AggregateEvent::Stock(agg) => agg.v,
      AggregateEvent::Crypto(agg) => agg.v,
      AggregateEvent::Forex(agg) => agg.v,
    }
  }

  /// Day's accumulated volume; only stock aggregates carry it
  pub fn accumulated_volume(&self) -> Option<f64> {
    match self {
      AggregateEvent::Stock(agg) => Some(agg.av),
      _ => None,
    }
  }

  pub fn start_ms(&self) -> i64 {
    match self {
      AggregateEvent::Stock(agg) => agg.s,
      AggregateEvent::Crypto(agg) => agg.s,
      AggregateEvent::Forex(agg) => agg.s,
    }
  }

  pub fn end_ms(&self) -> i64 {
    match self {
      AggregateEvent::Stock(agg) => agg.e,
      AggregateEvent::Crypto(agg) => agg.e,
      AggregateEvent::Forex(agg) => agg.e,
    }
  }

  pub fn start_time(&self) -> Option<DateTime<Utc>> {
    millis_to_datetime(self.start_ms())
  }

  pub fn end_time(&self) -> Option<DateTime<Utc>> {
    millis_to_datetime(self.end_ms())
  }
}

impl From<StockAggregate> for AggregateEvent {
  fn from(agg: StockAggregate) -> Self {
    AggregateEvent::Stock(agg)
  }
}

impl From<CryptoAggregate> for AggregateEvent {
  fn from(agg: CryptoAggregate) -> Self {
    AggregateEvent::Crypto(agg)
  }
}

impl From<ForexAggregate> for AggregateEvent {
  fn from(agg: ForexAggregate) -> Self {
    AggregateEvent::Forex(agg)
  }
}

/// Status or acknowledgement frame from the server (auth results, subscription confirmations)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMessage {
  pub text: String,
}

impl ControlMessage {
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into() }
  }
}
