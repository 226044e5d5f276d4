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
//! Decoding of raw websocket frames into aggregate events

use polygon_core::types::AssetClass;
use polygon_core::{Error, Result};
use polygon_models::stream::{
  AggregateEvent, ControlMessage, CryptoAggregate, EventType, ForexAggregate, StockAggregate,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

const CONTROL_MARKER: &str = "\"message\"";

/// One decoded frame
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
  /// Status or acknowledgement text, not data
  Control(ControlMessage),
  /// Data events in feed order
  Events(Vec<AggregateEvent>),
}

/// Decodes frames of one asset class
#[derive(Debug, Clone, Copy)]
pub struct FrameDecoder {
  asset: AssetClass,
}

impl FrameDecoder {
  pub fn new(asset: AssetClass) -> Self {
    Self { asset }
  }

  pub fn asset(&self) -> AssetClass {
    self.asset
  }

  /// Decode one raw frame.
  ///
  /// NUL padding is stripped first. Frames mentioning a `"message"` key are
  /// control frames. Anything else must be a JSON array; a frame that is not
  /// fails with [`Error::FrameDecode`]. Elements are decoded one by one:
  /// those tagged with another feed's event type, or that do not decode, are
  /// skipped and the rest of the batch is kept.
  pub fn decode(&self, raw: &[u8]) -> Result<Frame> {
    let payload = trim_nul(raw);

    if contains(payload, CONTROL_MARKER.as_bytes()) {
      let text = String::from_utf8_lossy(payload).into_owned();
      return Ok(Frame::Control(ControlMessage::new(text)));
    }

    let items: Vec<Value> = serde_json::from_slice(payload).map_err(Error::FrameDecode)?;
    let events = match self.asset {
      AssetClass::Stocks => self.collect::<StockAggregate>(items),
      AssetClass::Crypto => self.collect::<CryptoAggregate>(items),
      AssetClass::Forex => self.collect::<ForexAggregate>(items),
    };
    Ok(Frame::Events(events))
  }

  fn collect<T>(&self, items: Vec<Value>) -> Vec<AggregateEvent>
  where
    T: DeserializeOwned + Into<AggregateEvent>,
  {
    let mut events = Vec::with_capacity(items.len());
    for item in items {
      if let Some(tag) = item.get("ev").and_then(Value::as_str) {
        if !self.carries(tag) {
          debug!("Skipping {} event on the {} feed", tag, self.asset);
          continue;
        }
      }
      match serde_json::from_value::<T>(item) {
        Ok(event) => events.push(event.into()),
        Err(e) => warn!("Skipping undecodable {} event: {}", self.asset, e),
      }
    }
    events
  }

  fn carries(&self, tag: &str) -> bool {
    tag.parse::<EventType>().is_ok_and(|ev| ev.asset_class() == self.asset)
  }
}

fn trim_nul(raw: &[u8]) -> &[u8] {
  let start = raw.iter().position(|b| *b != 0).unwrap_or(raw.len());
  let end = raw.iter().rposition(|b| *b != 0).map_or(start, |i| i + 1);
  &raw[start..end]
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
  haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
  use super::*;
  use polygon_core::test_utils::{
    array_frame, assert_price_eq, crypto_aggregate_json, forex_aggregate_json, nul_padded, stock_aggregate_json,
  };

  #[test]
  fn test_decode_stock_array() {
    let frame = array_frame(&[
      stock_aggregate_json("AM", "AAPL", 150.25, 1_700_000_000_000),
      stock_aggregate_json("AM", "NVDA", 480.5, 1_700_000_000_000),
    ]);

    let decoded = FrameDecoder::new(AssetClass::Stocks).decode(frame.as_bytes()).unwrap();
    let Frame::Events(events) = decoded else { panic!("expected events") };

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].symbol(), "AAPL");
    assert_eq!(events[1].symbol(), "NVDA");
    assert_price_eq(events[1].close(), 480.5);
  }

  #[test]
  fn test_control_frame() {
    let raw = br#"[{"ev":"status","status":"auth_success","message":"authenticated"}]"#;
    let decoded = FrameDecoder::new(AssetClass::Stocks).decode(raw).unwrap();

    match decoded {
      Frame::Control(msg) => assert!(msg.text.contains("auth_success")),
      other => panic!("expected control frame, got {:?}", other),
    }
  }

  #[test]
  fn test_nul_padding_stripped() {
    let frame = array_frame(&[crypto_aggregate_json("BTC-USD", 43000.5, 1_700_000_000_000)]);
    let padded = nul_padded(&frame, 1024);

    let decoded = FrameDecoder::new(AssetClass::Crypto).decode(&padded).unwrap();
    let Frame::Events(events) = decoded else { panic!("expected events") };

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].asset_class(), AssetClass::Crypto);
  }

  #[test]
  fn test_empty_array_and_malformed() {
    let decoder = FrameDecoder::new(AssetClass::Forex);

    assert_eq!(decoder.decode(b"[]").unwrap(), Frame::Events(vec![]));
    assert!(matches!(decoder.decode(b"{not json"), Err(Error::FrameDecode(_))));
    assert!(matches!(decoder.decode(b""), Err(Error::FrameDecode(_))));
  }

  #[test]
  fn test_foreign_and_untagged_elements() {
    let frame = array_frame(&[
      stock_aggregate_json("AM", "AAPL", 150.25, 1_700_000_000_000),
      r#"{"ev":"T","sym":"AAPL","p":1.0}"#.to_string(),
      r#"{"ev":"XA","pair":"BTC-USD","c":43000.0}"#.to_string(),
      r#"{"sym":"NVDA","o":1.0,"c":2.0}"#.to_string(),
    ]);

    let Frame::Events(events) = FrameDecoder::new(AssetClass::Stocks).decode(frame.as_bytes()).unwrap() else {
      panic!("expected events")
    };

    let symbols: Vec<&str> = events.iter().map(|e| e.symbol()).collect();
    assert_eq!(symbols, ["AAPL", "NVDA"]);
    assert_eq!(events[1].event_type(), EventType::StockMinute);
    assert_price_eq(events[1].close(), 2.0);
  }

  #[test]
  fn test_undecodable_element_keeps_batch() {
    let frame = array_frame(&[
      r#"{"ev":"CA","pair":"EUR/USD","c":"not a number"}"#.to_string(),
      forex_aggregate_json("USD/JPY", 149.5, 1_700_000_000_000),
    ]);

    let Frame::Events(events) = FrameDecoder::new(AssetClass::Forex).decode(frame.as_bytes()).unwrap() else {
      panic!("expected events")
    };

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].symbol(), "USD/JPY");
  }

  #[test]
  fn test_forex_event_tagged_with_asset() {
    let frame = array_frame(&[forex_aggregate_json("EUR/USD", 1.0875, 1_700_000_000_000)]);
    let Frame::Events(events) = FrameDecoder::new(AssetClass::Forex).decode(frame.as_bytes()).unwrap() else {
      panic!("expected events")
    };

    assert_eq!(events[0].symbol(), "EUR/USD");
    assert_eq!(events[0].asset_class(), AssetClass::Forex);
  }
}
