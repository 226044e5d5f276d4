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

use anyhow::Result;
use clap::Args;
use polygon_client::{AggregateEvent, EventSinks, EventType, PolygonClient, ReadFailurePolicy};
use polygon_core::types::AssetClass;
use polygon_core::Config;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct StreamCommand {
  /// Symbols (stocks) or pairs (crypto `BTC-USD`, forex `EUR/USD`)
  #[arg(required = true)]
  symbols: Vec<String>,

  /// Asset class: stocks, crypto or forex
  #[arg(short, long, default_value = "stocks")]
  asset: AssetClass,

  /// Per-second bars instead of per-minute
  #[arg(long)]
  second: bool,

  /// Event channel capacity
  #[arg(long, default_value_t = 1024)]
  buffer: usize,

  /// Print events as JSON lines
  #[arg(long)]
  json: bool,
}

fn event_type(asset: AssetClass, per_second: bool) -> EventType {
  match (asset, per_second) {
    (AssetClass::Stocks, false) => EventType::StockMinute,
    (AssetClass::Stocks, true) => EventType::StockSecond,
    (AssetClass::Crypto, false) => EventType::CryptoMinute,
    (AssetClass::Crypto, true) => EventType::CryptoSecond,
    (AssetClass::Forex, false) => EventType::ForexMinute,
    (AssetClass::Forex, true) => EventType::ForexSecond,
  }
}

fn print_event(event: &AggregateEvent, json: bool) -> Result<()> {
  if json {
    let line = match event {
      AggregateEvent::Stock(bar) => serde_json::to_string(bar)?,
      AggregateEvent::Crypto(bar) => serde_json::to_string(bar)?,
      AggregateEvent::Forex(bar) => serde_json::to_string(bar)?,
    };
    println!("{}", line);
    return Ok(());
  }

  let end = event.end_time().map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default();
  println!(
    "{} {:<3} {:<10} o {:>12.5} h {:>12.5} l {:>12.5} c {:>12.5} v {:>12.2}",
    end,
    event.event_type(),
    event.symbol(),
    event.open(),
    event.high(),
    event.low(),
    event.close(),
    event.volume()
  );
  Ok(())
}

pub async fn execute(cmd: StreamCommand, config: Config) -> Result<()> {
  let client = PolygonClient::new(config)?;
  let event = event_type(cmd.asset, cmd.second);
  // socket failures arrive on the error channel like decode errors
  let stream = client.stream().with_read_failure_policy(ReadFailurePolicy::Report);

  let (sinks, mut events, mut errors) = EventSinks::bounded(cmd.buffer);
  let cancel = CancellationToken::new();

  let task = tokio::spawn({
    let cancel = cancel.clone();
    let symbols = cmd.symbols.clone();
    let asset = cmd.asset;
    async move {
      match asset {
        AssetClass::Stocks => stream.stock_aggregates(event, &symbols, &sinks, &cancel).await,
        AssetClass::Crypto => stream.crypto_aggregates(event, &symbols, &sinks, &cancel).await,
        AssetClass::Forex => stream.forex_aggregates(event, &symbols, &sinks, &cancel).await,
      }
    }
  });

  info!("Streaming {} {} bars for {}", cmd.asset, event, cmd.symbols.join(","));

  loop {
    tokio::select! {
      _ = tokio::signal::ctrl_c() => {
        info!("Interrupted, closing stream");
        cancel.cancel();
        break;
      }
      Some(event) = events.recv() => print_event(&event, cmd.json)?,
      Some(err) = errors.recv() => warn!("Stream error: {}", err),
      else => break,
    }
  }

  task.await??;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_event_type_matches_asset() {
    for asset in [AssetClass::Stocks, AssetClass::Crypto, AssetClass::Forex] {
      for per_second in [false, true] {
        let event = event_type(asset, per_second);
        assert_eq!(event.asset_class(), asset);
        assert_eq!(event.is_per_second(), per_second);
      }
    }
  }
}
