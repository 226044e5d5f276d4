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
//! Stream per-minute stock bars and print them alongside the previous close.
//!
//! ```text
//! POLYGON_API_KEY=... cargo run -p polygon-client --example stream_aggregates -- AAPL NVDA
//! ```

use polygon_client::{EventSinks, EventType, PolygonClient};
use polygon_core::Config;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Initialize logging
  tracing_subscriber::fmt::init();

  let config = Config::from_env().map_err(|e| {
    eprintln!("Failed to load configuration. Make sure POLYGON_API_KEY is set.");
    eprintln!("Error: {}", e);
    e
  })?;
  let client = PolygonClient::new(config)?;

  let mut symbols: Vec<String> = std::env::args().skip(1).map(|s| s.to_uppercase()).collect();
  if symbols.is_empty() {
    symbols = vec!["AAPL".to_string(), "NVDA".to_string()];
  }

  // Reference prices for the session change column
  let mut previous = HashMap::new();
  for symbol in &symbols {
    match client.aggregates().previous_close(symbol, Some(true)).await {
      Ok(prev) => {
        if let Some(bar) = prev.results.first() {
          previous.insert(symbol.clone(), bar.close);
        }
      }
      Err(e) => eprintln!("No previous close for {}: {}", symbol, e),
    }
  }

  let (sinks, mut events, mut errors) = EventSinks::bounded(1024);
  let cancel = CancellationToken::new();
  let stream = client.stream();

  let task = tokio::spawn({
    let cancel = cancel.clone();
    let symbols = symbols.clone();
    async move { stream.stock_aggregates(EventType::StockMinute, &symbols, &sinks, &cancel).await }
  });

  loop {
    tokio::select! {
      _ = tokio::signal::ctrl_c() => {
        cancel.cancel();
        break;
      }
      Some(bar) = events.recv() => {
        let change = previous
          .get(bar.symbol())
          .map(|prev| format!("{:+.2}%", (bar.close() - prev) / prev * 100.0))
          .unwrap_or_default();
        println!(
          "{} {:<6} o {:>10.4} c {:>10.4} v {:>10} {}",
          bar.end_time().map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default(),
          bar.symbol(),
          bar.open(),
          bar.close(),
          bar.volume(),
          change
        );
      }
      Some(err) = errors.recv() => eprintln!("decode error: {}", err),
      else => break,
    }
  }

  task.await??;
  Ok(())
}
