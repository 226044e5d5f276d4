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

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use polygon_client::endpoints::aggregates::AggregatesOptions;
use polygon_client::{ensure_valid, PolygonClient, StatusPolicy};
use polygon_core::types::{SortOrder, Timespan};
use polygon_core::Config;
use tracing::info;

const AGGREGATES: StatusPolicy = StatusPolicy::ok_or_delayed("aggregates");

#[derive(Args, Debug)]
pub struct AggsCommand {
  /// Ticker, e.g. AAPL, X:BTCUSD or C:EURUSD
  ticker: String,

  /// First day of the range (YYYY-MM-DD)
  from: NaiveDate,

  /// Last day of the range (YYYY-MM-DD), defaults to `from`
  to: Option<NaiveDate>,

  /// Bar size multiplier
  #[arg(short, long, default_value_t = 1)]
  multiplier: u32,

  /// Bar timespan (minute, hour, day, week, month, quarter, year)
  #[arg(short, long, default_value = "day")]
  timespan: Timespan,

  /// Request unadjusted prices
  #[arg(long)]
  unadjusted: bool,

  /// Newest bars first
  #[arg(long)]
  desc: bool,

  /// Maximum number of bars
  #[arg(short, long)]
  limit: Option<u32>,

  /// Print the raw response as JSON
  #[arg(long)]
  json: bool,
}

pub async fn execute(cmd: AggsCommand, config: Config) -> Result<()> {
  let client = PolygonClient::new(config)?;
  let to = cmd.to.unwrap_or(cmd.from);

  let options = AggregatesOptions {
    adjusted: Some(!cmd.unadjusted),
    sort: Some(if cmd.desc { SortOrder::Descending } else { SortOrder::Ascending }),
    limit: cmd.limit,
  };

  let bars = client
    .aggregates()
    .range(&cmd.ticker, cmd.multiplier, cmd.timespan, cmd.from, to, Some(&options))
    .await
    .with_context(|| format!("Failed to fetch aggregates for {}", cmd.ticker))?;
  ensure_valid(&bars, &AGGREGATES)?;
  info!("{} bars for {} ({})", bars.results.len(), bars.ticker, bars.status);

  if cmd.json {
    println!("{}", serde_json::to_string_pretty(&bars)?);
    return Ok(());
  }

  println!("{:<20} {:>12} {:>12} {:>12} {:>12} {:>14}", "time", "open", "high", "low", "close", "volume");
  for bar in &bars.results {
    let time = bar.time().map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default();
    println!(
      "{:<20} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>14.0}",
      time, bar.open, bar.high, bar.low, bar.close, bar.volume
    );
  }

  Ok(())
}
