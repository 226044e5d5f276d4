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
//! Aggregate bar endpoints
//!
//! This module provides access to Polygon's aggregate (OHLCV) data:
//! - Custom date ranges at any multiple of a timespan
//! - The previous trading day's bar
//! - Daily open/close for stocks and crypto pairs

use super::{format_date, impl_endpoint_base, EndpointBase};
use crate::request::Endpoint;
use crate::transport::Transport;
use chrono::NaiveDate;
use polygon_core::types::{SortOrder, Timespan};
use polygon_core::{ApiVersion, Result};
use polygon_models::aggregates::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Query options for [`AggregatesEndpoints::range`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatesOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub adjusted: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sort: Option<SortOrder>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
}

#[derive(Serialize)]
struct AdjustedOption {
  #[serde(skip_serializing_if = "Option::is_none")]
  adjusted: Option<bool>,
}

/// Aggregate bar endpoints
pub struct AggregatesEndpoints {
  transport: Arc<Transport>,
}

impl AggregatesEndpoints {
  /// Create a new aggregates endpoints instance
  pub fn new(transport: Arc<Transport>) -> Self {
    Self { transport }
  }

  /// Get aggregate bars for a ticker over a date range
  ///
  /// # Arguments
  ///
  /// * `ticker` - Ticker symbol, e.g. `AAPL` or `X:BTCUSD`
  /// * `multiplier` - Size of the timespan multiplier
  /// * `timespan` - Window size
  /// * `from` / `to` - Inclusive date range
  ///
  /// The response is returned unvalidated; callers that need bars can check
  /// [`Aggregation::is_valid`] or apply `StatusPolicy::ok_or_delayed`.
  ///
  /// # Examples
  ///
  /// ```ignore
  /// let bars = client
  ///   .aggregates()
  ///   .range("AAPL", 1, Timespan::Day, from, to, None)
  ///   .await?;
  /// for bar in &bars.results {
  ///   println!("{:?} close {}", bar.time(), bar.close);
  /// }
  /// ```
  #[instrument(skip(self, options))]
  pub async fn range(
    &self,
    ticker: &str,
    multiplier: u32,
    timespan: Timespan,
    from: NaiveDate,
    to: NaiveDate,
    options: Option<&AggregatesOptions>,
  ) -> Result<Aggregation> {
    let path = format!(
      "aggs/ticker/{}/range/{}/{}/{}/{}",
      ticker,
      multiplier,
      timespan,
      format_date(from),
      format_date(to)
    );
    let mut endpoint = Endpoint::new(ApiVersion::V2, path);
    if let Some(options) = options {
      endpoint = endpoint.with_params(options)?;
    }
    self.transport.get_json(&endpoint).await
  }

  /// Get the previous trading day's bar
  #[instrument(skip(self))]
  pub async fn previous_close(&self, ticker: &str, adjusted: Option<bool>) -> Result<PrevClose> {
    let endpoint =
      Endpoint::new(ApiVersion::V2, format!("aggs/ticker/{}/prev", ticker)).with_params(&AdjustedOption { adjusted })?;
    self.transport.get_json(&endpoint).await
  }

  /// Get open, close and extended-hours prices of a stock on one date
  #[instrument(skip(self))]
  pub async fn daily_open_close(&self, ticker: &str, date: NaiveDate, adjusted: Option<bool>) -> Result<OpenClose> {
    let endpoint = Endpoint::new(ApiVersion::V1, format!("open-close/{}/{}", ticker, format_date(date)))
      .with_params(&AdjustedOption { adjusted })?;
    self.transport.get_json(&endpoint).await
  }

  /// Get open and close of a crypto pair on one date
  #[instrument(skip(self))]
  pub async fn crypto_daily_open_close(
    &self,
    from: &str,
    to: &str,
    date: NaiveDate,
    adjusted: Option<bool>,
  ) -> Result<CryptoOpenClose> {
    let endpoint = Endpoint::new(ApiVersion::V1, format!("open-close/crypto/{}/{}/{}", from, to, format_date(date)))
      .with_params(&AdjustedOption { adjusted })?;
    self.transport.get_json(&endpoint).await
  }
}

impl_endpoint_base!(AggregatesEndpoints);
