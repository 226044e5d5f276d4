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
//! Technical indicator endpoints (SMA, EMA, RSI)

use super::{impl_endpoint_base, normalize_ticker, EndpointBase};
use crate::decode::{ensure_valid, StatusPolicy};
use crate::request::Endpoint;
use crate::transport::Transport;
use polygon_core::types::{SortOrder, Timespan};
use polygon_core::{ApiVersion, Error, Result};
use polygon_models::indicators::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

const SMA: StatusPolicy = StatusPolicy::ok_only("sma");
const EMA: StatusPolicy = StatusPolicy::ok_only("ema");
const RSI: StatusPolicy = StatusPolicy::ok_only("rsi");

/// Query options shared by every indicator
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorOptions {
  pub timespan: Timespan,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<String>,
  #[serde(rename = "timestamp.gt", skip_serializing_if = "Option::is_none")]
  pub timestamp_gt: Option<String>,
  #[serde(rename = "timestamp.gte", skip_serializing_if = "Option::is_none")]
  pub timestamp_gte: Option<String>,
  #[serde(rename = "timestamp.lt", skip_serializing_if = "Option::is_none")]
  pub timestamp_lt: Option<String>,
  #[serde(rename = "timestamp.lte", skip_serializing_if = "Option::is_none")]
  pub timestamp_lte: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub adjusted: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub window: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub order: Option<SortOrder>,
}

impl IndicatorOptions {
  pub fn new(timespan: Timespan) -> Self {
    Self {
      timespan,
      timestamp: None,
      timestamp_gt: None,
      timestamp_gte: None,
      timestamp_lt: None,
      timestamp_lte: None,
      adjusted: None,
      window: None,
      limit: None,
      order: None,
    }
  }

  pub fn window(mut self, window: u32) -> Self {
    self.window = Some(window);
    self
  }

  pub fn limit(mut self, limit: u32) -> Self {
    self.limit = Some(limit);
    self
  }

  pub fn order(mut self, order: SortOrder) -> Self {
    self.order = Some(order);
    self
  }

  pub fn adjusted(mut self, adjusted: bool) -> Self {
    self.adjusted = Some(adjusted);
    self
  }
}

/// Technical indicator endpoints
///
/// Every call requires status `OK` and at least one value.
pub struct IndicatorEndpoints {
  transport: Arc<Transport>,
}

impl IndicatorEndpoints {
  /// Create a new indicator endpoints instance
  pub fn new(transport: Arc<Transport>) -> Self {
    Self { transport }
  }

  /// Simple moving average
  #[instrument(skip(self, options))]
  pub async fn sma(&self, ticker: &str, options: &IndicatorOptions) -> Result<SmaResponse> {
    self.fetch("sma", ticker, options, &SMA).await
  }

  /// Exponential moving average
  #[instrument(skip(self, options))]
  pub async fn ema(&self, ticker: &str, options: &IndicatorOptions) -> Result<EmaResponse> {
    self.fetch("ema", ticker, options, &EMA).await
  }

  /// Relative strength index. Not served in edge mode.
  #[instrument(skip(self, options))]
  pub async fn rsi(&self, ticker: &str, options: &IndicatorOptions) -> Result<RsiResponse> {
    self.reject_edge("rsi")?;
    self.fetch("rsi", ticker, options, &RSI).await
  }

  /// Most recent daily RSI over a two-day window
  #[instrument(skip(self))]
  pub async fn latest_rsi(&self, ticker: &str) -> Result<f64> {
    let options =
      IndicatorOptions::new(Timespan::Day).adjusted(true).window(2).limit(1).order(SortOrder::Descending);
    let response = self.rsi(ticker, &options).await?;
    response.first_value().ok_or(Error::NoResults("rsi"))
  }

  async fn fetch(
    &self,
    kind: &str,
    ticker: &str,
    options: &IndicatorOptions,
    policy: &StatusPolicy,
  ) -> Result<IndicatorResponse> {
    let path = format!("indicators/{}/{}", kind, normalize_ticker(ticker));
    let endpoint = Endpoint::new(ApiVersion::V1, path).with_params(options)?;
    let response: IndicatorResponse = self.transport.get_json(&endpoint).await?;
    ensure_valid(&response, policy)?;
    Ok(response)
  }
}

impl_endpoint_base!(IndicatorEndpoints);
