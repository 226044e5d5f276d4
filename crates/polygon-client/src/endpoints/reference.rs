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
//! Reference data endpoints
//!
//! This module provides access to Polygon's reference data:
//! - Dividends and stock splits
//! - Ticker details and ticker change events
//! - News articles

use super::{format_date, impl_endpoint_base, EndpointBase};
use crate::decode::{ensure_valid, StatusPolicy};
use crate::request::Endpoint;
use crate::transport::Transport;
use chrono::NaiveDate;
use polygon_core::types::SortOrder;
use polygon_core::{ApiVersion, Result};
use polygon_models::reference::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

const LATEST_DIVIDEND: StatusPolicy = StatusPolicy::ok_only("dividend");

/// Query options for dividends
#[derive(Debug, Clone, Default, Serialize)]
pub struct DividendOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub frequency: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dividend_type: Option<DividendType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub order: Option<SortOrder>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
  #[serde(rename = "ex_dividend_date.gte", skip_serializing_if = "Option::is_none")]
  pub ex_dividend_date_gte: Option<String>,
}

#[derive(Serialize)]
struct DividendQuery<'a> {
  ticker: &'a str,
  #[serde(flatten)]
  options: &'a DividendOptions,
}

/// Query options for stock splits
#[derive(Debug, Clone, Default, Serialize)]
pub struct SplitOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ticker: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub execution_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub order: Option<SortOrder>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
}

/// Query options for news
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewsOptions {
  #[serde(rename = "published_utc.lt", skip_serializing_if = "Option::is_none")]
  pub published_lt: Option<String>,
  #[serde(rename = "published_utc.lte", skip_serializing_if = "Option::is_none")]
  pub published_lte: Option<String>,
  #[serde(rename = "published_utc.gt", skip_serializing_if = "Option::is_none")]
  pub published_gt: Option<String>,
  #[serde(rename = "published_utc.gte", skip_serializing_if = "Option::is_none")]
  pub published_gte: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub order: Option<SortOrder>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
}

#[derive(Serialize)]
struct NewsQuery<'a> {
  ticker: &'a str,
  #[serde(flatten)]
  options: &'a NewsOptions,
}

/// Reference data endpoints
pub struct ReferenceEndpoints {
  transport: Arc<Transport>,
}

impl ReferenceEndpoints {
  /// Create a new reference endpoints instance
  pub fn new(transport: Arc<Transport>) -> Self {
    Self { transport }
  }

  /// List dividends of a ticker
  #[instrument(skip(self, options))]
  pub async fn dividends(&self, ticker: &str, options: Option<&DividendOptions>) -> Result<Dividends> {
    let defaults = DividendOptions::default();
    let query = DividendQuery { ticker, options: options.unwrap_or(&defaults) };
    let endpoint = Endpoint::new(ApiVersion::V3, "reference/dividends").with_params(&query)?;
    self.transport.get_json(&endpoint).await
  }

  /// Most recent dividend of a ticker.
  ///
  /// Forces `limit=1` and descending order; fails with `NoResults` when the
  /// ticker has never paid one.
  #[instrument(skip(self, options))]
  pub async fn latest_dividend(&self, ticker: &str, options: Option<&DividendOptions>) -> Result<Dividend> {
    let mut options = options.cloned().unwrap_or_default();
    options.limit = Some(1);
    options.order = Some(SortOrder::Descending);

    let mut response = self.dividends(ticker, Some(&options)).await?;
    ensure_valid(&response, &LATEST_DIVIDEND)?;
    debug!("Latest dividend for {}: {} results", ticker, response.results.len());
    Ok(response.results.swap_remove(0))
  }

  /// List stock splits
  #[instrument(skip(self, options))]
  pub async fn splits(&self, options: Option<&SplitOptions>) -> Result<StockSplits> {
    let mut endpoint = Endpoint::new(ApiVersion::V3, "reference/splits");
    if let Some(options) = options {
      endpoint = endpoint.with_params(options)?;
    }
    self.transport.get_json(&endpoint).await
  }

  /// Ticker details, optionally as of a past date
  #[instrument(skip(self))]
  pub async fn ticker_details(&self, ticker: &str, date: Option<NaiveDate>) -> Result<TickerDetails> {
    let mut endpoint = Endpoint::new(ApiVersion::V3, format!("reference/tickers/{}", ticker));
    if let Some(date) = date {
      endpoint = endpoint.param("date", format_date(date));
    }
    self.transport.get_json(&endpoint).await
  }

  /// Ticker change history. `types` is a comma separated filter such as `ticker_change`.
  #[instrument(skip(self))]
  pub async fn ticker_events(&self, ticker: &str, types: Option<&str>) -> Result<TickerEvents> {
    let mut endpoint = Endpoint::new(ApiVersion::VX, format!("reference/tickers/{}/events", ticker));
    if let Some(types) = types.filter(|t| !t.is_empty()) {
      endpoint = endpoint.param("types", types);
    }
    self.transport.get_json(&endpoint).await
  }

  /// News articles mentioning a ticker
  #[instrument(skip(self, options))]
  pub async fn news(&self, ticker: &str, options: Option<&NewsOptions>) -> Result<News> {
    let defaults = NewsOptions::default();
    let query = NewsQuery { ticker, options: options.unwrap_or(&defaults) };
    let endpoint = Endpoint::new(ApiVersion::V2, "reference/news").with_params(&query)?;
    self.transport.get_json(&endpoint).await
  }
}

impl_endpoint_base!(ReferenceEndpoints);
