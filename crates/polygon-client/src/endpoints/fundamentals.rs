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
//! Fundamental data endpoints: financial statements, income statements and
//! earnings per share

use super::{impl_endpoint_base, normalize_ticker, EndpointBase};
use crate::decode::{ensure_valid, StatusPolicy};
use crate::request::Endpoint;
use crate::transport::Transport;
use polygon_core::types::SortOrder;
use polygon_core::{ApiVersion, Error, Result};
use polygon_models::fundamentals::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

const FINANCIALS: StatusPolicy = StatusPolicy::ok_only("financials");
const EPS: StatusPolicy = StatusPolicy::ok_only("eps");
const INCOME_STATEMENTS: StatusPolicy = StatusPolicy::ok_only("income_statements");

/// Query options for financials
#[derive(Debug, Clone, Default, Serialize)]
pub struct FinancialsOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cik: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub company_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sic: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub filing_date: Option<String>,
  #[serde(rename = "filing_date.gte", skip_serializing_if = "Option::is_none")]
  pub filing_date_gte: Option<String>,
  #[serde(rename = "filing_date.lte", skip_serializing_if = "Option::is_none")]
  pub filing_date_lte: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub period_of_report_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeframe: Option<FinancialTimeframe>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub include_sources: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub order: Option<SortOrder>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
}

/// Query options for income statements. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IncomeStatementsOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cik: Option<String>,
  /// Matches statements whose ticker list contains this value
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tickers: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub period_end: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub filing_date: Option<String>,
  #[serde(rename = "filing_date.gte", skip_serializing_if = "Option::is_none")]
  pub filing_date_gte: Option<String>,
  #[serde(rename = "filing_date.lte", skip_serializing_if = "Option::is_none")]
  pub filing_date_lte: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fiscal_year: Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fiscal_quarter: Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeframe: Option<StatementTimeframe>,
  /// Server default 100, max 50000
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  /// e.g. `period_end.desc`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
}

#[derive(Serialize)]
struct FinancialsQuery<'a> {
  ticker: &'a str,
  #[serde(flatten)]
  options: &'a FinancialsOptions,
}

/// Fundamental data endpoints
pub struct FundamentalsEndpoints {
  transport: Arc<Transport>,
}

impl FundamentalsEndpoints {
  /// Create a new fundamentals endpoints instance
  pub fn new(transport: Arc<Transport>) -> Self {
    Self { transport }
  }

  /// Financial statements of a company
  ///
  /// Requires status `OK` and at least one filing.
  #[instrument(skip(self, options))]
  pub async fn financials(&self, ticker: &str, options: Option<&FinancialsOptions>) -> Result<Financials> {
    self.fetch(ticker, options, &FINANCIALS).await
  }

  /// Diluted earnings per share over the trailing twelve months
  #[instrument(skip(self))]
  pub async fn earnings_per_share(&self, ticker: &str) -> Result<f64> {
    let options = FinancialsOptions {
      timeframe: Some(FinancialTimeframe::TrailingTwelveMonths),
      limit: Some(1),
      ..Default::default()
    };
    let response = self.fetch(ticker, Some(&options), &EPS).await?;
    response.results.first().map(FinancialResult::diluted_eps).ok_or(Error::NoResults("eps"))
  }

  /// Income statements, the successor of [`financials`](Self::financials)
  ///
  /// Requires status `OK` and at least one statement.
  ///
  /// # Examples
  ///
  /// ```ignore
  /// let options = IncomeStatementsOptions {
  ///   tickers: Some("AAPL".to_string()),
  ///   timeframe: Some(StatementTimeframe::Quarterly),
  ///   limit: Some(4),
  ///   ..Default::default()
  /// };
  /// let statements = client.fundamentals().income_statements(Some(&options)).await?;
  /// for statement in &statements.results {
  ///   println!("{} revenue {}", statement.period_end, statement.revenue());
  /// }
  /// ```
  #[instrument(skip(self, options))]
  pub async fn income_statements(
    &self,
    options: Option<&IncomeStatementsOptions>,
  ) -> Result<IncomeStatementsResponse> {
    let defaults = IncomeStatementsOptions::default();
    let endpoint =
      Endpoint::new(ApiVersion::FinancialsV1, "income-statements").with_params(options.unwrap_or(&defaults))?;
    let response: IncomeStatementsResponse = self.transport.get_json(&endpoint).await?;
    ensure_valid(&response, &INCOME_STATEMENTS)?;
    Ok(response)
  }

  async fn fetch(
    &self,
    ticker: &str,
    options: Option<&FinancialsOptions>,
    policy: &StatusPolicy,
  ) -> Result<Financials> {
    let ticker = normalize_ticker(ticker);
    let defaults = FinancialsOptions::default();
    let query = FinancialsQuery { ticker: &ticker, options: options.unwrap_or(&defaults) };
    let endpoint = Endpoint::new(ApiVersion::VX, "reference/financials").with_params(&query)?;
    let response: Financials = self.transport.get_json(&endpoint).await?;
    ensure_valid(&response, policy)?;
    Ok(response)
  }
}

impl_endpoint_base!(FundamentalsEndpoints);
