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
//! Fundamental financial statement models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::ApiResponse;

const REVENUES: &str = "revenues";
const NET_INCOME: &str = "consolidated_net_income_loss";
const DILUTED_EPS: &str = "diluted_earnings_per_share";

/// Reporting window of a filing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialTimeframe {
  Annual,
  Quarterly,
  #[serde(rename = "ttm")]
  TrailingTwelveMonths,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Financials {
  pub results: Vec<FinancialResult>,
  pub status: String,
  pub request_id: Option<String>,
  pub next_url: Option<String>,
}

impl ApiResponse for Financials {
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

/// One filing's statements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialResult {
  pub start_date: String,
  pub end_date: String,
  /// `quarterly`, `annual` or `ttm`; kept raw since the server has used other spellings
  pub timeframe: String,
  pub fiscal_period: String,
  pub fiscal_year: String,
  pub cik: String,
  pub sic: String,
  pub tickers: Vec<String>,
  pub company_name: String,
  pub financials: FinancialStatements,
}

impl FinancialResult {
  /// Reported revenues, 0 when absent
  pub fn revenue(&self) -> f64 {
    self.financials.income_metric(REVENUES)
  }

  /// Consolidated net income (loss), 0 when absent
  pub fn net_income(&self) -> f64 {
    self.financials.income_metric(NET_INCOME)
  }

  pub fn diluted_eps(&self) -> f64 {
    self.financials.income_metric(DILUTED_EPS)
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialStatements {
  pub income_statement: HashMap<String, Metric>,
  pub balance_sheet: HashMap<String, Metric>,
  pub comprehensive_income: HashMap<String, Metric>,
  pub cash_flow_statement: HashMap<String, Metric>,
}

impl FinancialStatements {
  fn income_metric(&self, key: &str) -> f64 {
    self.income_statement.get(key).map(|m| m.value).unwrap_or(0.0)
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
  pub value: f64,
  pub unit: String,
  pub label: String,
  pub order: i64,
}

/// Reporting window accepted by the income statements endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementTimeframe {
  Annual,
  Quarterly,
  TrailingTwelveMonths,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatementsResponse {
  pub results: Vec<IncomeStatement>,
  pub status: String,
  pub request_id: Option<String>,
  pub next_url: Option<String>,
}

impl ApiResponse for IncomeStatementsResponse {
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

/// One income statement period. Metrics absent from the filing are `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatement {
  pub cik: String,
  pub tickers: Vec<String>,
  pub period_end: String,
  pub filing_date: Option<String>,
  pub fiscal_year: Option<i32>,
  pub fiscal_quarter: Option<i32>,
  /// `quarterly`, `annual` or `trailing_twelve_months`
  pub timeframe: String,
  pub revenue: Option<f64>,
  pub cost_of_revenue: Option<f64>,
  pub gross_profit: Option<f64>,
  pub research_development: Option<f64>,
  pub selling_general_administrative: Option<f64>,
  pub depreciation_depletion_amortization: Option<f64>,
  pub other_operating_expenses: Option<f64>,
  pub total_operating_expenses: Option<f64>,
  pub operating_income: Option<f64>,
  pub interest_income: Option<f64>,
  pub interest_expense: Option<f64>,
  pub other_income_expense: Option<f64>,
  pub total_other_income_expense: Option<f64>,
  pub income_before_income_taxes: Option<f64>,
  pub income_taxes: Option<f64>,
  pub equity_in_affiliates: Option<f64>,
  pub discontinued_operations: Option<f64>,
  pub extraordinary_items: Option<f64>,
  pub consolidated_net_income_loss: Option<f64>,
  pub noncontrolling_interest: Option<f64>,
  pub preferred_stock_dividends_declared: Option<f64>,
  pub net_income_loss_attributable_common_shareholders: Option<f64>,
  pub basic_earnings_per_share: Option<f64>,
  pub diluted_earnings_per_share: Option<f64>,
  pub basic_shares_outstanding: Option<f64>,
  pub diluted_shares_outstanding: Option<f64>,
  pub ebitda: Option<f64>,
}

impl IncomeStatement {
  /// Revenue for the period, 0 when absent
  pub fn revenue(&self) -> f64 {
    self.revenue.unwrap_or(0.0)
  }

  /// Diluted earnings per share for the period, 0 when absent
  pub fn earnings_per_share(&self) -> f64 {
    self.diluted_earnings_per_share.unwrap_or(0.0)
  }
}
