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
//! Server-side computed technical indicators (SMA, EMA, RSI)

use serde::{Deserialize, Serialize};

use crate::common::{ApiResponse, IndicatorValue, Underlying};

/// Response shared by every indicator endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorResponse {
  pub results: IndicatorResults,
  pub status: String,
  pub request_id: Option<String>,
  pub next_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorResults {
  pub underlying: Underlying,
  pub values: Vec<IndicatorValue>,
}

impl IndicatorResponse {
  /// First value as returned by the server; newest first when ordered `desc`
  pub fn first_value(&self) -> Option<f64> {
    self.results.values.first().map(|v| v.value)
  }
}

impl ApiResponse for IndicatorResponse {
  fn status(&self) -> &str {
    &self.status
  }

  fn request_id(&self) -> Option<&str> {
    self.request_id.as_deref()
  }

  fn result_count(&self) -> usize {
    self.results.values.len()
  }
}

pub type SmaResponse = IndicatorResponse;
pub type EmaResponse = IndicatorResponse;
pub type RsiResponse = IndicatorResponse;
