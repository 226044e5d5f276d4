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
//! Common types and structures shared by Polygon REST responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope fields every validated REST response exposes.
///
/// The raw `status` string is surfaced untouched; which values are acceptable
/// is decided by the caller's status policy, not by the model.
pub trait ApiResponse {
  /// Raw `status` field of the response
  fn status(&self) -> &str;

  /// Request id assigned by Polygon, when present
  fn request_id(&self) -> Option<&str> {
    None
  }

  /// Number of result items carried by the response
  fn result_count(&self) -> usize;
}

/// Convert a Unix millisecond timestamp into a UTC datetime
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
  DateTime::from_timestamp_millis(millis)
}

/// Logo and icon links for a ticker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
  pub logo_url: String,
  pub icon_url: String,
}

/// Link to the aggregate data an indicator was computed from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Underlying {
  pub url: String,
}

/// One point of a server-side computed indicator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorValue {
  /// Unix milliseconds
  pub timestamp: i64,
  pub value: f64,
}

impl IndicatorValue {
  pub fn time(&self) -> Option<DateTime<Utc>> {
    millis_to_datetime(self.timestamp)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_millis_to_datetime() {
    let dt = millis_to_datetime(1_610_144_640_000).unwrap();
    assert_eq!(dt.to_rfc3339(), "2021-01-08T22:24:00+00:00");
  }

  #[test]
  fn test_indicator_value_defaults_missing_fields() {
    let value: IndicatorValue = serde_json::from_str(r#"{"value": 12.5}"#).unwrap();
    assert_eq!(value.timestamp, 0);
    assert_eq!(value.value, 12.5);
  }
}
