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
//! Per-call endpoint descriptors
//!
//! An [`Endpoint`] pins the API version, resource path and query parameters
//! of one call. It is built fresh for every request and handed to the
//! transport by reference; the client itself never changes version.

use polygon_core::{ApiVersion, Error, Result};
use serde::Serialize;
use url::Url;

/// Version, path and query of a single REST call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
  version: ApiVersion,
  path: String,
  query: Vec<(String, String)>,
}

impl Endpoint {
  /// `path` is relative to the version segment, e.g. `aggs/ticker/AAPL/prev`
  pub fn new(version: ApiVersion, path: impl Into<String>) -> Self {
    let path = path.into();
    Self { version, path: path.trim_start_matches('/').to_string(), query: Vec::new() }
  }

  /// Append one query parameter
  pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
    self.query.push((key.into(), value.to_string()));
    self
  }

  /// Append every field of an option struct as query parameters
  pub fn with_params<P: Serialize>(mut self, params: &P) -> Result<Self> {
    let encoded = serde_urlencoded::to_string(params).map_err(|e| Error::QueryEncode(e.to_string()))?;
    let pairs: Vec<(String, String)> =
      serde_urlencoded::from_str(&encoded).map_err(|e| Error::QueryEncode(e.to_string()))?;
    self.query.extend(pairs);
    Ok(self)
  }

  pub fn version(&self) -> ApiVersion {
    self.version
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn query(&self) -> &[(String, String)] {
    &self.query
  }

  /// Full request URL with the credential appended as `apiKey`
  pub fn url(&self, base_url: &str, api_key: &str) -> Result<Url> {
    let base = base_url.trim_end_matches('/');
    let mut url = Url::parse(&format!("{}/{}/{}", base, self.version, self.path))?;
    {
      let mut pairs = url.query_pairs_mut();
      for (key, value) in &self.query {
        pairs.append_pair(key, value);
      }
      pairs.append_pair("apiKey", api_key);
    }
    Ok(url)
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "/{}/{}", self.version, self.path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use polygon_core::types::SortOrder;

  #[derive(Serialize, Default)]
  struct Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<SortOrder>,
    #[serde(rename = "ex_dividend_date.gte", skip_serializing_if = "Option::is_none")]
    ex_date_gte: Option<String>,
  }

  #[test]
  fn test_url_layout() {
    let endpoint = Endpoint::new(ApiVersion::V2, "/aggs/ticker/AAPL/prev").param("adjusted", true);
    let url = endpoint.url("https://api.polygon.io", "secret").unwrap();

    assert_eq!(url.as_str(), "https://api.polygon.io/v2/aggs/ticker/AAPL/prev?adjusted=true&apiKey=secret");
    assert_eq!(endpoint.to_string(), "/v2/aggs/ticker/AAPL/prev");
  }

  #[test]
  fn test_option_struct_encoding() {
    let opts = Options { limit: Some(1), order: Some(SortOrder::Descending), ex_date_gte: Some("2024-01-01".into()) };
    let endpoint = Endpoint::new(ApiVersion::V3, "reference/dividends").with_params(&opts).unwrap();
    let url = endpoint.url("http://localhost:8080/", "k").unwrap();

    assert_eq!(
      url.as_str(),
      "http://localhost:8080/v3/reference/dividends?limit=1&order=desc&ex_dividend_date.gte=2024-01-01&apiKey=k"
    );
  }

  #[test]
  fn test_empty_options_add_nothing() {
    let endpoint = Endpoint::new(ApiVersion::V1, "marketstatus/now").with_params(&Options::default()).unwrap();
    assert!(endpoint.query().is_empty());
    assert_eq!(endpoint.version(), ApiVersion::V1);
  }

  #[test]
  fn test_invalid_base_url() {
    let endpoint = Endpoint::new(ApiVersion::V1, "marketstatus/now");
    assert!(matches!(endpoint.url("not a url", "k"), Err(Error::Url(_))));
  }
}
