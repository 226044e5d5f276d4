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
//! Market status and multi-asset summary endpoints

use super::{impl_endpoint_base, EndpointBase};
use crate::request::Endpoint;
use crate::transport::Transport;
use polygon_core::{ApiVersion, Result};
use polygon_models::market::*;
use std::sync::Arc;
use tracing::instrument;

/// Market endpoints
pub struct MarketEndpoints {
  transport: Arc<Transport>,
}

impl MarketEndpoints {
  /// Create a new market endpoints instance
  pub fn new(transport: Arc<Transport>) -> Self {
    Self { transport }
  }

  /// Current trading status of markets, exchanges and currencies
  #[instrument(skip(self))]
  pub async fn status(&self) -> Result<MarketStatus> {
    let endpoint = Endpoint::new(ApiVersion::V1, "marketstatus/now");
    self.transport.get_json(&endpoint).await
  }

  /// Price summaries for a mixed set of assets. Edge mode only.
  #[instrument(skip(self, assets), fields(assets = assets.len()))]
  pub async fn summaries(&self, assets: &[SummaryAsset]) -> Result<Summary> {
    self.require_edge("summaries")?;

    let tickers = assets.iter().map(SummaryAsset::resolved_ticker).collect::<Vec<_>>().join(",");
    let mut endpoint = Endpoint::new(ApiVersion::V1, "summaries");
    if !tickers.is_empty() {
      endpoint = endpoint.param("ticker.any_of", tickers);
    }
    self.transport.get_json(&endpoint).await
  }
}

impl_endpoint_base!(MarketEndpoints);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::endpoints::test_transport;
  use polygon_core::types::{AssetClass, MarketState};
  use polygon_core::Error;
  use wiremock::matchers::{header, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_market_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/v1/marketstatus/now"))
      .respond_with(ResponseTemplate::new(200).set_body_string(
        r#"{"market":"open","earlyHours":false,"afterHours":false,"currencies":{"fx":"open","crypto":"open"}}"#,
      ))
      .mount(&server)
      .await;

    let endpoints = MarketEndpoints::new(test_transport(&server.uri(), false));
    let status = endpoints.status().await.unwrap();

    assert_eq!(status.state_for(AssetClass::Stocks), MarketState::Open);
  }

  #[tokio::test]
  async fn test_summaries_requires_edge() {
    let server = MockServer::start().await;
    let endpoints = MarketEndpoints::new(test_transport(&server.uri(), false));

    let err = endpoints.summaries(&[SummaryAsset::new("AAPL", SummaryAssetKind::Stock)]).await.unwrap_err();

    assert!(matches!(err, Error::EdgeRequired("summaries")));
  }

  #[tokio::test]
  async fn test_summaries_resolves_tickers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/v1/summaries"))
      .and(query_param("ticker.any_of", "AAPL,C:EURUSD,X:BTCUSD"))
      .and(header("X-Edge-ID", "edge-id"))
      .and(header("X-Edge-IP-Address", "10.1.2.3"))
      .respond_with(ResponseTemplate::new(200).set_body_string(
        r#"{"status":"OK","request_id":"r1","results":[{"ticker":"AAPL","price":189.25},{"ticker":"C:EURUSD"},{"ticker":"X:BTCUSD"}]}"#,
      ))
      .expect(1)
      .mount(&server)
      .await;

    let endpoints = MarketEndpoints::new(test_transport(&server.uri(), true));
    let assets = [
      SummaryAsset::new("AAPL", SummaryAssetKind::Stock),
      SummaryAsset::new("eur/usd", SummaryAssetKind::Forex),
      SummaryAsset::new("btc", SummaryAssetKind::Crypto),
    ];
    let summary = endpoints.summaries(&assets).await.unwrap();

    assert_eq!(summary.results.len(), 3);
    assert_eq!(summary.request_id.as_deref(), Some("r1"));
  }
}
