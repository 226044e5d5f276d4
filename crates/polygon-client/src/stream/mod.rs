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
//! Realtime aggregate streams
//!
//! A [`Connection`] owns one socket for one asset class. Frames read from it
//! are decoded by a [`FrameDecoder`] and routed by [`EventSinks`] onto
//! caller-owned channels: events on one, decode errors on the other.
//!
//! ```ignore
//! let (sinks, mut events, mut errors) = EventSinks::bounded(1024);
//! let cancel = CancellationToken::new();
//! let stream = client.stream();
//! let handle = tokio::spawn({
//!   let cancel = cancel.clone();
//!   async move { stream.stock_aggregates(EventType::StockMinute, &["AAPL"], &sinks, &cancel).await }
//! });
//! while let Some(bar) = events.recv().await {
//!   println!("{} {}", bar.symbol(), bar.close());
//! }
//! ```

pub mod connection;
pub mod frame;
pub mod mux;
pub mod socket;
pub mod subscription;

pub use connection::{Connection, ConnectionState, ReadFailurePolicy};
pub use frame::{Frame, FrameDecoder};
pub use mux::{EventSinks, Flow};
pub use socket::{FrameSocket, TungsteniteSocket};
pub use subscription::{Subscription, SubscriptionKey};

use polygon_core::types::AssetClass;
use polygon_core::{Config, Result};
use polygon_models::stream::EventType;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Entry point for realtime subscriptions
#[derive(Clone)]
pub struct StreamClient {
  ws_url: String,
  credential: String,
  read_failure: ReadFailurePolicy,
}

impl StreamClient {
  pub fn new(config: &Config) -> Self {
    Self {
      ws_url: config.ws_url.clone(),
      credential: config.api_key.clone(),
      read_failure: ReadFailurePolicy::default(),
    }
  }

  pub fn with_read_failure_policy(mut self, policy: ReadFailurePolicy) -> Self {
    self.read_failure = policy;
    self
  }

  pub fn ws_url(&self) -> &str {
    &self.ws_url
  }

  /// Open `subscription` on `socket` and run its read loop to completion
  #[instrument(skip_all, fields(channels = %subscription.channel_spec()))]
  pub async fn subscribe<S: FrameSocket>(
    &self,
    socket: S,
    subscription: Subscription,
    sinks: &EventSinks,
    cancel: &CancellationToken,
  ) -> Result<()> {
    let mut connection = Connection::new(socket, subscription).with_read_failure_policy(self.read_failure);
    connection.open(&self.ws_url, &self.credential).await?;
    connection.run(sinks, cancel).await
  }

  /// Stock aggregates (`AM` or `A`) for `symbols`
  pub async fn stock_aggregates<S: AsRef<str> + Sync>(
    &self,
    event: EventType,
    symbols: &[S],
    sinks: &EventSinks,
    cancel: &CancellationToken,
  ) -> Result<()> {
    self.aggregates(AssetClass::Stocks, event, symbols, sinks, cancel).await
  }

  /// Crypto aggregates (`XA` or `XAS`) for pairs such as `BTC-USD`
  pub async fn crypto_aggregates<S: AsRef<str> + Sync>(
    &self,
    event: EventType,
    pairs: &[S],
    sinks: &EventSinks,
    cancel: &CancellationToken,
  ) -> Result<()> {
    self.aggregates(AssetClass::Crypto, event, pairs, sinks, cancel).await
  }

  /// Forex aggregates (`CA` or `CAS`) for pairs such as `EUR/USD`
  pub async fn forex_aggregates<S: AsRef<str> + Sync>(
    &self,
    event: EventType,
    pairs: &[S],
    sinks: &EventSinks,
    cancel: &CancellationToken,
  ) -> Result<()> {
    self.aggregates(AssetClass::Forex, event, pairs, sinks, cancel).await
  }

  async fn aggregates<S: AsRef<str> + Sync>(
    &self,
    asset: AssetClass,
    event: EventType,
    symbols: &[S],
    sinks: &EventSinks,
    cancel: &CancellationToken,
  ) -> Result<()> {
    let subscription = Subscription::for_symbols(asset, event, symbols)?;
    self.subscribe(TungsteniteSocket::new(), subscription, sinks, cancel).await
  }
}

impl fmt::Debug for StreamClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StreamClient")
      .field("ws_url", &self.ws_url)
      .field("read_failure", &self.read_failure)
      .finish_non_exhaustive()
  }
}
