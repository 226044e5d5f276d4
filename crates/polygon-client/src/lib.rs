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
//! # polygon-client
//!
//! A Polygon market-data client for Rust.
//!
//! ## Features
//!
//! - **Retrying executor**: transient connection-closed failures are retried
//!   under an explicit [`RetryPolicy`]
//! - **Typed endpoints**: aggregates, indicators, reference data,
//!   fundamentals and market status decoded into `polygon-models` types
//! - **Status validation**: per-family [`StatusPolicy`] checks on the raw
//!   `status` field and result counts
//! - **Realtime streams**: authenticated websocket subscriptions fanned out
//!   onto caller-owned channels, cancellable through a `CancellationToken`
//! - **Edge mode**: optional edge headers on every request
//!
//! ## Usage
//!
//! ```rust,no_run
//! use polygon_client::PolygonClient;
//! use polygon_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = PolygonClient::new(config)?;
//!
//!     let prev = client.aggregates().previous_close("AAPL", Some(true)).await?;
//!     println!("Previous close: {:?}", prev.results.first().map(|bar| bar.close));
//!
//!     let eps = client.fundamentals().earnings_per_share("AAPL").await?;
//!     println!("EPS (ttm): {}", eps);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, polygon_core::Error>` for consistent error
//! handling across the polygon-* crates. Non-200 responses surface as
//! [`Error::Api`] and are never retried.

#![warn(clippy::all)]

pub mod client;
pub mod decode;
pub mod endpoints;
pub mod request;
pub mod retry;
pub mod stream;
pub mod transport;

// Re-export the main client and common types
pub use client::PolygonClient;
pub use decode::{ensure_valid, StatusPolicy};
pub use polygon_core::{ApiError, ApiVersion, Config, Edge, Error, Result};
pub use polygon_models::*;
pub use request::Endpoint;
pub use retry::{Backoff, RetryClassifier, RetryPolicy, TransportError, TransportErrorKind};
pub use transport::{HttpSend, Transport};

// Re-export endpoint groups for direct access if needed
pub use endpoints::{
  aggregates::AggregatesEndpoints, fundamentals::FundamentalsEndpoints, indicators::IndicatorEndpoints,
  market::MarketEndpoints, reference::ReferenceEndpoints,
};
pub use stream::{EventSinks, ReadFailurePolicy, StreamClient, Subscription};
