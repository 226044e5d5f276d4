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
//! # polygon-models
//!
//! Data models for Polygon REST responses and realtime stream events.
//!
//! This crate provides strongly-typed Rust structures for the response formats
//! the client consumes: aggregate bars, technical indicators, reference data,
//! fundamentals, market status and the realtime aggregate feed.
//!
//! ## Features
//!
//! - **Type Safety**: All API responses are strongly typed
//! - **Serde Integration**: Built-in serialization/deserialization
//! - **Lenient Decoding**: Missing fields fall back to zero values
//! - **Status Envelope**: REST responses implement [`ApiResponse`] so callers
//!   can apply their own status policy
//!
//! ## Usage
//!
//! ```ignore
//! use polygon_models::aggregates::Aggregation;
//! use polygon_models::stream::StockAggregate;
//!
//! let bars: Aggregation = serde_json::from_str(&response_json)?;
//! let tick: StockAggregate = serde_json::from_str(&event_json)?;
//! ```

#![warn(clippy::all)]

pub mod aggregates;
pub mod common;
pub mod fundamentals;
pub mod indicators;
pub mod market;
pub mod reference;
pub mod stream;

// Re-export common types for convenience
pub use common::*;

// Re-export all model types
pub use aggregates::*;
pub use fundamentals::*;
pub use indicators::*;
pub use market::*;
pub use reference::*;
pub use stream::*;
