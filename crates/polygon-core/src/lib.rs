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
pub mod config;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{Config, Edge};
pub use error::{ApiError, Error, Result};

/// Path segment selecting the Polygon API generation for a request.
///
/// Polygon's API versions are not unified: the same client talks to `v1`,
/// `v2`, `v3` and the experimental `vX` routes depending on the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
  V1,
  V2,
  V3,
  VX,
  /// Financial statements, versioned under `stocks/financials/v1`
  FinancialsV1,
}

impl ApiVersion {
  /// The literal path segment used in the request URL
  pub fn as_str(&self) -> &'static str {
    match self {
      ApiVersion::V1 => "v1",
      ApiVersion::V2 => "v2",
      ApiVersion::V3 => "v3",
      ApiVersion::VX => "vX",
      ApiVersion::FinancialsV1 => "stocks/financials/v1",
    }
  }
}

impl std::fmt::Display for ApiVersion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Base URL for the Polygon REST API (version segment is appended per request)
pub const POLYGON_BASE_URL: &str = "https://api.polygon.io";

/// Base URL for the Polygon realtime websocket cluster
pub const POLYGON_WS_URL: &str = "wss://socket.polygon.io";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Header carrying the edge identifier in edge (launchpad) mode
pub const EDGE_ID_HEADER: &str = "X-Edge-ID";

/// Header carrying the edge source address in edge (launchpad) mode
pub const EDGE_IP_HEADER: &str = "X-Edge-IP-Address";
