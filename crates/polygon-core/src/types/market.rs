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
//! Market session states reported by the market status and summaries endpoints

use serde::{Deserialize, Serialize};

/// Trading state of a market or exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MarketState {
  Open,
  Closed,
  ExtendedHours,
  EarlyHours,
  AfterHours,
  Overnight,
  #[default]
  #[serde(other)]
  Unknown,
}

impl MarketState {
  pub fn as_str(&self) -> &'static str {
    match self {
      MarketState::Open => "open",
      MarketState::Closed => "closed",
      MarketState::ExtendedHours => "extended-hours",
      MarketState::EarlyHours => "early-hours",
      MarketState::AfterHours => "after-hours",
      MarketState::Overnight => "overnight",
      MarketState::Unknown => "",
    }
  }

  /// Whether regular or extended trading is happening
  pub fn is_trading(&self) -> bool {
    !matches!(self, MarketState::Closed | MarketState::Unknown)
  }
}

impl std::fmt::Display for MarketState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_market_state_deserialize() {
    let state: MarketState = serde_json::from_str("\"extended-hours\"").unwrap();
    assert_eq!(state, MarketState::ExtendedHours);
    assert!(state.is_trading());

    let state: MarketState = serde_json::from_str("\"maintenance\"").unwrap();
    assert_eq!(state, MarketState::Unknown);
    assert!(!state.is_trading());
  }
}
