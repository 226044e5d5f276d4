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
//! Shared helpers for tests across polygon-* crates

/// Tolerance used when comparing prices decoded from JSON
pub const PRICE_TOLERANCE: f64 = 1e-9;

/// Assert that a decoded price matches the expected value
pub fn assert_price_eq(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < PRICE_TOLERANCE,
    "prices differ:\n  actual:   {}\n  expected: {}",
    actual,
    expected
  );
}

/// A realtime stock aggregate object as the feed sends it
pub fn stock_aggregate_json(event: &str, symbol: &str, close: f64, start_ms: i64) -> String {
  format!(
    r#"{{"ev":"{event}","sym":"{symbol}","v":4110,"av":9470157,"op":0.4372,"vw":0.4488,"o":0.4488,"c":{close},"h":0.4488,"l":0.4486,"a":0.4352,"z":685,"s":{start_ms},"e":{end_ms}}}"#,
    end_ms = start_ms + 60_000
  )
}

/// A realtime crypto aggregate object as the feed sends it
pub fn crypto_aggregate_json(pair: &str, close: f64, start_ms: i64) -> String {
  format!(
    r#"{{"ev":"XA","pair":"{pair}","v":951.6112,"vw":0.7756,"z":73,"o":0.772,"c":{close},"h":0.784,"l":0.771,"s":{start_ms},"e":{end_ms}}}"#,
    end_ms = start_ms + 60_000
  )
}

/// A realtime forex aggregate object as the feed sends it
pub fn forex_aggregate_json(pair: &str, close: f64, start_ms: i64) -> String {
  format!(
    r#"{{"ev":"CA","pair":"{pair}","o":0.8687,"c":{close},"h":0.86889,"l":0.8686,"v":20,"s":{start_ms},"e":{end_ms}}}"#,
    end_ms = start_ms + 60_000
  )
}

/// Wrap event objects into one array frame
pub fn array_frame(objects: &[String]) -> String {
  format!("[{}]", objects.join(","))
}

/// Right-pad a frame with NUL bytes the way a fixed-size read buffer would
pub fn nul_padded(frame: &str, total_len: usize) -> Vec<u8> {
  let mut bytes = frame.as_bytes().to_vec();
  if bytes.len() < total_len {
    bytes.resize(total_len, 0);
  }
  bytes
}
