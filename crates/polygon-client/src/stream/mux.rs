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
//! Fan-out of decoded frames onto caller-owned channels

use super::frame::Frame;
use polygon_core::{Error, Result};
use polygon_models::stream::AggregateEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Whether the read loop should keep going after a forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
  Continue,
  Cancelled,
}

/// Sending halves of the event and error channels.
///
/// Sends wait for channel capacity, so a slow consumer stalls the read loop
/// instead of growing a queue.
#[derive(Debug, Clone)]
pub struct EventSinks {
  events: mpsc::Sender<AggregateEvent>,
  errors: mpsc::Sender<Error>,
}

impl EventSinks {
  pub fn new(events: mpsc::Sender<AggregateEvent>, errors: mpsc::Sender<Error>) -> Self {
    Self { events, errors }
  }

  /// Create bounded channels and return the sinks with both receivers
  pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<AggregateEvent>, mpsc::Receiver<Error>) {
    let (events, event_rx) = mpsc::channel(capacity);
    let (errors, error_rx) = mpsc::channel(capacity);
    (Self::new(events, errors), event_rx, error_rx)
  }

  /// Route one decode outcome.
  ///
  /// Events go out in frame order, decode errors go to the error channel and
  /// control frames are only logged. A dropped receiver fails with
  /// [`Error::ChannelClosed`].
  pub async fn forward(&self, outcome: Result<Frame>, cancel: &CancellationToken) -> Result<Flow> {
    match outcome {
      Ok(Frame::Events(events)) => {
        for event in events {
          if send(&self.events, event, cancel).await? == Flow::Cancelled {
            return Ok(Flow::Cancelled);
          }
        }
        Ok(Flow::Continue)
      }
      Ok(Frame::Control(message)) => {
        info!("{}", message.text);
        Ok(Flow::Continue)
      }
      Err(error) => self.report(error, cancel).await,
    }
  }

  /// Push one error onto the error channel
  pub async fn report(&self, error: Error, cancel: &CancellationToken) -> Result<Flow> {
    send(&self.errors, error, cancel).await
  }
}

async fn send<T>(tx: &mpsc::Sender<T>, item: T, cancel: &CancellationToken) -> Result<Flow> {
  tokio::select! {
    biased;
    _ = cancel.cancelled() => Ok(Flow::Cancelled),
    sent = tx.send(item) => sent.map(|_| Flow::Continue).map_err(|_| Error::ChannelClosed),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::stream::frame::FrameDecoder;
  use polygon_core::test_utils::{array_frame, stock_aggregate_json};
  use polygon_core::types::AssetClass;
  use polygon_models::stream::ControlMessage;
  use std::time::Duration;

  fn three_events() -> Frame {
    let frame = array_frame(&[
      stock_aggregate_json("A", "AAPL", 1.0, 1_000),
      stock_aggregate_json("A", "MSFT", 2.0, 1_000),
      stock_aggregate_json("A", "NVDA", 3.0, 1_000),
    ]);
    FrameDecoder::new(AssetClass::Stocks).decode(frame.as_bytes()).unwrap()
  }

  #[tokio::test]
  async fn test_forward_preserves_order() {
    let (sinks, mut events, mut errors) = EventSinks::bounded(8);
    let cancel = CancellationToken::new();

    assert_eq!(sinks.forward(Ok(three_events()), &cancel).await.unwrap(), Flow::Continue);
    drop(sinks);

    let mut symbols = Vec::new();
    while let Some(event) = events.recv().await {
      symbols.push(event.symbol().to_string());
    }
    assert_eq!(symbols, ["AAPL", "MSFT", "NVDA"]);
    assert!(errors.recv().await.is_none());
  }

  #[tokio::test]
  async fn test_control_and_errors_routing() {
    let (sinks, mut events, mut errors) = EventSinks::bounded(8);
    let cancel = CancellationToken::new();

    sinks.forward(Ok(Frame::Control(ControlMessage::new("connected"))), &cancel).await.unwrap();
    sinks.forward(Err(Error::WebSocket("bad frame".into())), &cancel).await.unwrap();
    drop(sinks);

    assert!(events.recv().await.is_none());
    assert!(matches!(errors.recv().await, Some(Error::WebSocket(_))));
  }

  #[tokio::test]
  async fn test_closed_receiver() {
    let (sinks, events, _errors) = EventSinks::bounded(1);
    drop(events);

    let err = sinks.forward(Ok(three_events()), &CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, Error::ChannelClosed));
  }

  #[tokio::test]
  async fn test_cancel_while_blocked() {
    let (sinks, _events, _errors) = EventSinks::bounded(1);
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(20)).await;
      canceller.cancel();
    });

    // capacity 1 and nobody reading: the second send blocks until cancelled
    let flow = sinks.forward(Ok(three_events()), &cancel).await.unwrap();
    assert_eq!(flow, Flow::Cancelled);
  }
}
