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
//! Authenticated, subscribed stream connection and its read loop

use super::frame::FrameDecoder;
use super::mux::{EventSinks, Flow};
use super::socket::FrameSocket;
use super::subscription::Subscription;
use polygon_core::{Error, Result};
use serde::Serialize;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Lifecycle of a [`Connection`]. States only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
  Disconnected,
  Connecting,
  Connected,
  Authenticated,
  Subscribed,
  Closed,
  Faulted,
}

impl ConnectionState {
  /// Whether `next` directly follows `self`
  pub fn can_transition(self, next: ConnectionState) -> bool {
    use ConnectionState::*;
    matches!(
      (self, next),
      (Disconnected, Connecting)
        | (Connecting, Connected)
        | (Connected, Authenticated)
        | (Authenticated, Subscribed)
        | (Subscribed, Closed)
        | (Connecting | Connected | Authenticated, Faulted)
    )
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, ConnectionState::Closed | ConnectionState::Faulted)
  }
}

impl fmt::Display for ConnectionState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ConnectionState::Disconnected => "disconnected",
      ConnectionState::Connecting => "connecting",
      ConnectionState::Connected => "connected",
      ConnectionState::Authenticated => "authenticated",
      ConnectionState::Subscribed => "subscribed",
      ConnectionState::Closed => "closed",
      ConnectionState::Faulted => "faulted",
    };
    f.write_str(name)
  }
}

/// What `run` does with the socket error that ends the read loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFailurePolicy {
  /// Return it from `run`
  #[default]
  Return,
  /// Push it onto the error channel and return `Ok(())`
  Report,
}

#[derive(Serialize)]
struct ActionFrame<'a> {
  action: &'a str,
  params: &'a str,
}

/// One websocket connection for one asset class.
///
/// [`open`](Connection::open) performs the connect, auth and subscribe
/// handshake; [`run`](Connection::run) then reads frames until the socket
/// fails, a receiver is dropped or the token is cancelled.
pub struct Connection<S: FrameSocket> {
  socket: S,
  state: ConnectionState,
  subscription: Subscription,
  decoder: FrameDecoder,
  read_failure: ReadFailurePolicy,
}

impl<S: FrameSocket> Connection<S> {
  pub fn new(socket: S, subscription: Subscription) -> Self {
    let decoder = FrameDecoder::new(subscription.asset());
    Self {
      socket,
      state: ConnectionState::Disconnected,
      subscription,
      decoder,
      read_failure: ReadFailurePolicy::default(),
    }
  }

  pub fn with_read_failure_policy(mut self, policy: ReadFailurePolicy) -> Self {
    self.read_failure = policy;
    self
  }

  pub fn state(&self) -> ConnectionState {
    self.state
  }

  pub fn subscription(&self) -> &Subscription {
    &self.subscription
  }

  /// Connect to `{ws_base}/{asset}`, authenticate and subscribe.
  ///
  /// Any connect or send failure leaves the connection `Faulted` and is
  /// returned as is.
  #[instrument(skip(self, ws_base, credential), fields(asset = %self.subscription.asset()))]
  pub async fn open(&mut self, ws_base: &str, credential: &str) -> Result<()> {
    let url = self.subscription.url(ws_base);
    self.transition(ConnectionState::Connecting)?;

    let connected = self.socket.connect(&url).await;
    self.advance(connected, ConnectionState::Connected)?;
    debug!("Connected to {}", url);

    let auth = self.send_action("auth", credential).await;
    self.advance(auth, ConnectionState::Authenticated)?;

    let channels = self.subscription.channel_spec();
    let subscribed = self.send_action("subscribe", &channels).await;
    self.advance(subscribed, ConnectionState::Subscribed)?;
    info!("Subscribed to {}", channels);

    Ok(())
  }

  /// Read, decode and forward frames until the loop ends.
  ///
  /// Cancellation is observed while waiting for a frame and while blocked on
  /// a full channel, and ends the loop with `Ok(())`. The socket is closed
  /// and the connection is `Closed` afterwards in every case.
  #[instrument(skip_all, fields(asset = %self.subscription.asset()))]
  pub async fn run(&mut self, sinks: &EventSinks, cancel: &CancellationToken) -> Result<()> {
    if self.state != ConnectionState::Subscribed {
      return Err(self.invalid(ConnectionState::Closed));
    }

    let outcome = loop {
      let received = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        raw = self.socket.receive() => Some(raw),
      };

      let raw = match received {
        None => break Ok(()),
        Some(Ok(raw)) => raw,
        Some(Err(error)) => break self.read_failed(error, sinks, cancel).await,
      };

      match sinks.forward(self.decoder.decode(&raw), cancel).await {
        Ok(Flow::Continue) => {}
        Ok(Flow::Cancelled) => break Ok(()),
        Err(error) => break Err(error),
      }
    };

    if cancel.is_cancelled() {
      info!("Stream cancelled");
    }
    if let Err(e) = self.socket.close().await {
      debug!("Closing socket failed: {}", e);
    }
    self.transition(ConnectionState::Closed)?;
    outcome
  }

  async fn send_action(&mut self, action: &str, params: &str) -> Result<()> {
    let text = serde_json::to_string(&ActionFrame { action, params })?;
    self.socket.send_text(text).await
  }

  async fn read_failed(&self, error: Error, sinks: &EventSinks, cancel: &CancellationToken) -> Result<()> {
    warn!("Read loop ended: {}", error);
    match self.read_failure {
      ReadFailurePolicy::Return => Err(error),
      ReadFailurePolicy::Report => sinks.report(error, cancel).await.map(|_| ()),
    }
  }

  fn advance(&mut self, step: Result<()>, next: ConnectionState) -> Result<()> {
    match step {
      Ok(()) => self.transition(next),
      Err(e) => {
        error!("Stream {} failed while {}: {}", self.subscription.asset(), self.state, e);
        self.transition(ConnectionState::Faulted)?;
        Err(e)
      }
    }
  }

  fn transition(&mut self, next: ConnectionState) -> Result<()> {
    if !self.state.can_transition(next) {
      return Err(self.invalid(next));
    }
    self.state = next;
    Ok(())
  }

  fn invalid(&self, next: ConnectionState) -> Error {
    Error::InvalidState { from: self.state.to_string(), to: next.to_string() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use polygon_core::test_utils::{array_frame, stock_aggregate_json};
  use polygon_core::types::AssetClass;
  use polygon_models::stream::EventType;
  use std::collections::VecDeque;
  use std::sync::{Arc, Mutex};

  #[derive(Default)]
  struct ScriptedSocket {
    frames: VecDeque<Result<Vec<u8>>>,
    sent: Arc<Mutex<Vec<String>>>,
    url: Arc<Mutex<Option<String>>>,
    closes: Arc<Mutex<u32>>,
    fail_connect: bool,
  }

  #[async_trait]
  impl FrameSocket for ScriptedSocket {
    async fn connect(&mut self, url: &str) -> Result<()> {
      if self.fail_connect {
        return Err(Error::WebSocket("connection refused".into()));
      }
      *self.url.lock().unwrap() = Some(url.to_string());
      Ok(())
    }

    async fn send_text(&mut self, text: String) -> Result<()> {
      self.sent.lock().unwrap().push(text);
      Ok(())
    }

    async fn receive(&mut self) -> Result<Vec<u8>> {
      match self.frames.pop_front() {
        Some(frame) => frame,
        None => std::future::pending().await,
      }
    }

    async fn close(&mut self) -> Result<()> {
      *self.closes.lock().unwrap() += 1;
      Ok(())
    }
  }

  fn stocks() -> Subscription {
    Subscription::for_symbols(AssetClass::Stocks, EventType::StockMinute, &["AAPL", "NVDA"]).unwrap()
  }

  #[test]
  fn test_transitions_forward_only() {
    use ConnectionState::*;
    assert!(Disconnected.can_transition(Connecting));
    assert!(Authenticated.can_transition(Faulted));
    assert!(Subscribed.can_transition(Closed));
    assert!(!Subscribed.can_transition(Connecting));
    assert!(!Closed.can_transition(Subscribed));
    assert!(!Disconnected.can_transition(Subscribed));
    assert!(Faulted.is_terminal());
  }

  #[tokio::test]
  async fn test_open_sends_handshake() {
    let socket = ScriptedSocket::default();
    let sent = socket.sent.clone();
    let url = socket.url.clone();

    let mut connection = Connection::new(socket, stocks());
    connection.open("wss://socket.example", "secret").await.unwrap();

    assert_eq!(connection.state(), ConnectionState::Subscribed);
    assert_eq!(url.lock().unwrap().as_deref(), Some("wss://socket.example/stocks"));
    assert_eq!(
      *sent.lock().unwrap(),
      vec![
        r#"{"action":"auth","params":"secret"}"#.to_string(),
        r#"{"action":"subscribe","params":"AM.AAPL,AM.NVDA"}"#.to_string(),
      ]
    );
  }

  #[tokio::test]
  async fn test_connect_failure_faults() {
    let socket = ScriptedSocket { fail_connect: true, ..Default::default() };
    let sent = socket.sent.clone();

    let mut connection = Connection::new(socket, stocks());
    let err = connection.open("wss://socket.example", "secret").await.unwrap_err();

    assert!(matches!(err, Error::WebSocket(_)));
    assert_eq!(connection.state(), ConnectionState::Faulted);
    assert!(sent.lock().unwrap().is_empty());

    let (sinks, _events, _errors) = EventSinks::bounded(1);
    let err = connection.run(&sinks, &CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, Error::InvalidState { .. }));
  }

  #[tokio::test]
  async fn test_read_failure_policies() {
    let frame = array_frame(&[stock_aggregate_json("AM", "AAPL", 1.5, 0)]);

    let socket = ScriptedSocket {
      frames: VecDeque::from([Ok(frame.clone().into_bytes()), Err(Error::ConnectionClosed)]),
      ..Default::default()
    };
    let closes = socket.closes.clone();
    let mut connection = Connection::new(socket, stocks());
    connection.open("wss://socket.example", "k").await.unwrap();
    let (sinks, mut events, _errors) = EventSinks::bounded(4);
    let err = connection.run(&sinks, &CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, Error::ConnectionClosed));
    assert_eq!(connection.state(), ConnectionState::Closed);
    assert_eq!(*closes.lock().unwrap(), 1);
    assert_eq!(events.recv().await.unwrap().symbol(), "AAPL");

    let socket = ScriptedSocket {
      frames: VecDeque::from([Ok(frame.into_bytes()), Err(Error::ConnectionClosed)]),
      ..Default::default()
    };
    let mut connection = Connection::new(socket, stocks()).with_read_failure_policy(ReadFailurePolicy::Report);
    connection.open("wss://socket.example", "k").await.unwrap();
    let (sinks, _events, mut errors) = EventSinks::bounded(4);
    connection.run(&sinks, &CancellationToken::new()).await.unwrap();
    assert!(matches!(errors.recv().await, Some(Error::ConnectionClosed)));
  }

  #[tokio::test]
  async fn test_dropped_receiver_closes_socket() {
    let frame = array_frame(&[stock_aggregate_json("AM", "AAPL", 1.5, 0)]);
    let socket = ScriptedSocket { frames: VecDeque::from([Ok(frame.into_bytes())]), ..Default::default() };
    let closes = socket.closes.clone();

    let mut connection = Connection::new(socket, stocks());
    connection.open("wss://socket.example", "k").await.unwrap();
    let (sinks, events, _errors) = EventSinks::bounded(4);
    drop(events);

    let err = connection.run(&sinks, &CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, Error::ChannelClosed));
    assert_eq!(connection.state(), ConnectionState::Closed);
    assert_eq!(*closes.lock().unwrap(), 1);
  }

  #[tokio::test]
  async fn test_cancel_idle_stream() {
    let socket = ScriptedSocket::default();
    let closes = socket.closes.clone();
    let mut connection = Connection::new(socket, stocks());
    connection.open("wss://socket.example", "k").await.unwrap();

    let (sinks, _events, _errors) = EventSinks::bounded(1);
    let cancel = CancellationToken::new();
    cancel.cancel();

    connection.run(&sinks, &cancel).await.unwrap();
    assert_eq!(connection.state(), ConnectionState::Closed);
    assert_eq!(*closes.lock().unwrap(), 1);
  }
}
