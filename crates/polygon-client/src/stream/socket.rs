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
//! Duplex frame transport used by stream connections

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use polygon_core::{Error, Result};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Minimal socket capability a [`Connection`](super::Connection) needs.
///
/// `receive` yields one data frame per call; transport control frames
/// (ping/pong) are handled inside the implementation. A peer close is
/// reported as [`Error::ConnectionClosed`].
#[async_trait]
pub trait FrameSocket: Send {
  /// Open the connection
  async fn connect(&mut self, url: &str) -> Result<()>;

  /// Send one text frame
  async fn send_text(&mut self, text: String) -> Result<()>;

  /// Read the next data frame
  async fn receive(&mut self) -> Result<Vec<u8>>;

  /// Close the connection
  async fn close(&mut self) -> Result<()> {
    Ok(())
  }
}

/// [`FrameSocket`] over `tokio-tungstenite`
#[derive(Default)]
pub struct TungsteniteSocket {
  write: Option<SplitSink<WsStream, Message>>,
  read: Option<SplitStream<WsStream>>,
}

impl TungsteniteSocket {
  pub fn new() -> Self {
    Self::default()
  }

  fn writer(&mut self) -> Result<&mut SplitSink<WsStream, Message>> {
    self.write.as_mut().ok_or_else(|| Error::WebSocket("socket is not connected".to_string()))
  }
}

fn ws_error(e: impl std::fmt::Display) -> Error {
  Error::WebSocket(e.to_string())
}

#[async_trait]
impl FrameSocket for TungsteniteSocket {
  async fn connect(&mut self, url: &str) -> Result<()> {
    let (ws_stream, response) = connect_async(url).await.map_err(ws_error)?;
    debug!("Websocket handshake complete: {}", response.status());

    let (write, read) = ws_stream.split();
    self.write = Some(write);
    self.read = Some(read);
    Ok(())
  }

  async fn send_text(&mut self, text: String) -> Result<()> {
    self.writer()?.send(Message::Text(text.into())).await.map_err(ws_error)
  }

  async fn receive(&mut self) -> Result<Vec<u8>> {
    loop {
      let read = self.read.as_mut().ok_or_else(|| Error::WebSocket("socket is not connected".to_string()))?;
      let message = match read.next().await {
        Some(message) => message.map_err(ws_error)?,
        None => return Err(Error::ConnectionClosed),
      };

      match message {
        Message::Text(text) => return Ok(text.as_bytes().to_vec()),
        Message::Binary(data) => return Ok(data.to_vec()),
        Message::Ping(payload) => {
          let write = self.writer()?;
          write.send(Message::Pong(payload)).await.map_err(ws_error)?;
          write.flush().await.map_err(ws_error)?;
        }
        Message::Close(frame) => {
          debug!("Peer closed websocket: {:?}", frame);
          return Err(Error::ConnectionClosed);
        }
        Message::Pong(_) | Message::Frame(_) => {}
      }
    }
  }

  async fn close(&mut self) -> Result<()> {
    match self.write.as_mut() {
      Some(write) => write.close().await.map_err(ws_error),
      None => Ok(()),
    }
  }
}
