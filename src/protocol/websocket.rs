// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WebSocket transport for the heat pump controller.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::ProtocolError;
use crate::protocol::{Connector, Transport};

/// Opens plain `ws://` connections to the controller.
///
/// # Examples
///
/// ```no_run
/// use knv_heatpump::protocol::{Connector, Transport, WebSocketConnector};
///
/// # async fn example() -> Result<(), knv_heatpump::ProtocolError> {
/// let mut transport = WebSocketConnector::new().connect("192.168.0.17", 3118).await?;
/// transport.send("#{\"command\":\"printHotlinks\"}\n").await?;
/// let reply = transport.receive().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebSocketConnector {
    connect_timeout: Duration,
}

impl WebSocketConnector {
    /// Creates a connector with the default connect timeout (10 seconds).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout for establishing a connection.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Returns the connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl Default for WebSocketConnector {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl Connector for WebSocketConnector {
    type Transport = WebSocketTransport;

    async fn connect(&self, host: &str, port: u16) -> Result<WebSocketTransport, ProtocolError> {
        if host.is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "device host is required".to_string(),
            ));
        }

        let url = format!("ws://{host}:{port}");
        tracing::debug!(url = %url, "Opening WebSocket connection");

        let timeout_ms = u64::try_from(self.connect_timeout.as_millis()).unwrap_or(u64::MAX);

        let (stream, _response) =
            tokio::time::timeout(self.connect_timeout, tokio_tungstenite::connect_async(url))
                .await
                .map_err(|_| ProtocolError::Timeout(timeout_ms))??;

        tracing::info!(host = %host, port, "Connected to heat pump");
        Ok(WebSocketTransport { stream })
    }
}

/// An open WebSocket connection to the controller.
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl std::fmt::Debug for WebSocketTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketTransport").finish_non_exhaustive()
    }
}

impl Transport for WebSocketTransport {
    async fn send(&mut self, frame: &str) -> Result<(), ProtocolError> {
        self.stream
            .send(Message::Text(frame.to_owned()))
            .await
            .map_err(ProtocolError::from)
    }

    async fn receive(&mut self) -> Result<Option<String>, ProtocolError> {
        loop {
            let Some(message) = self.stream.next().await else {
                return Ok(None);
            };

            match message {
                Ok(Message::Text(text)) => return Ok(Some(text)),
                Ok(Message::Binary(bytes)) => {
                    return String::from_utf8(bytes)
                        .map(Some)
                        .map_err(|e| ProtocolError::InvalidFrame(e.to_string()));
                }
                Ok(Message::Close(frame)) => {
                    tracing::debug!(?frame, "Device sent close frame");
                    return Ok(None);
                }
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn close(&mut self) -> Result<(), ProtocolError> {
        match self.stream.close(None).await {
            Ok(()) | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
