// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for communicating with the heat pump controller.
//!
//! The session only needs a duplex channel of text frames. This module
//! defines that seam and ships the WebSocket implementation the controller
//! speaks.
//!
//! # Components
//!
//! - [`Transport`]: one established connection (send, receive, close)
//! - [`Connector`]: produces a fresh [`Transport`] on every (re)connect
//! - [`WebSocketConnector`]: `ws://<host>:<port>` connections
//! - [`encode_frame`] / [`decode_frame`]: the `#<json>\n` frame codec

mod frame;
#[cfg(feature = "websocket")]
mod websocket;

pub use frame::{
    FRAME_END, FRAME_START, decode_frame, decode_frame_as, encode_frame, unwrap as unwrap_frame,
    wrap as wrap_frame,
};
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnector, WebSocketTransport};

use std::future::Future;

use crate::error::ProtocolError;

/// An established, persistent connection to the device.
///
/// Frames are complete `#<json>\n` strings in both directions.
pub trait Transport: Send {
    /// Sends one complete frame.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the frame could not be written.
    fn send(&mut self, frame: &str) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Receives the next frame.
    ///
    /// Returns `Ok(None)` once the device has ended the stream. The future
    /// must be cancel-safe: dropping it before completion loses no frame.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the connection failed.
    fn receive(&mut self) -> impl Future<Output = Result<Option<String>, ProtocolError>> + Send;

    /// Closes the connection and releases its resources.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the close handshake failed.
    fn close(&mut self) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}

/// Factory for device connections.
///
/// The session calls [`connect`](Connector::connect) once per connection
/// attempt, so every reconnect gets a brand-new [`Transport`].
pub trait Connector: Send + Sync + 'static {
    /// The transport produced by this connector.
    type Transport: Transport + 'static;

    /// Opens a new connection to the device.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached.
    fn connect(
        &self,
        host: &str,
        port: u16,
    ) -> impl Future<Output = Result<Self::Transport, ProtocolError>> + Send;
}
