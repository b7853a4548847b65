// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the KNV heat pump library.
//!
//! This module provides the error hierarchy for handling failures across the
//! library: transport communication, frame and payload parsing, and session
//! level outcomes such as a rejected login.

use thiserror::Error;

use crate::types::PointId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during transport communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a frame or payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device rejected the login exchange.
    ///
    /// This is the only error that ends a supervised session on its own.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// No live connection to the device exists right now.
    #[error("session is not connected")]
    NotConnected,

    /// The session task has terminated.
    #[error("session is closed")]
    Closed,

    /// The reconnection policy gave up.
    #[error("reconnection abandoned after {attempts} attempts")]
    ReconnectExhausted {
        /// Number of reconnection attempts that were made.
        attempts: u32,
    },

    /// A value was reported for a point whose metadata is unknown.
    #[error("no metadata known for point {0}")]
    UnknownPoint(PointId),

    /// The session configuration is incomplete or invalid.
    #[error("invalid session configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors related to the transport connection.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// WebSocket connection or communication failed.
    #[cfg(feature = "websocket")]
    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The device closed the connection.
    #[error("connection closed by device")]
    ConnectionClosed,

    /// Waiting on the device timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid host or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The device sent something that is not a text frame.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

#[cfg(feature = "websocket")]
impl From<tokio_tungstenite::tungstenite::Error> for ProtocolError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

/// Errors related to parsing device frames.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The frame is not wrapped in `#` and `\n`.
    #[error("malformed frame: {0}")]
    Frame(String),

    /// Expected field is missing from the message.
    #[error("missing field in message: {0}")]
    MissingField(String),

    /// A point identifier does not have the `unit.group.function.suffix` shape.
    #[error("invalid point id: {0}")]
    InvalidPointId(String),

    /// Unexpected message format.
    #[error("unexpected message format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
