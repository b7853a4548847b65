// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire frame codec.
//!
//! Every message in both directions is an ASCII `#`, a JSON object and a
//! trailing `\n`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;

/// Leading frame delimiter.
pub const FRAME_START: char = '#';

/// Trailing frame delimiter.
pub const FRAME_END: char = '\n';

/// Wraps an already serialized body in frame delimiters.
#[must_use]
pub fn wrap(body: &str) -> String {
    let mut frame = String::with_capacity(body.len() + 2);
    frame.push(FRAME_START);
    frame.push_str(body);
    frame.push(FRAME_END);
    frame
}

/// Serializes a value into a frame.
///
/// # Errors
///
/// Returns [`ParseError::Json`] if the value cannot be serialized.
///
/// # Examples
///
/// ```
/// use knv_heatpump::protocol::{decode_frame, encode_frame};
/// use serde_json::json;
///
/// let frame = encode_frame(&json!({"command": "printHotlinks"})).unwrap();
/// assert_eq!(frame, "#{\"command\":\"printHotlinks\"}\n");
/// assert_eq!(decode_frame(&frame).unwrap(), json!({"command": "printHotlinks"}));
/// ```
pub fn encode_frame<T: Serialize + ?Sized>(value: &T) -> Result<String, ParseError> {
    Ok(wrap(&serde_json::to_string(value)?))
}

/// Strips the frame delimiters and returns the body.
///
/// # Errors
///
/// Returns [`ParseError::Frame`] if either delimiter is missing.
pub fn unwrap(frame: &str) -> Result<&str, ParseError> {
    frame
        .strip_prefix(FRAME_START)
        .and_then(|rest| rest.strip_suffix(FRAME_END))
        .ok_or_else(|| ParseError::Frame(truncate(frame)))
}

/// Decodes a frame into a JSON value.
///
/// # Errors
///
/// Returns [`ParseError::Frame`] for missing delimiters and
/// [`ParseError::Json`] for an invalid body.
pub fn decode_frame(frame: &str) -> Result<Value, ParseError> {
    decode_frame_as(frame)
}

/// Decodes a frame into a typed value.
///
/// # Errors
///
/// Returns [`ParseError::Frame`] for missing delimiters and
/// [`ParseError::Json`] if the body does not match `T`.
pub fn decode_frame_as<T: DeserializeOwned>(frame: &str) -> Result<T, ParseError> {
    Ok(serde_json::from_str(unwrap(frame)?)?)
}

/// Shortens a frame for error messages.
fn truncate(frame: &str) -> String {
    const MAX_CHARS: usize = 64;

    if frame.chars().count() <= MAX_CHARS {
        return frame.escape_debug().to_string();
    }
    let head: String = frame.chars().take(MAX_CHARS).collect();
    format!("{}...", head.escape_debug())
}
