// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login response parsing.

use serde::Deserialize;
use serde_json::Value;

/// Answer to the `login` command.
///
/// The device reports a successful login by including the `userId` it
/// assigned to the connection.
///
/// # Examples
///
/// ```
/// use knv_heatpump::response::LoginResponse;
///
/// let ok: LoginResponse = serde_json::from_str(r#"{"command":"login","userId":"7"}"#).unwrap();
/// assert!(ok.is_success());
///
/// let rejected: LoginResponse = serde_json::from_str(r#"{"command":"login"}"#).unwrap();
/// assert!(!rejected.is_success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LoginResponse {
    /// Identifier assigned by the device.
    #[serde(rename = "userId", default, deserialize_with = "user_id")]
    pub user_id: Option<String>,
}

impl LoginResponse {
    /// Returns `true` if the device accepted the credentials.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.user_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

// The id is a string on some firmware and a number on others.
fn user_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}
