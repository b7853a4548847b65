// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login command.

use std::fmt;

use serde_json::{Value, json};

use super::Command;

/// Authenticates the connection with a username and password.
///
/// The password is never shown by `Debug`.
///
/// # Examples
///
/// ```
/// use knv_heatpump::command::{Command, LoginCommand};
///
/// let cmd = LoginCommand::new("admin", "secret");
/// assert_eq!(cmd.name(), "login");
/// assert!(!format!("{cmd:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCommand {
    username: String,
    password: String,
}

impl LoginCommand {
    /// Creates a new login command.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Command for LoginCommand {
    fn name(&self) -> &str {
        "login"
    }

    fn parameter(&self) -> Option<Value> {
        Some(json!({
            "username": self.username,
            "password": self.password,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode_frame;

    #[test]
    fn login_frame() {
        let frame = LoginCommand::new("user", "pass").to_frame();
        assert_eq!(
            decode_frame(&frame).unwrap(),
            json!({"command": "login", "parameter": {"username": "user", "password": "pass"}})
        );
    }

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", LoginCommand::new("user", "hunter2"));
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }
}
