// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session configuration.

use std::fmt;
use std::time::Duration;

use crate::error::Error;
use crate::subscription::NotifyMode;

/// Port the controller listens on.
pub const DEFAULT_PORT: u16 = 3118;

/// Identification frame sent before the login.
pub const DEFAULT_PREAMBLE: &str = "serial?120623100000028";

/// Silence after which a one-shot fetch considers the device drained.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Time the device has to answer the login.
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings of a session.
///
/// Built through [`SessionBuilder`](super::SessionBuilder). The password is
/// never shown by `Debug`.
#[derive(Clone)]
pub struct SessionConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) preamble: String,
    pub(crate) notify_mode: NotifyMode,
    pub(crate) reconnection: ReconnectionPolicy,
    pub(crate) quiet_period: Duration,
    pub(crate) login_timeout: Duration,
}

impl SessionConfig {
    /// Creates a configuration with default settings and no credentials.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            preamble: DEFAULT_PREAMBLE.to_string(),
            notify_mode: NotifyMode::default(),
            reconnection: ReconnectionPolicy::default(),
            quiet_period: DEFAULT_QUIET_PERIOD,
            login_timeout: DEFAULT_LOGIN_TIMEOUT,
        }
    }

    /// Returns the device host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the device port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the login user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Returns the identification preamble.
    #[must_use]
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Returns what the update callback receives.
    #[must_use]
    pub fn notify_mode(&self) -> NotifyMode {
        self.notify_mode
    }

    /// Returns the reconnection policy.
    #[must_use]
    pub fn reconnection(&self) -> &ReconnectionPolicy {
        &self.reconnection
    }

    /// Returns the silence that ends a one-shot fetch.
    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Returns the time the device has to answer the login.
    #[must_use]
    pub fn login_timeout(&self) -> Duration {
        self.login_timeout
    }

    /// Checks that the configuration can open a session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the host or the user name
    /// is empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfiguration("host is empty".to_string()));
        }
        if self.username.is_empty() {
            return Err(Error::InvalidConfiguration(
                "credentials are required".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("preamble", &self.preamble)
            .field("notify_mode", &self.notify_mode)
            .field("reconnection", &self.reconnection)
            .field("quiet_period", &self.quiet_period)
            .field("login_timeout", &self.login_timeout)
            .finish()
    }
}

/// Configuration for automatic reconnection.
///
/// The default retries forever with a fixed 5 second delay.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use knv_heatpump::session::ReconnectionPolicy;
///
/// // Fixed 5 s delay, retry forever
/// let policy = ReconnectionPolicy::default();
/// assert_eq!(policy.delay_for_attempt(7), Duration::from_secs(5));
///
/// // Give up after three retries, doubling the delay
/// let policy = ReconnectionPolicy::new()
///     .with_max_retries(3)
///     .with_initial_delay(Duration::from_millis(500))
///     .with_backoff_multiplier(2.0);
/// assert!(!policy.should_retry(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectionPolicy {
    /// Whether automatic reconnection is enabled.
    pub enabled: bool,
    /// Maximum number of retries before giving up (None = infinite).
    pub max_retries: Option<u32>,
    /// Initial delay between retry attempts.
    pub initial_delay: Duration,
    /// Maximum delay between retry attempts (for exponential backoff).
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f32,
}

impl ReconnectionPolicy {
    /// Creates a new reconnection policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy that never reconnects.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets infinite retries.
    #[must_use]
    pub fn with_infinite_retries(mut self) -> Self {
        self.max_retries = None;
        self
    }

    /// Sets the initial delay between retry attempts.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retry attempts.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff multiplier.
    #[must_use]
    pub fn with_backoff_multiplier(mut self, multiplier: f32) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculates the delay before retry number `attempt` (starting at 0).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return self.initial_delay.min(self.max_delay);
        }

        let multiplier = self
            .backoff_multiplier
            .powi(i32::try_from(attempt).unwrap_or(i32::MAX));

        #[allow(clippy::cast_precision_loss)]
        let delay_ms = self.initial_delay.as_millis() as f32 * multiplier;

        // Saturating float to int cast; negative multipliers clamp to zero.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delay = Duration::from_millis(delay_ms as u64);

        delay.min(self.max_delay)
    }

    /// Returns true if retry number `attempt` (starting at 0) may be made.
    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> bool {
        self.enabled && self.max_retries.is_none_or(|max| attempt < max)
    }
}

impl Default for ReconnectionPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: None,
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = SessionConfig::new("192.168.1.20");
        assert_eq!(config.port(), 3118);
        assert_eq!(config.preamble(), "serial?120623100000028");
        assert_eq!(config.notify_mode(), NotifyMode::Point);
        assert_eq!(config.quiet_period(), Duration::from_millis(500));
        assert_eq!(config.reconnection(), &ReconnectionPolicy::default());
    }

    #[test]
    fn validate_requires_host_and_user() {
        let mut config = SessionConfig::new(" ");
        config.username = "admin".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));

        let config = SessionConfig::new("heatpump.local");
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn debug_redacts_password() {
        let mut config = SessionConfig::new("heatpump.local");
        config.username = "admin".to_string();
        config.password = "s3cret".to_string();

        let debug = format!("{config:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn default_policy_is_fixed_and_infinite() {
        let policy = ReconnectionPolicy::default();
        assert!(policy.enabled);
        assert_eq!(policy.max_retries, None);
        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(5));
        assert_eq!(policy.delay_for_attempt(50), Duration::from_secs(5));
        assert!(policy.should_retry(u32::MAX - 1));
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let policy = ReconnectionPolicy::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_backoff_multiplier(2.0)
            .with_max_delay(Duration::from_secs(10));

        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(8));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(10));
    }

    #[test]
    fn limited_and_disabled_policies() {
        let limited = ReconnectionPolicy::new().with_max_retries(2);
        assert!(limited.should_retry(0));
        assert!(limited.should_retry(1));
        assert!(!limited.should_retry(2));

        assert!(!ReconnectionPolicy::disabled().should_retry(0));
    }
}
