// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-shot read of the whole point catalog.

use tokio::time::{Instant, timeout};

use crate::error::{Error, ProtocolError, Result};
use crate::protocol::{Connector, Transport};
use crate::state::Point;

use super::SessionState;
use super::engine::Engine;

/// Connects, bootstraps, and dispatches until the device goes quiet.
pub(super) async fn run<C: Connector>(connector: C, mut engine: Engine) -> Result<Vec<Point>> {
    engine.set_state(SessionState::Connecting);
    let host = engine.config().host().to_string();
    let port = engine.config().port();

    let mut transport = connector.connect(&host, port).await?;
    tracing::info!(%host, port, "Connected");

    let result = drain(&mut engine, &mut transport).await;

    if let Err(e) = transport.close().await {
        tracing::debug!(error = %e, "Close handshake failed");
    }
    engine.set_state(SessionState::Closed);

    result?;
    tracing::info!(points = engine.points().len(), "Fetch complete");
    Ok(engine.points().snapshot())
}

async fn drain<T: Transport>(engine: &mut Engine, transport: &mut T) -> Result<()> {
    engine.bootstrap(transport).await?;

    let login_timeout = engine.config().login_timeout();
    let quiet_period = engine.config().quiet_period();
    let login_deadline = Instant::now() + login_timeout;

    loop {
        let wait = if engine.is_logged_in() {
            quiet_period
        } else {
            login_deadline.saturating_duration_since(Instant::now())
        };

        match timeout(wait, transport.receive()).await {
            Ok(Ok(Some(frame))) => engine.dispatch(&frame, transport).await?,
            Ok(Ok(None)) if engine.is_logged_in() => {
                tracing::debug!("Device ended the stream");
                return Ok(());
            }
            Ok(Ok(None)) => return Err(ProtocolError::ConnectionClosed.into()),
            Ok(Err(e)) => return Err(e.into()),
            Err(_) if engine.is_logged_in() => {
                tracing::debug!(
                    quiet_ms = u64::try_from(quiet_period.as_millis()).unwrap_or(u64::MAX),
                    "Device went quiet"
                );
                return Ok(());
            }
            Err(_) => {
                return Err(Error::Protocol(ProtocolError::Timeout(
                    u64::try_from(login_timeout.as_millis()).unwrap_or(u64::MAX),
                )));
            }
        }
    }
}
