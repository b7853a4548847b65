// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted in-memory device for session tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use knv_heatpump::ProtocolError;
use knv_heatpump::event::SessionEvent;
use knv_heatpump::protocol::{Connector, Transport, decode_frame};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::{broadcast, mpsc};

/// Preamble frame every connection starts with.
pub const PREAMBLE_FRAME: &str = "#serial?120623100000028\n";

enum Link {
    Accept(MockTransport),
    Refuse(String),
}

/// Test side of the mock: decides how each connection attempt ends.
pub struct MockDevice {
    links: mpsc::UnboundedSender<Link>,
    attempts: Arc<AtomicUsize>,
}

/// Connector handed to the session under test.
///
/// Each `connect` takes the next queued link and waits if none is queued.
pub struct MockConnector {
    links: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<Link>>>,
    attempts: Arc<AtomicUsize>,
}

impl MockDevice {
    pub fn new() -> (Self, MockConnector) {
        let (tx, rx) = mpsc::unbounded_channel();
        let attempts = Arc::new(AtomicUsize::new(0));
        (
            Self {
                links: tx,
                attempts: Arc::clone(&attempts),
            },
            MockConnector {
                links: Arc::new(tokio::sync::Mutex::new(rx)),
                attempts,
            },
        )
    }

    /// Queues a connection that succeeds.
    pub fn accept(&self) -> DeviceSide {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let transport = MockTransport {
            inbound: inbound_rx,
            sent: Arc::clone(&sent),
            closed: Arc::clone(&closed),
        };
        let _ = self.links.send(Link::Accept(transport));

        DeviceSide {
            inbound: Some(inbound_tx),
            sent,
            closed,
        }
    }

    /// Queues a connection attempt that fails.
    pub fn refuse(&self, reason: &str) {
        let _ = self.links.send(Link::Refuse(reason.to_string()));
    }

    /// Number of connection attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Connector for MockConnector {
    type Transport = MockTransport;

    async fn connect(&self, _host: &str, _port: u16) -> Result<MockTransport, ProtocolError> {
        let mut links = self.links.lock().await;
        let link = links.recv().await;
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match link {
            Some(Link::Accept(transport)) => Ok(transport),
            Some(Link::Refuse(reason)) => Err(ProtocolError::ConnectionFailed(reason)),
            None => Err(ProtocolError::ConnectionFailed("device gone".to_string())),
        }
    }
}

/// Client end of one mock connection.
pub struct MockTransport {
    inbound: mpsc::UnboundedReceiver<String>,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl Transport for MockTransport {
    async fn send(&mut self, frame: &str) -> Result<(), ProtocolError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ProtocolError::ConnectionClosed);
        }
        self.sent.lock().push(frame.to_string());
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<String>, ProtocolError> {
        Ok(self.inbound.recv().await)
    }

    async fn close(&mut self) -> Result<(), ProtocolError> {
        self.closed.store(true, Ordering::SeqCst);
        self.inbound.close();
        Ok(())
    }
}

/// Device end of one mock connection.
pub struct DeviceSide {
    inbound: Option<mpsc::UnboundedSender<String>>,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl DeviceSide {
    /// Pushes a raw frame to the client.
    pub fn push_raw(&self, frame: &str) {
        if let Some(inbound) = &self.inbound {
            let _ = inbound.send(frame.to_string());
        }
    }

    /// Pushes a JSON message, framed.
    pub fn push(&self, message: Value) {
        self.push_raw(&format!("#{message}\n"));
    }

    pub fn login_ok(&self) {
        self.push(json!({"command": "login", "userId": "1"}));
    }

    pub fn login_rejected(&self) {
        self.push(json!({"command": "login"}));
    }

    pub fn functions(&self, functions: &[(u32, u32, u32)]) {
        let list: Vec<Value> = functions
            .iter()
            .map(|(unit, group, function)| {
                json!({"unitId": unit, "functiongroupId": group, "functionId": function})
            })
            .collect();
        self.push(json!({"command": "getListFunctions", "result": {"listfunctions": list}}));
    }

    pub fn info(&self, path: &str, name: &str) {
        self.push(json!({
            "command": "HLInfo",
            "path": path,
            "name": name,
            "unit": "%C2%B0C",
            "writeable": true,
            "min": 0,
            "max": 100,
            "step": 1
        }));
    }

    pub fn value(&self, path: &str, result: &str) {
        self.push(json!({"command": "HLVal", "values": [{"path": path, "result": result}]}));
    }

    /// Ends the stream as seen by the client.
    pub fn disconnect(&mut self) {
        self.inbound = None;
    }

    /// Every frame the client wrote, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    /// Decoded JSON commands the client wrote, skipping the preamble.
    pub fn commands(&self) -> Vec<Value> {
        self.sent()
            .iter()
            .filter_map(|frame| decode_frame(frame).ok())
            .collect()
    }

    /// Names of the commands the client wrote, in order.
    pub fn command_names(&self) -> Vec<String> {
        self.commands()
            .iter()
            .filter_map(|command| command["command"].as_str().map(str::to_string))
            .collect()
    }

    /// Points the client requested hotlinks for, in order.
    pub fn hotlinks(&self) -> Vec<String> {
        self.commands()
            .iter()
            .filter(|command| command["command"] == "addHotlink")
            .filter_map(|command| command["parameter"]["dap"].as_str().map(str::to_string))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Waits for the first event matching `matches`, failing after a minute of
/// (virtual) time.
pub async fn wait_for_event(
    events: &mut broadcast::Receiver<SessionEvent>,
    matches: impl Fn(&SessionEvent) -> bool,
) -> SessionEvent {
    let found = tokio::time::timeout(Duration::from_secs(60), async {
        loop {
            match events.recv().await {
                Ok(event) if matches(&event) => return event,
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => panic!("event bus closed"),
            }
        }
    })
    .await;
    found.expect("timed out waiting for event")
}

/// Drains the events received so far.
pub fn drain_events(events: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut drained = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => drained.push(event),
            Err(broadcast::error::TryRecvError::Lagged(_)) => {}
            Err(_) => return drained,
        }
    }
}
