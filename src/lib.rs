// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `knv_heatpump` - A Rust client for KNV heat pump controllers.
//!
//! The controller speaks line-delimited JSON (`#<json>\n`) over a WebSocket
//! on port 3118. This library logs in, discovers the controller's data
//! points, subscribes to live updates ("hotlinks") and keeps a local mirror
//! of every point's metadata and current value.
//!
//! # Features
//!
//! - **Supervised session**: runs on its own task, reconnects after any
//!   failure and re-subscribes every known point
//! - **Update callbacks**: one call per pushed value, with either the
//!   changed point or the whole catalog
//! - **Writes**: `setVMValue` while the session is live
//! - **One-shot fetch**: read everything once and disconnect
//! - **Events**: state changes, disconnects and dropped updates on an
//!   [`EventBus`](event::EventBus)
//!
//! # Quick Start
//!
//! ## Read every point once
//!
//! ```no_run
//! use knv_heatpump::Session;
//!
//! #[tokio::main]
//! async fn main() -> knv_heatpump::Result<()> {
//!     let points = Session::builder("192.168.1.40")
//!         .credentials("admin", "secret")
//!         .fetch()
//!         .await?;
//!
//!     for point in &points {
//!         let meta = point.metadata();
//!         println!("{} {} = {:?} {}", meta.path, meta.name, point.value(), meta.unit);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Follow live updates
//!
//! ```no_run
//! use knv_heatpump::{Session, SessionState};
//! use knv_heatpump::subscription::Notification;
//!
//! #[tokio::main]
//! async fn main() -> knv_heatpump::Result<()> {
//!     let session = Session::builder("192.168.1.40")
//!         .credentials("admin", "secret")
//!         .on_update(|notification: &Notification| {
//!             if let Notification::Point(point) = notification {
//!                 println!("{} -> {:?}", point.path(), point.value());
//!             }
//!             Ok(())
//!         })
//!         .spawn()?;
//!
//!     session.wait_for_state(SessionState::Live).await?;
//!     session.send("1.110.2.1".parse()?, 45).await?;
//!
//!     session.wait().await
//! }
//! ```
//!
//! # Logging
//!
//! The library logs through [`tracing`]; install a subscriber to see the
//! output. Passwords are never logged.

pub mod catalog;
pub mod command;
pub mod error;
pub mod event;
pub mod protocol;
pub mod response;
pub mod session;
pub mod state;
pub mod subscription;
pub mod types;

pub use catalog::{KnvCatalog, SuffixCatalog};
pub use command::Command;
pub use error::{Error, ParseError, ProtocolError, Result};
pub use session::{ReconnectionPolicy, Session, SessionBuilder, SessionConfig, SessionState};
pub use state::{Point, PointMetadata};
pub use subscription::{CallbackError, Notification, NotifyMode};
pub use types::{PointId, PointValue};
