// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `gifkid` - A Rust adapter for GifKid LED tiles.
//!
//! This library polls the GifKid cloud API for device configurations and
//! exposes each device as a dimmable light. Writes are sent back to the API
//! as partial updates.
//!
//! # Components
//!
//! - **Directory client** ([`protocol::DirectoryClient`]): authenticated GET
//!   of `/device-configurations` and PATCH of a single device
//! - **Poll coordinator** ([`Coordinator`]): refreshes the directory every
//!   30 seconds with a 10 second bound per attempt, caches the last good
//!   snapshot and joins concurrent refresh requests into one fetch
//! - **Lights** ([`Light`]): on/off and 0-255 brightness per device, always
//!   read from the coordinator's current snapshot
//!
//! # Quick Start
//!
//! ```no_run
//! use gifkid::{ConfigEntry, Integration};
//! use gifkid::types::Brightness;
//!
//! #[tokio::main]
//! async fn main() -> gifkid::Result<()> {
//!     let entry = ConfigEntry::new("my-client-id");
//!
//!     // Fails outright if the first fetch fails
//!     let integration = Integration::setup(&entry).await?;
//!
//!     for light in integration.lights() {
//!         println!("{}: on={} brightness={:?}", light.name(), light.is_on(), light.brightness());
//!     }
//!
//!     if let Some(light) = integration.lights().first() {
//!         light.turn_on(Some(Brightness::new(128))).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Validating Configuration
//!
//! ```no_run
//! use gifkid::config_flow::{UserInput, validate_input};
//!
//! # async fn example() {
//! match validate_input(UserInput::new("my-client-id")).await {
//!     Ok(entry) => println!("ok: {entry:?}"),
//!     Err(err) => eprintln!("{}", err.key()), // "cannot_connect" or "unknown"
//! }
//! # }
//! ```

pub mod command;
pub mod config_flow;
pub mod coordinator;
pub mod error;
mod light;
pub mod protocol;
pub mod response;
mod setup;
pub mod types;

pub use command::DevicePatch;
pub use config_flow::{ConfigEntry, UserInput, validate_input};
pub use coordinator::{Coordinator, CoordinatorState, DirectorySnapshot, PollHandle};
pub use error::{Error, ParseError, ProtocolError, Result, UpdateFailed, ValidationError};
pub use light::{ColorMode, Light, LightAttributes, LightState};
pub use protocol::{ApiConfig, DirectoryApi, DirectoryClient};
pub use response::{DeviceRecord, DirectoryResponse};
pub use setup::Integration;
pub use types::{Brightness, DeviceId};
