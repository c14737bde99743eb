// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device light adapter.
//!
//! A [`Light`] keeps only its device identifier. Every read goes to the
//! coordinator's current snapshot, and every write is a PATCH followed by an
//! out-of-band refresh, so the displayed state changes only once the API
//! reports it back.

use std::fmt;

use crate::command::DevicePatch;
use crate::coordinator::Coordinator;
use crate::error::Result;
use crate::protocol::{DirectoryApi, DirectoryClient};
use crate::response::DeviceRecord;
use crate::types::{Brightness, DeviceId};

/// Color modes a light can operate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Dimmable, no color control.
    Brightness,
}

/// Point-in-time view of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    /// Whether the light is on. `false` when the device is unknown.
    pub is_on: bool,
    /// Brightness, when the device reported one.
    pub brightness: Option<Brightness>,
    /// Whether the last refresh succeeded and listed this device.
    pub available: bool,
}

/// Extra attributes reported by the API for a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightAttributes {
    /// The device identifier.
    pub device_id: DeviceId,
    /// Tile currently shown by the device.
    pub tile_id: Option<String>,
    /// How often the device polls the API.
    pub polling_seconds: Option<u32>,
}

/// A GifKid device exposed as a dimmable light.
///
/// # Examples
///
/// ```no_run
/// use gifkid::Integration;
/// use gifkid::config_flow::ConfigEntry;
/// use gifkid::types::Brightness;
///
/// # async fn example() -> gifkid::Result<()> {
/// let integration = Integration::setup(&ConfigEntry::new("my-client")).await?;
/// for light in integration.lights() {
///     if !light.is_on() {
///         light.turn_on(Some(Brightness::new(128))).await?;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Light<A: DirectoryApi = DirectoryClient> {
    device_id: DeviceId,
    name: String,
    coordinator: Coordinator<A>,
}

impl<A: DirectoryApi> Light<A> {
    /// Creates a light for a record from the coordinator's snapshot.
    #[must_use]
    pub fn new(coordinator: Coordinator<A>, record: &DeviceRecord) -> Self {
        Self {
            device_id: record.device_id().clone(),
            name: record.name().to_string(),
            coordinator,
        }
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// Returns the unique identifier of this light.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        self.device_id.as_str()
    }

    /// Returns the name the device had when the light was created.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the supported color modes.
    #[must_use]
    pub fn supported_color_modes(&self) -> &'static [ColorMode] {
        &[ColorMode::Brightness]
    }

    /// Returns the active color mode.
    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        ColorMode::Brightness
    }

    fn record(&self) -> Option<DeviceRecord> {
        self.coordinator.device(&self.device_id)
    }

    /// Returns `true` if the device is on; `false` if it is off or missing.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.record().is_some_and(|record| record.is_enabled())
    }

    /// Returns the brightness, or `None` if the device is missing or never
    /// reported one.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.record().and_then(|record| record.brightness())
    }

    /// Returns `true` if the last refresh succeeded and listed this device.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.coordinator.last_update_success() && self.record().is_some()
    }

    /// Returns all displayed values read from one snapshot.
    #[must_use]
    pub fn state(&self) -> LightState {
        let record = self.record();
        LightState {
            is_on: record.as_ref().is_some_and(DeviceRecord::is_enabled),
            brightness: record.as_ref().and_then(DeviceRecord::brightness),
            available: self.coordinator.last_update_success() && record.is_some(),
        }
    }

    /// Returns extra attributes, or `None` if the device is missing.
    #[must_use]
    pub fn attributes(&self) -> Option<LightAttributes> {
        self.record().map(|record| LightAttributes {
            device_id: record.device_id().clone(),
            tile_id: record.tile_id().map(str::to_string),
            polling_seconds: record.polling_seconds(),
        })
    }

    /// Turns the light on.
    ///
    /// Without an explicit brightness the current one is kept, falling back
    /// to full brightness when unknown.
    ///
    /// # Errors
    ///
    /// Returns the API error if the write fails. No refresh is requested in
    /// that case.
    pub async fn turn_on(&self, brightness: Option<Brightness>) -> Result<()> {
        let target = brightness
            .or_else(|| self.brightness())
            .unwrap_or(Brightness::MAX);

        self.update(DevicePatch::turn_on(target)).await
    }

    /// Turns the light off, keeping its brightness.
    ///
    /// # Errors
    ///
    /// Returns the API error if the write fails.
    pub async fn turn_off(&self) -> Result<()> {
        self.update(DevicePatch::turn_off(self.brightness())).await
    }

    async fn update(&self, patch: DevicePatch) -> Result<()> {
        if let Err(err) = self.coordinator.perform_write(&self.device_id, &patch).await {
            tracing::error!(
                device_id = %self.device_id,
                error = %err,
                "Failed to update device"
            );
            return Err(err);
        }

        self.coordinator.request_refresh().await;
        Ok(())
    }
}

impl<A: DirectoryApi> fmt::Debug for Light<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Light")
            .field("device_id", &self.device_id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
