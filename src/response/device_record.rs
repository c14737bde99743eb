// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device record parsing.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, DeviceId};

/// One remote light's reported configuration.
///
/// Records are never edited locally; each successful poll replaces the whole
/// set. Fields the API adds beyond the ones below are ignored.
///
/// # Examples
///
/// ```
/// use gifkid::response::DeviceRecord;
///
/// let json = r#"{"device_id": "tile-1", "name": "Desk", "is_enabled": true, "brightness": 0.6}"#;
/// let record: DeviceRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.device_id().as_str(), "tile-1");
/// assert!(record.is_enabled());
/// assert_eq!(record.brightness().unwrap().value(), 153);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    device_id: DeviceId,
    name: String,
    is_enabled: bool,
    /// Fraction in [0.0, 1.0]; `null` when the device never reported one.
    #[serde(default)]
    brightness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    polling_seconds: Option<u32>,
}

impl DeviceRecord {
    /// Creates a record. Mostly useful for tests and fakes.
    #[must_use]
    pub fn new(
        device_id: impl Into<DeviceId>,
        name: impl Into<String>,
        is_enabled: bool,
        brightness: Option<f64>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            name: name.into(),
            is_enabled,
            brightness,
            tile_id: None,
            polling_seconds: None,
        }
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the device is switched on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Returns the raw brightness fraction as reported by the API.
    #[must_use]
    pub fn brightness_fraction(&self) -> Option<f64> {
        self.brightness
    }

    /// Returns the brightness on the 0-255 scale.
    ///
    /// Fractions outside [0.0, 1.0] are clamped.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness.map(Brightness::from_fraction)
    }

    /// Returns the tile the device is showing, if reported.
    #[must_use]
    pub fn tile_id(&self) -> Option<&str> {
        self.tile_id.as_deref()
    }

    /// Returns how often the device polls the API, if reported.
    #[must_use]
    pub fn polling_seconds(&self) -> Option<u32> {
        self.polling_seconds
    }
}
