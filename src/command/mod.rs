// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Write requests sent to the GifKid API.
//!
//! A write is a partial update of one device configuration, sent as
//! `PATCH /device-configurations/{device_id}` with a [`DevicePatch`] body.
//!
//! # Examples
//!
//! ```
//! use gifkid::command::DevicePatch;
//! use gifkid::types::Brightness;
//!
//! let patch = DevicePatch::turn_on(Brightness::new(153));
//! assert!(patch.is_enabled());
//! assert!((patch.brightness() - 0.6).abs() < 1e-9);
//!
//! let json = serde_json::to_value(&patch).unwrap();
//! assert_eq!(json["is_enabled"], true);
//! ```

use serde::Serialize;

use crate::types::Brightness;

/// Brightness fraction sent when turning off a light whose brightness is
/// unknown.
pub const FALLBACK_OFF_FRACTION: f64 = 0.5;

/// Body of a partial device update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DevicePatch {
    is_enabled: bool,
    brightness: f64,
}

impl DevicePatch {
    /// Switches the device on at the given brightness.
    #[must_use]
    pub fn turn_on(brightness: Brightness) -> Self {
        Self {
            is_enabled: true,
            brightness: brightness.as_fraction(),
        }
    }

    /// Switches the device off, keeping the given brightness.
    ///
    /// An unknown brightness is sent as [`FALLBACK_OFF_FRACTION`].
    #[must_use]
    pub fn turn_off(brightness: Option<Brightness>) -> Self {
        Self {
            is_enabled: false,
            brightness: brightness.map_or(FALLBACK_OFF_FRACTION, |b| b.as_fraction()),
        }
    }

    /// Returns the requested on/off state.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Returns the requested brightness fraction.
    #[must_use]
    pub fn brightness(&self) -> f64 {
        self.brightness
    }
}
