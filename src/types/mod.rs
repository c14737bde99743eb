// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for GifKid light control.
//!
//! - [`DeviceId`] - Opaque identifier of a remote device
//! - [`Brightness`] - Brightness level (0-255), convertible to the API's
//!   0.0-1.0 fraction

mod brightness;
mod device_id;

pub use brightness::Brightness;
pub use device_id::DeviceId;
