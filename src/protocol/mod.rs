// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Communication with the GifKid device directory.
//!
//! [`DirectoryApi`] is the seam between the poll coordinator and the network:
//! the coordinator only ever fetches the full directory or patches one
//! device. [`DirectoryClient`] is the HTTP implementation; it owns the
//! session and the request headers so nothing outside this module builds
//! requests.

mod http;

pub use http::{
    ApiConfig, DEFAULT_API_DOMAIN, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SCAN_INTERVAL, DOMAIN,
    DirectoryClient,
};

use std::future::Future;

use crate::command::DevicePatch;
use crate::error::Result;
use crate::response::DeviceRecord;
use crate::types::DeviceId;

/// Path of the device directory endpoint.
pub const DIRECTORY_PATH: &str = "/device-configurations";

/// Operations the coordinator needs from the remote directory.
pub trait DirectoryApi: Send + Sync + 'static {
    /// Fetches every device record.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-2xx statuses or bodies
    /// that are not a directory object.
    fn fetch_devices(&self) -> impl Future<Output = Result<Vec<DeviceRecord>>> + Send;

    /// Applies a partial update to one device.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or non-2xx statuses.
    fn update_device(
        &self,
        device_id: &DeviceId,
        patch: &DevicePatch,
    ) -> impl Future<Output = Result<()>> + Send;
}
