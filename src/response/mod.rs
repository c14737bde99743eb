// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for GifKid API payloads.
//!
//! The directory endpoint answers with a single JSON object wrapping the list
//! of device configurations:
//!
//! ```json
//! {"device_configurations": [
//!     {"device_id": "tile-1", "name": "Kitchen", "is_enabled": true, "brightness": 0.6}
//! ]}
//! ```

mod device_record;
mod directory;

pub use device_record::DeviceRecord;
pub use directory::DirectoryResponse;
