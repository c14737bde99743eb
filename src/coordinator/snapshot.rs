// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directory snapshot.

use chrono::{DateTime, Utc};

use crate::response::DeviceRecord;
use crate::types::DeviceId;

/// The full set of device records returned by one successful poll.
///
/// Snapshots are immutable and shared behind an `Arc`; a refresh publishes
/// a new one instead of editing the current one.
///
/// # Examples
///
/// ```
/// use gifkid::coordinator::DirectorySnapshot;
/// use gifkid::response::DeviceRecord;
/// use gifkid::types::DeviceId;
///
/// let snapshot = DirectorySnapshot::new(vec![
///     DeviceRecord::new("a", "Hall", true, Some(0.5)),
/// ]);
/// assert_eq!(snapshot.len(), 1);
/// assert!(snapshot.get(&DeviceId::from("a")).is_some());
/// assert!(snapshot.get(&DeviceId::from("b")).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorySnapshot {
    devices: Vec<DeviceRecord>,
    fetched_at: DateTime<Utc>,
}

impl DirectorySnapshot {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self {
            devices,
            fetched_at: Utc::now(),
        }
    }

    /// Looks up a device by identifier.
    #[must_use]
    pub fn get(&self, device_id: &DeviceId) -> Option<&DeviceRecord> {
        self.devices.iter().find(|d| d.device_id() == device_id)
    }

    /// Returns the records in API order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    /// Iterates over the records in API order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.devices.iter()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if the directory listed no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Returns when the snapshot was fetched.
    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_keeps_api_order() {
        let snapshot = DirectorySnapshot::new(vec![
            DeviceRecord::new("z", "Z", true, None),
            DeviceRecord::new("a", "A", false, None),
        ]);
        let names: Vec<_> = snapshot.iter().map(DeviceRecord::name).collect();
        assert_eq!(names, ["Z", "A"]);
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = DirectorySnapshot::new(Vec::new());
        assert!(snapshot.is_empty());
        assert!(snapshot.get(&DeviceId::from("a")).is_none());
    }

    #[test]
    fn fetched_at_is_recent() {
        let before = Utc::now();
        let snapshot = DirectorySnapshot::new(Vec::new());
        assert!(snapshot.fetched_at() >= before);
    }
}
