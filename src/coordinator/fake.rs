// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory directory used by unit tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::command::DevicePatch;
use crate::error::{ProtocolError, Result};
use crate::protocol::DirectoryApi;
use crate::response::DeviceRecord;
use crate::types::DeviceId;

/// Scripted answer to one fetch: records, or a failing HTTP status.
pub(crate) type FetchReply = std::result::Result<Vec<DeviceRecord>, u16>;

#[derive(Debug, Default)]
struct FakeInner {
    replies: Mutex<VecDeque<FetchReply>>,
    last_reply: Mutex<Option<FetchReply>>,
    fetch_delay: Mutex<Duration>,
    write_delay: Mutex<Duration>,
    write_status: Mutex<Option<u16>>,
    fetches: AtomicUsize,
    writes: Mutex<Vec<(DeviceId, DevicePatch)>>,
}

/// Cloneable fake; clones share their script and counters.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeDirectory {
    inner: Arc<FakeInner>,
}

impl FakeDirectory {
    pub(crate) fn with_devices(devices: Vec<DeviceRecord>) -> Self {
        let fake = Self::default();
        fake.push_reply(Ok(devices));
        fake
    }

    /// Queues a reply. Once the queue is empty the last reply repeats.
    pub(crate) fn push_reply(&self, reply: FetchReply) {
        self.inner.replies.lock().push_back(reply);
    }

    pub(crate) fn set_fetch_delay(&self, delay: Duration) {
        *self.inner.fetch_delay.lock() = delay;
    }

    pub(crate) fn set_write_delay(&self, delay: Duration) {
        *self.inner.write_delay.lock() = delay;
    }

    pub(crate) fn fail_writes_with(&self, status: u16) {
        *self.inner.write_status.lock() = Some(status);
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.inner.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> Vec<(DeviceId, DevicePatch)> {
        self.inner.writes.lock().clone()
    }

    fn next_reply(&self) -> FetchReply {
        let queued = self.inner.replies.lock().pop_front();
        let mut last = self.inner.last_reply.lock();
        if let Some(reply) = queued {
            *last = Some(reply);
        }
        last.clone().unwrap_or(Ok(Vec::new()))
    }
}

fn status_error(status: u16) -> crate::error::Error {
    ProtocolError::Status {
        status,
        reason: "Scripted".to_string(),
    }
    .into()
}

impl DirectoryApi for FakeDirectory {
    async fn fetch_devices(&self) -> Result<Vec<DeviceRecord>> {
        self.inner.fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.inner.fetch_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.next_reply().map_err(status_error)
    }

    async fn update_device(&self, device_id: &DeviceId, patch: &DevicePatch) -> Result<()> {
        let delay = *self.inner.write_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(status) = *self.inner.write_status.lock() {
            return Err(status_error(status));
        }
        self.inner.writes.lock().push((device_id.clone(), *patch));
        Ok(())
    }
}
