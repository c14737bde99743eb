// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll coordinator for the GifKid device directory.
//!
//! The [`Coordinator`] is the single owner of remote state. It refreshes the
//! directory on a fixed interval, caches the last successful
//! [`DirectorySnapshot`], and is the only path lights use to read or write.
//!
//! # Refresh semantics
//!
//! - At most one fetch runs at a time. A refresh requested while another is
//!   in flight awaits the same result instead of issuing a second GET.
//! - A fetch runs on its own task. It completes and publishes its outcome
//!   even if every caller awaiting it is dropped.
//! - Each fetch is bounded by the configured request timeout.
//! - A failed refresh is reported as [`UpdateFailed`] and leaves the previous
//!   snapshot in place.
//! - Every completed refresh, successful or not, pushes the next scheduled
//!   refresh one full interval out.
//!
//! # Examples
//!
//! ```no_run
//! use gifkid::coordinator::Coordinator;
//! use gifkid::protocol::ApiConfig;
//!
//! # async fn example() -> gifkid::Result<()> {
//! let coordinator = Coordinator::from_config(ApiConfig::new("my-client"))?;
//! coordinator.first_refresh().await?;
//!
//! let _poller = coordinator.start_polling();
//! let mut changes = coordinator.subscribe();
//! while changes.changed().await.is_ok() {
//!     let state = changes.borrow_and_update().clone();
//!     println!("healthy: {}", state.last_update_success());
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
pub(crate) mod fake;
mod poller;
mod snapshot;
mod state;

pub use poller::PollHandle;
pub use snapshot::DirectorySnapshot;
pub use state::CoordinatorState;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tokio::sync::{Notify, watch};
use tokio::time::{self, Instant};

use crate::command::DevicePatch;
use crate::error::{Error, ProtocolError, Result, UpdateFailed};
use crate::protocol::{ApiConfig, DOMAIN, DirectoryApi, DirectoryClient};
use crate::response::DeviceRecord;
use crate::types::DeviceId;

/// Outcome of one refresh, shared by every caller that joined it.
pub type RefreshResult = std::result::Result<Arc<DirectorySnapshot>, UpdateFailed>;

type RefreshFlight = Shared<BoxFuture<'static, RefreshResult>>;

/// Periodic-refresh cache mediating all access to the remote directory.
///
/// Cloning is cheap; clones share the same cache, schedule and in-flight
/// refresh.
pub struct Coordinator<A: DirectoryApi = DirectoryClient> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    api: A,
    timeout: Duration,
    update_interval: Duration,
    state: watch::Sender<CoordinatorState>,
    in_flight: Mutex<Option<RefreshFlight>>,
    next_refresh: Mutex<Instant>,
    reschedule: Notify,
}

impl Coordinator<DirectoryClient> {
    /// Creates a coordinator backed by the HTTP directory client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: ApiConfig) -> Result<Self> {
        let client = DirectoryClient::new(&config)?;
        Ok(Self::new(client, &config))
    }
}

impl<A: DirectoryApi> Coordinator<A> {
    /// Creates a coordinator over the given directory API.
    ///
    /// Timeout and update interval are taken from `config`. No request is
    /// made until [`refresh`](Self::refresh) or
    /// [`start_polling`](Self::start_polling) is called.
    #[must_use]
    pub fn new(api: A, config: &ApiConfig) -> Self {
        let (state, _) = watch::channel(CoordinatorState::default());
        let update_interval = config.update_interval();

        Self {
            inner: Arc::new(Inner {
                api,
                timeout: config.timeout(),
                update_interval,
                state,
                in_flight: Mutex::new(None),
                next_refresh: Mutex::new(Instant::now() + update_interval),
                reschedule: Notify::new(),
            }),
        }
    }

    /// Returns the interval between scheduled refreshes.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        self.inner.update_interval
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns the latest successful snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<DirectorySnapshot>> {
        self.inner.state.borrow().snapshot().cloned()
    }

    /// Returns a copy of one device's record from the latest snapshot.
    #[must_use]
    pub fn device(&self, device_id: &DeviceId) -> Option<DeviceRecord> {
        self.inner
            .state
            .borrow()
            .snapshot()
            .and_then(|snapshot| snapshot.get(device_id).cloned())
    }

    /// Returns `true` unless the most recent refresh failed.
    #[must_use]
    pub fn last_update_success(&self) -> bool {
        self.inner.state.borrow().last_update_success()
    }

    /// Returns the failure of the most recent refresh, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<UpdateFailed> {
        self.inner.state.borrow().last_error().cloned()
    }

    /// Returns the current observable state.
    #[must_use]
    pub fn state(&self) -> CoordinatorState {
        self.inner.state.borrow().clone()
    }

    /// Subscribes to state changes.
    ///
    /// The receiver is notified after every refresh, including failed ones.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.inner.state.subscribe()
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Refreshes the directory, joining a refresh that is already running.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateFailed`] if the fetch failed or timed out. The
    /// previous snapshot is kept.
    pub async fn refresh(&self) -> RefreshResult {
        let flight = {
            let mut slot = self.inner.in_flight.lock();
            if let Some(flight) = slot.as_ref() {
                tracing::trace!("Joining in-flight refresh");
                flight.clone()
            } else {
                let inner = Arc::clone(&self.inner);
                let task = tokio::spawn(Arc::clone(&inner).run_refresh());
                let flight = async move {
                    match task.await {
                        Ok(result) => result,
                        Err(err) => {
                            // The task never reached the end of run_refresh
                            inner.in_flight.lock().take();
                            Err(UpdateFailed::new(&err))
                        }
                    }
                }
                .boxed()
                .shared();
                *slot = Some(flight.clone());
                flight
            }
        };

        flight.await
    }

    /// Performs the refresh required before any light is created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] if the refresh failed.
    pub async fn first_refresh(&self) -> Result<Arc<DirectorySnapshot>> {
        self.refresh().await.map_err(Error::NotReady)
    }

    /// Refreshes outside the normal schedule, typically after a write.
    ///
    /// Failures are published to subscribers and logged rather than
    /// returned.
    pub async fn request_refresh(&self) {
        if let Err(failure) = self.refresh().await {
            tracing::debug!(error = %failure, "Requested refresh failed");
        }
    }

    /// Starts the scheduled refresh loop.
    ///
    /// The first scheduled refresh happens one interval after the most
    /// recent completed refresh (or after creation if none ran yet).
    #[must_use]
    pub fn start_polling(&self) -> PollHandle {
        let coordinator = self.clone();
        PollHandle::new(tokio::spawn(coordinator.run_schedule()))
    }

    async fn run_schedule(self) {
        tracing::debug!(
            interval_secs = self.inner.update_interval.as_secs(),
            "Starting directory polling"
        );

        loop {
            let deadline = *self.inner.next_refresh.lock();

            tokio::select! {
                () = time::sleep_until(deadline) => {
                    let _ = self.refresh().await;
                }
                () = self.inner.reschedule.notified() => {}
            }
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Sends a partial update for one device.
    ///
    /// The write is bounded by the request timeout. The cache is not touched;
    /// call [`request_refresh`](Self::request_refresh) to observe the result.
    ///
    /// # Errors
    ///
    /// Returns the API error as-is, or `ProtocolError::Timeout`.
    pub async fn perform_write(&self, device_id: &DeviceId, patch: &DevicePatch) -> Result<()> {
        let timeout = self.inner.timeout;
        match time::timeout(timeout, self.inner.api.update_device(device_id, patch)).await {
            Ok(result) => result,
            Err(_) => Err(ProtocolError::Timeout(as_millis(timeout)).into()),
        }
    }
}

impl<A: DirectoryApi> Inner<A> {
    async fn run_refresh(self: Arc<Self>) -> RefreshResult {
        tracing::debug!("Refreshing {DOMAIN} device directory");

        let result = match time::timeout(self.timeout, self.api.fetch_devices()).await {
            Ok(Ok(devices)) => Ok(Arc::new(DirectorySnapshot::new(devices))),
            Ok(Err(err)) => Err(UpdateFailed::new(&err)),
            Err(_) => Err(UpdateFailed::new(&ProtocolError::Timeout(as_millis(
                self.timeout,
            )))),
        };

        self.publish(&result);

        *self.next_refresh.lock() = Instant::now() + self.update_interval;
        self.reschedule.notify_one();

        self.in_flight.lock().take();
        result
    }

    fn publish(&self, result: &RefreshResult) {
        self.state.send_modify(|state| match result {
            Ok(snapshot) => {
                let devices = snapshot.len();
                if state.record_success(Arc::clone(snapshot)) {
                    tracing::info!(devices, "Fetching {DOMAIN} data recovered");
                } else {
                    tracing::debug!(devices, "Fetched {DOMAIN} data");
                }
            }
            Err(failure) => {
                if state.record_failure(failure.clone()) {
                    tracing::warn!(error = %failure, "Error fetching {DOMAIN} data");
                } else {
                    tracing::debug!(error = %failure, "Error fetching {DOMAIN} data");
                }
            }
        });
    }
}

impl<A: DirectoryApi> Clone for Coordinator<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: DirectoryApi> fmt::Debug for Coordinator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("update_interval", &self.inner.update_interval)
            .field("timeout", &self.inner.timeout)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
