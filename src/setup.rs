// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setting up one configured integration.
//!
//! Setup builds the coordinator, performs the first refresh, creates one
//! [`Light`] per listed device and starts polling. If the first refresh
//! fails nothing is created.

use crate::config_flow::ConfigEntry;
use crate::coordinator::{Coordinator, PollHandle};
use crate::error::Result;
use crate::light::Light;
use crate::protocol::{DirectoryApi, DirectoryClient};
use crate::types::DeviceId;

/// A running integration: its coordinator, its lights and its poll loop.
///
/// Dropping the integration stops polling.
#[derive(Debug)]
pub struct Integration<A: DirectoryApi = DirectoryClient> {
    coordinator: Coordinator<A>,
    lights: Vec<Light<A>>,
    poller: PollHandle,
}

impl Integration<DirectoryClient> {
    /// Sets up an integration from a stored entry.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created, or
    /// [`Error::NotReady`](crate::Error::NotReady) if the first refresh
    /// fails.
    pub async fn setup(entry: &ConfigEntry) -> Result<Self> {
        let coordinator = Coordinator::from_config(entry.api_config())?;
        Self::start(coordinator).await
    }
}

impl<A: DirectoryApi> Integration<A> {
    /// Sets up an integration around an existing coordinator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`](crate::Error::NotReady) if the first
    /// refresh fails.
    pub async fn start(coordinator: Coordinator<A>) -> Result<Self> {
        let snapshot = coordinator.first_refresh().await?;

        let lights: Vec<_> = snapshot
            .iter()
            .map(|record| Light::new(coordinator.clone(), record))
            .collect();

        tracing::info!(lights = lights.len(), "GifKid integration set up");

        let poller = coordinator.start_polling();

        Ok(Self {
            coordinator,
            lights,
            poller,
        })
    }

    /// Returns the coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &Coordinator<A> {
        &self.coordinator
    }

    /// Returns the lights created at setup.
    #[must_use]
    pub fn lights(&self) -> &[Light<A>] {
        &self.lights
    }

    /// Returns the light for a device.
    #[must_use]
    pub fn light(&self, device_id: &DeviceId) -> Option<&Light<A>> {
        self.lights.iter().find(|light| light.device_id() == device_id)
    }

    /// Returns `true` while the poll loop is running.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Stops polling and releases the lights.
    pub fn unload(self) {
        tracing::info!("GifKid integration unloaded");
        self.poller.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::Error;
    use crate::coordinator::fake::FakeDirectory;
    use crate::protocol::ApiConfig;
    use crate::response::DeviceRecord;

    fn coordinator(fake: &FakeDirectory) -> Coordinator<FakeDirectory> {
        Coordinator::new(fake.clone(), &ApiConfig::new("test"))
    }

    #[tokio::test(start_paused = true)]
    async fn one_light_per_device() {
        let fake = FakeDirectory::with_devices(vec![
            DeviceRecord::new("a", "A", true, None),
            DeviceRecord::new("b", "B", false, Some(0.1)),
            DeviceRecord::new("c", "C", true, Some(1.0)),
        ]);

        let integration = Integration::start(coordinator(&fake)).await.unwrap();

        let ids: Vec<_> = integration.lights().iter().map(Light::unique_id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(integration.light(&DeviceId::from("b")).is_some());
        assert!(integration.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_first_refresh_aborts_setup() {
        let fake = FakeDirectory::default();
        fake.push_reply(Err(500));

        let err = Integration::start(coordinator(&fake)).await.unwrap_err();
        assert!(matches!(err, Error::NotReady(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn lights_are_fixed_at_setup() {
        let fake = FakeDirectory::with_devices(vec![DeviceRecord::new("a", "A", true, None)]);
        fake.push_reply(Ok(vec![
            DeviceRecord::new("a", "A", true, None),
            DeviceRecord::new("b", "B", true, None),
        ]));

        let integration = Integration::start(coordinator(&fake)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(31)).await;

        assert_eq!(fake.fetch_count(), 2);
        assert_eq!(integration.coordinator().snapshot().unwrap().len(), 2);
        assert_eq!(integration.lights().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unload_stops_polling() {
        let fake = FakeDirectory::with_devices(vec![DeviceRecord::new("a", "A", true, None)]);
        let integration = Integration::start(coordinator(&fake)).await.unwrap();

        integration.unload();
        tokio::time::sleep(Duration::from_secs(300)).await;

        assert_eq!(fake.fetch_count(), 1);
    }
}
