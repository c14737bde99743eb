// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observable coordinator state.

use std::sync::Arc;

use crate::error::UpdateFailed;

use super::DirectorySnapshot;

/// What observers see after each refresh.
///
/// A failed refresh flips `last_update_success` and records the failure but
/// keeps the previous snapshot available.
#[derive(Debug, Clone)]
pub struct CoordinatorState {
    snapshot: Option<Arc<DirectorySnapshot>>,
    last_update_success: bool,
    last_error: Option<UpdateFailed>,
}

impl CoordinatorState {
    /// Returns the latest successful snapshot, if any refresh has succeeded.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Arc<DirectorySnapshot>> {
        self.snapshot.as_ref()
    }

    /// Returns `true` unless the most recent refresh failed.
    #[must_use]
    pub fn last_update_success(&self) -> bool {
        self.last_update_success
    }

    /// Returns the failure of the most recent refresh, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&UpdateFailed> {
        self.last_error.as_ref()
    }

    /// Records a successful refresh. Returns `true` if this recovers from a
    /// failure.
    pub(crate) fn record_success(&mut self, snapshot: Arc<DirectorySnapshot>) -> bool {
        let recovered = !self.last_update_success;
        self.snapshot = Some(snapshot);
        self.last_update_success = true;
        self.last_error = None;
        recovered
    }

    /// Records a failed refresh. Returns `true` if this is the first failure
    /// after a success.
    pub(crate) fn record_failure(&mut self, failure: UpdateFailed) -> bool {
        let first_failure = self.last_update_success;
        self.last_update_success = false;
        self.last_error = Some(failure);
        first_failure
    }
}

impl Default for CoordinatorState {
    fn default() -> Self {
        Self {
            snapshot: None,
            last_update_success: true,
            last_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_snapshot() {
        let mut state = CoordinatorState::default();
        let snapshot = Arc::new(DirectorySnapshot::new(Vec::new()));
        assert!(!state.record_success(Arc::clone(&snapshot)));

        assert!(state.record_failure(UpdateFailed::new(&"down")));
        assert!(!state.last_update_success());
        assert!(Arc::ptr_eq(state.snapshot().unwrap(), &snapshot));
        assert_eq!(state.last_error().unwrap().message(), "down");
    }

    #[test]
    fn transitions_are_reported_once() {
        let mut state = CoordinatorState::default();
        assert!(state.record_failure(UpdateFailed::new(&"a")));
        assert!(!state.record_failure(UpdateFailed::new(&"b")));

        let snapshot = Arc::new(DirectorySnapshot::new(Vec::new()));
        assert!(state.record_success(Arc::clone(&snapshot)));
        assert!(!state.record_success(snapshot));
        assert!(state.last_error().is_none());
    }
}
