// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directory response parsing.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

use super::DeviceRecord;

/// Body of `GET /device-configurations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryResponse {
    device_configurations: Vec<DeviceRecord>,
}

impl DirectoryResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the body is not a valid directory
    /// object.
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        serde_json::from_str(body).map_err(Into::into)
    }

    /// Returns the device records in the order the API listed them.
    #[must_use]
    pub fn devices(&self) -> &[DeviceRecord] {
        &self.device_configurations
    }

    /// Consumes the response, returning the device records.
    #[must_use]
    pub fn into_devices(self) -> Vec<DeviceRecord> {
        self.device_configurations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_directory() {
        let body = r#"{"device_configurations": [
            {"device_id": "a", "name": "A", "is_enabled": true, "brightness": 0.5},
            {"device_id": "b", "name": "B", "is_enabled": false, "brightness": null}
        ]}"#;
        let response = DirectoryResponse::parse(body).unwrap();
        let ids: Vec<_> = response.devices().iter().map(|d| d.device_id().as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn parse_empty_directory() {
        let response = DirectoryResponse::parse(r#"{"device_configurations": []}"#).unwrap();
        assert!(response.into_devices().is_empty());
    }

    #[test]
    fn parse_wrong_shape_fails() {
        assert!(matches!(
            DirectoryResponse::parse("[]"),
            Err(ParseError::Json(_))
        ));
        assert!(DirectoryResponse::parse(r#"{"devices": []}"#).is_err());
    }
}
