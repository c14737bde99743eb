// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration entries and their validation.
//!
//! A [`ConfigEntry`] is what the host stores for one configured integration.
//! [`validate_input`] turns user input into an entry after checking that the
//! API answers the directory GET with HTTP 200.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};
use crate::protocol::{ApiConfig, DEFAULT_API_DOMAIN, DirectoryClient};

/// Title given to created entries.
pub const ENTRY_TITLE: &str = "GifKid";

fn default_api_domain() -> String {
    DEFAULT_API_DOMAIN.to_string()
}

/// Stored configuration of one integration.
///
/// # Examples
///
/// ```
/// use gifkid::config_flow::ConfigEntry;
///
/// let entry = ConfigEntry::from_json(r#"{"client_id": "abc"}"#).unwrap();
/// assert_eq!(entry.client_id, "abc");
/// assert_eq!(entry.api_domain, "api.gifkid.gxlabs.co");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Client identifier sent in the user agent.
    pub client_id: String,
    /// API domain, optionally with an `http://` or `https://` scheme.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
}

impl ConfigEntry {
    /// Creates an entry for the default API domain.
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_domain: default_api_domain(),
        }
    }

    /// Sets the API domain.
    #[must_use]
    pub fn with_api_domain(mut self, api_domain: impl Into<String>) -> Self {
        self.api_domain = api_domain.into();
        self
    }

    /// Parses a stored entry.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if `client_id` is missing or the JSON is
    /// malformed.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Returns the title shown for this entry.
    #[must_use]
    pub fn title(&self) -> &'static str {
        ENTRY_TITLE
    }

    /// Builds the API configuration for this entry.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.client_id).with_api_domain(&self.api_domain)
    }
}

/// Values entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserInput {
    /// Required client identifier.
    pub client_id: String,
    /// Optional API domain.
    #[serde(default)]
    pub api_domain: Option<String>,
}

impl UserInput {
    /// Creates input with only a client identifier.
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_domain: None,
        }
    }

    /// Sets the API domain.
    #[must_use]
    pub fn with_api_domain(mut self, api_domain: impl Into<String>) -> Self {
        self.api_domain = Some(api_domain.into());
        self
    }

    fn into_entry(self) -> ConfigEntry {
        ConfigEntry {
            client_id: self.client_id,
            api_domain: self.api_domain.unwrap_or_else(default_api_domain),
        }
    }
}

/// Checks that the API accepts the given client identifier.
///
/// HTTP 200 yields the entry to store. Any other status is
/// [`ValidationError::CannotConnect`]; every other failure is
/// [`ValidationError::Unknown`].
///
/// # Errors
///
/// Returns the classified [`ValidationError`].
///
/// # Examples
///
/// ```no_run
/// use gifkid::config_flow::{UserInput, validate_input};
///
/// # async fn example() {
/// match validate_input(UserInput::new("my-client")).await {
///     Ok(entry) => println!("configured {}", entry.title()),
///     Err(err) => println!("error: {}", err.key()),
/// }
/// # }
/// ```
pub async fn validate_input(input: UserInput) -> Result<ConfigEntry, ValidationError> {
    let entry = input.into_entry();

    let client = DirectoryClient::new(&entry.api_config()).map_err(|err| {
        tracing::error!(error = %err, "Unexpected exception");
        ValidationError::Unknown(err.to_string())
    })?;

    match client.probe().await {
        Ok(status) if status == reqwest::StatusCode::OK => Ok(entry),
        Ok(status) => {
            tracing::debug!(status = status.as_u16(), "GifKid API rejected client");
            Err(ValidationError::CannotConnect)
        }
        Err(err) => {
            tracing::error!(error = %err, "Unexpected exception");
            Err(ValidationError::Unknown(err.to_string()))
        }
    }
}
