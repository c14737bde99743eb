// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the GifKid directory API.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};

use crate::command::DevicePatch;
use crate::error::{Error, ProtocolError, Result};
use crate::protocol::{DIRECTORY_PATH, DirectoryApi};
use crate::response::{DeviceRecord, DirectoryResponse};
use crate::types::DeviceId;

/// Integration name, used in log events and the user agent.
pub const DOMAIN: &str = "gifkid";

/// Domain of the public GifKid API.
pub const DEFAULT_API_DOMAIN: &str = "api.gifkid.gxlabs.co";

/// Interval between scheduled directory refreshes.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound for a single request, reads and writes alike.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// ApiConfig - Connection parameters for one configured integration
// ============================================================================

/// Configuration for talking to the GifKid API.
///
/// # Examples
///
/// ```
/// use gifkid::protocol::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new("my-client");
/// assert_eq!(config.base_url(), "https://api.gifkid.gxlabs.co");
/// assert_eq!(config.user_agent(), "gifkid_app:my-client");
///
/// let config = ApiConfig::new("my-client")
///     .with_api_domain("staging.example.com")
///     .with_timeout(Duration::from_secs(5))
///     .with_update_interval(Duration::from_secs(60));
/// assert_eq!(config.base_url(), "https://staging.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    client_id: String,
    api_domain: String,
    timeout: Duration,
    update_interval: Duration,
}

impl ApiConfig {
    /// Creates a configuration for the given client identifier.
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_domain: DEFAULT_API_DOMAIN.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            update_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    /// Sets the API domain.
    ///
    /// A domain that already starts with `http://` or `https://` is used as
    /// the base URL verbatim.
    #[must_use]
    pub fn with_api_domain(mut self, api_domain: impl Into<String>) -> Self {
        self.api_domain = api_domain.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the interval between scheduled refreshes.
    #[must_use]
    pub fn with_update_interval(mut self, update_interval: Duration) -> Self {
        self.update_interval = update_interval;
        self
    }

    /// Returns the client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the API domain.
    #[must_use]
    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the interval between scheduled refreshes.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Returns the `User-Agent` header value sent on every request.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{DOMAIN}_app:{}", self.client_id)
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let domain = self.api_domain.trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        }
    }

    /// Creates a [`DirectoryClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the domain or client identifier cannot be used in a
    /// request, or if the HTTP client cannot be created.
    pub fn into_client(self) -> std::result::Result<DirectoryClient, ProtocolError> {
        DirectoryClient::new(&self)
    }
}

// ============================================================================
// DirectoryClient - reqwest session with the GifKid headers baked in
// ============================================================================

/// HTTP client for the `/device-configurations` endpoints.
///
/// Every request carries `User-Agent: gifkid_app:{client_id}` and
/// `Content-Type: application/json`. No retries are attempted.
///
/// # Examples
///
/// ```no_run
/// use gifkid::protocol::{ApiConfig, DirectoryApi, DirectoryClient};
///
/// # async fn example() -> gifkid::Result<()> {
/// let client = DirectoryClient::new(&ApiConfig::new("my-client"))?;
/// for device in client.fetch_devices().await? {
///     println!("{} is {}", device.name(), device.is_enabled());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    client: Client,
}

impl DirectoryClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is empty, the user agent is not a valid
    /// header value, or the HTTP client cannot be created.
    pub fn new(config: &ApiConfig) -> std::result::Result<Self, ProtocolError> {
        let base_url = config.base_url();
        if base_url.ends_with("://") {
            return Err(ProtocolError::InvalidAddress(format!(
                "empty API domain in {base_url}"
            )));
        }

        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent())
            .map_err(|e| ProtocolError::InvalidHeader(e.to_string()))?;
        headers.insert(USER_AGENT, user_agent);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self { base_url, client })
    }

    /// Returns the base URL of the API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn directory_url(&self) -> String {
        format!("{}{DIRECTORY_PATH}", self.base_url)
    }

    fn device_url(&self, device_id: &DeviceId) -> String {
        format!(
            "{}{DIRECTORY_PATH}/{}",
            self.base_url,
            urlencoding::encode(device_id.as_str())
        )
    }

    /// Issues the directory GET and returns the status without judging it.
    ///
    /// Used to validate credentials before an integration is configured.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Http` if no response was received.
    pub async fn probe(&self) -> std::result::Result<StatusCode, ProtocolError> {
        let url = self.directory_url();
        tracing::debug!(url = %url, "Probing GifKid API");

        let response = self.client.get(&url).send().await?;
        Ok(response.status())
    }
}

impl DirectoryApi for DirectoryClient {
    async fn fetch_devices(&self) -> Result<Vec<DeviceRecord>> {
        let url = self.directory_url();

        tracing::debug!(url = %url, "Fetching device configurations");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if !response.status().is_success() {
            return Err(ProtocolError::from_status(response.status()).into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::trace!(body = %body, "Received device configurations");

        let directory = DirectoryResponse::parse(&body)?;
        Ok(directory.into_devices())
    }

    async fn update_device(&self, device_id: &DeviceId, patch: &DevicePatch) -> Result<()> {
        let url = self.device_url(device_id);

        tracing::debug!(
            url = %url,
            is_enabled = patch.is_enabled(),
            brightness = patch.brightness(),
            "Patching device configuration"
        );

        let response = self
            .client
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if !response.status().is_success() {
            return Err(Error::Protocol(ProtocolError::from_status(
                response.status(),
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_config_default_values() {
        let config = ApiConfig::new("abc");
        assert_eq!(config.client_id(), "abc");
        assert_eq!(config.api_domain(), DEFAULT_API_DOMAIN);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.update_interval(), Duration::from_secs(30));
    }

    #[test]
    fn api_config_user_agent() {
        assert_eq!(ApiConfig::new("kid-7").user_agent(), "gifkid_app:kid-7");
    }

    #[test]
    fn api_config_base_url_with_scheme() {
        let config = ApiConfig::new("abc").with_api_domain("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn api_config_builder_chain() {
        let config = ApiConfig::new("abc")
            .with_api_domain("example.com")
            .with_timeout(Duration::from_secs(3))
            .with_update_interval(Duration::from_secs(5));
        assert_eq!(config.base_url(), "https://example.com");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.update_interval(), Duration::from_secs(5));
    }

    #[test]
    fn client_urls() {
        let client = ApiConfig::new("abc").into_client().unwrap();
        assert_eq!(
            client.directory_url(),
            "https://api.gifkid.gxlabs.co/device-configurations"
        );
        assert_eq!(
            client.device_url(&DeviceId::from("tile 1/2")),
            "https://api.gifkid.gxlabs.co/device-configurations/tile%201%2F2"
        );
    }

    #[test]
    fn client_rejects_invalid_user_agent() {
        let result = ApiConfig::new("bad\nid").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidHeader(_))));
    }

    #[test]
    fn client_rejects_empty_domain() {
        let result = ApiConfig::new("abc").with_api_domain("").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }
}
