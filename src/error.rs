// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `gifkid` library.
//!
//! Failures are split by where they happen: HTTP communication with the
//! GifKid API, response parsing, and the coordinator's refresh cycle. [`UpdateFailed`] is the uniform signal observers see when a
//! poll fails; [`ValidationError`] is the two-bucket outcome of validating
//! user-supplied configuration.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The first refresh failed, so the integration could not be set up.
    #[error("integration not ready: {0}")]
    NotReady(UpdateFailed),
}

/// Errors related to HTTP communication with the GifKid API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or domain.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A request header could not be built.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

impl ProtocolError {
    /// Builds a status error from a response status code.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

/// Errors related to parsing API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A failed refresh of the device directory.
///
/// Carries only the text of the underlying error so the same failure can be
/// handed to every caller that joined the refresh.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Error communicating with API: {message}")]
pub struct UpdateFailed {
    message: String,
}

impl UpdateFailed {
    /// Wraps the given error.
    #[must_use]
    pub fn new(source: &impl std::fmt::Display) -> Self {
        Self {
            message: source.to_string(),
        }
    }

    /// Returns the original error text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of a rejected configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The API answered, but not with HTTP 200.
    #[error("cannot connect to the GifKid API")]
    CannotConnect,

    /// Any other failure while validating.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ValidationError {
    /// Returns the stable key used to report this error to the user.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::CannotConnect => "cannot_connect",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ProtocolError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "HTTP 500 - Internal Server Error");
    }

    #[test]
    fn update_failed_keeps_original_text() {
        let failure = UpdateFailed::new(&ProtocolError::Timeout(10_000));
        assert_eq!(failure.message(), "request timed out after 10000 ms");
        assert_eq!(
            failure.to_string(),
            "Error communicating with API: request timed out after 10000 ms"
        );
    }

    #[test]
    fn not_ready_wraps_update_failed() {
        let err = Error::NotReady(UpdateFailed::new(&"boom"));
        assert_eq!(
            err.to_string(),
            "integration not ready: Error communicating with API: boom"
        );
    }

    #[test]
    fn validation_error_keys() {
        assert_eq!(ValidationError::CannotConnect.key(), "cannot_connect");
        assert_eq!(ValidationError::Unknown("x".into()).key(), "unknown");
    }
}
