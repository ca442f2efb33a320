// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Tempo API client errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level error (connection, timeout, TLS).
    Http(String),

    /// Response body could not be decoded into the expected envelope.
    InvalidResponse(String),

    /// The backend rejected the request (validation, not-found, conflict).
    ///
    /// Callers treat all rejection subtypes uniformly; `status` and `message`
    /// exist for display only.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Human-readable message mined from the response envelope.
        message: String,
    },

    /// The bearer token was rejected (HTTP 401); the session must be
    /// re-established.
    SessionExpired,

    /// Configuration error.
    Config(String),
}

impl ApiError {
    /// Whether this error requires a global re-login.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::InvalidResponse(e) => write!(f, "Invalid server response: {e}"),
            Self::Rejected { status, message } => write!(f, "Request rejected ({status}): {message}"),
            Self::SessionExpired => write!(f, "Session expired, please log in again"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
