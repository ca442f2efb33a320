// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

/// Backend connection configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., `https://api.tempo.example`).
    pub base_url: String,

    /// Bearer token attached to every outgoing request.
    ///
    /// Token acquisition and refresh are out of scope; the caller supplies a
    /// valid token or none at all.
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("tempo-api/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
