// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

use crate::error::ApiError;
use crate::types::CalendarEvent;

/// Standard response envelope wrapping every backend payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Whether the request succeeded.
    pub success: bool,

    /// HTTP status code echoed in the body.
    pub status_code: u16,

    /// Human-readable message; a string or an array of strings.
    #[serde(default)]
    pub message: Message,

    /// The actual payload. Absent on failures.
    pub data: Option<T>,

    /// Request path, echoed by some endpoints.
    #[serde(default)]
    pub path: Option<String>,

    /// Server timestamp, echoed by some endpoints.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps `data`, turning an unsuccessful envelope into an error.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                status: self.status_code,
                message: self.message.joined(),
            });
        }
        self.data
            .ok_or_else(|| ApiError::InvalidResponse("envelope has no data".to_string()))
    }
}

/// Envelope message, which the backend emits either as a single string or as
/// a list (e.g., one entry per validation failure).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// A single message.
    One(String),
    /// Multiple messages.
    Many(Vec<String>),
}

impl Message {
    /// Joins multiple messages with `", "` for display.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::One(s) => s.clone(),
            Self::Many(parts) => parts.join(", "),
        }
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::One(String::new())
    }
}

/// Bare acknowledgement payload returned by delete endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Ack {
    /// Whether the operation took effect.
    pub success: bool,
}

/// Payload of `PATCH /events/:id/linked-task/done`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedTaskDone {
    /// Whether the linked task was marked done.
    pub success: bool,
    /// The event after its completion side effects were applied.
    pub event: CalendarEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_successful_envelope() {
        let env: Envelope<Vec<u32>> = serde_json::from_str(
            r#"{"success":true,"statusCode":200,"message":"OK","data":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(env.into_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn joins_validation_message_arrays() {
        let env: Envelope<Vec<u32>> = serde_json::from_str(
            r#"{"success":false,"statusCode":400,"message":["title required","endAt before startAt"]}"#,
        )
        .unwrap();
        match env.into_data() {
            Err(ApiError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "title required, endAt before startAt");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn missing_data_on_success_is_invalid() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"statusCode":200,"message":""}"#).unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::InvalidResponse(_))));
    }
}
