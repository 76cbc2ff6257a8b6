//! Request and response types for bridged operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable description of the operation to perform.
///
/// The bridge treats the request as opaque: it is handed to the launcher
/// unchanged, and no validation is performed beyond what the launcher itself
/// requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// The target of the operation, typically a URL.
    pub target: String,
    /// Transport headers to send with the operation.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Launcher-specific parameters.
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
}

impl FetchRequest {
    /// Creates a bare request for the given target.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            headers: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Adds a transport header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a launcher-specific parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

/// Metadata describing the response that accompanied a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseInfo {
    /// Status code reported by the transport.
    pub status: u16,
    /// Response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// When the response was received.
    pub received_at: DateTime<Utc>,
}

impl ResponseInfo {
    /// Creates response metadata for the given status, timestamped now.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            received_at: Utc::now(),
        }
    }

    /// Adds a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// The success value of a bridged fetch: the downloaded bytes together with
/// the response metadata that accompanied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// The downloaded payload.
    pub payload: Vec<u8>,
    /// Metadata for the response that carried the payload.
    pub info: ResponseInfo,
}

impl FetchResponse {
    /// Creates a response from a payload and its metadata.
    #[must_use]
    pub fn new(payload: Vec<u8>, info: ResponseInfo) -> Self {
        Self { payload, info }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_builder() {
        let request = FetchRequest::new("https://example.com/resource")
            .with_header("accept", "application/octet-stream")
            .with_param("follow_redirects", serde_json::json!(true));

        assert_eq!(request.target, "https://example.com/resource");
        assert_eq!(
            request.headers.get("accept"),
            Some(&"application/octet-stream".to_string())
        );
        assert_eq!(
            request.params.get("follow_redirects"),
            Some(&serde_json::json!(true))
        );
    }

    #[test]
    fn test_request_round_trips_through_json() {
        let request = FetchRequest::new("https://example.com").with_header("x-trace", "abc");
        let json = serde_json::to_string(&request).expect("serialize");
        let back: FetchRequest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(request, back);
    }

    #[test]
    fn test_response_info_defaults() {
        let info = ResponseInfo::new(200);
        assert_eq!(info.status, 200);
        assert!(info.headers.is_empty());
    }
}
