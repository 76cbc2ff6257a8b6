//! Fixtures and test-run helpers.

use crate::operation::{FetchRequest, ResponseInfo};

/// Initializes tracing for a test run.
///
/// Reads the filter from `RUST_LOG`. Safe to call from every test; only the
/// first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A request fixture pointing at a stable example target.
#[must_use]
pub fn sample_request() -> FetchRequest {
    FetchRequest::new("https://example.com/data").with_header("accept", "application/octet-stream")
}

/// Response metadata fixture with a 200 status.
#[must_use]
pub fn sample_info() -> ResponseInfo {
    ResponseInfo::new(200).with_header("content-type", "application/octet-stream")
}
