//! The external collaborator surface.
//!
//! This module provides:
//! - Request, response, and payload types for bridged operations
//! - The [`OperationLauncher`] and [`OperationHandle`] traits the bridge
//!   consumes

mod launcher;
mod request;

pub use launcher::{CompletionCallback, OperationHandle, OperationLauncher};
pub use request::{FetchRequest, FetchResponse, ResponseInfo};

#[cfg(test)]
pub(crate) use launcher::{MockOperationHandle, MockOperationLauncher};
