//! Structured cancellation for awaiting callers.
//!
//! This module provides:
//! - [`CancellationToken`] for cooperative cancellation of a task scope

mod token;

pub use token::CancellationToken;
