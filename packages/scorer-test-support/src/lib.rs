//! Shared helpers for the scorer integration tests.

pub mod logging;
pub mod unique_helpers;
