//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests. Currently
//! this is the unified logging initialization used by every test binary.

pub mod logging;
