//! Well-known state style hints.
//!
//! Opaque to everything except the renderer.

pub const SUCCESS: &str = "success";
pub const ERROR: &str = "error";
pub const INFO: &str = "info";
pub const WARN: &str = "warn";
