//! # Utility Modules
//!
//! Constants and process-level helpers shared across the crate.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Fixed labels, messages and timeouts
//! - **Telemetry** (`telemetry`) - Tracing subscriber installation for the binary

pub mod constant;
pub mod telemetry;
