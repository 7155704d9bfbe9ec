//! # Error Pipeline Services
//!
//! ## Available Services
//!
//! - **Classifier** (`classifier`) - Error family recognition and normalization
//! - **Logger** (`logger`) - Severity-aware logging to an injected sink
//! - **Renderer** (`renderer`) - Redaction and text/JSON responses
//! - **Pipeline** (`pipeline`) - Stage chaining: classify → log → render
//! - **JWT** (`jwt`) - Access tokens for the demo host

pub mod classifier;
pub mod jwt;
pub mod logger;
pub mod pipeline;
pub mod renderer;
