//! Core types and shared functionality for sift.
//!
//! This crate provides:
//! - Unified error types
//! - Layered configuration
//! - NDJSON encoding for bulk and multi-search bodies

pub mod config;
pub mod error;
pub mod ndjson;

pub use config::{AppConfig, ConfigError};
pub use error::{Error, Result};

/// Opaque search-engine payload: mappings, documents, queries, responses.
pub type Payload = serde_json::Value;
