//! # Conex Domain
//!
//! Business domain types for the Conex AI-OCR client.
//!
//! This crate contains:
//! - Wire types exchanged with the OCR backend (users, files, conversion
//!   jobs, extracted product records, companies, billing)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Endpoint paths and defaults
//!
//! ## Architecture
//! - No dependencies on other Conex crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
