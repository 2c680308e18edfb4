//! # Apigee Domain
//!
//! Domain types shared by every Apigee client crate.
//!
//! This crate contains:
//! - The client error taxonomy and `Result` alias
//! - Validated connection settings
//! - Default endpoints and fixed OAuth client credentials
//! - Request/response payload types for management resources
//!
//! ## Architecture
//! - No dependencies on other Apigee client crates
//! - No I/O; pure data structures and validation

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
