//! Configuration loading
//!
//! Resolves connection settings from environment variables and `.env`.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, load_from_lookup};
