//! Testing utilities
//!
//! - **[`mocks`]**: in-memory token endpoint with scripted replies
//! - **[`time`]**: clock that only moves when told to
//!
//! Available inside this crate's tests and, for downstream crates, behind
//! the `test-utils` feature.

pub mod mocks;
pub mod time;

pub use mocks::{MockTokenClient, TokenReply};
pub use time::MockClock;
