//! Time abstractions
//!
//! Token expiry is tracked in wall-clock unix seconds, so the [`Clock`] trait
//! exposes wall time rather than a monotonic instant. Tests swap in
//! `testing::MockClock` to move time forward without sleeping.

pub mod clock;

pub use clock::{Clock, SystemClock};
