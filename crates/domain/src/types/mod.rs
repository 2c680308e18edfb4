//! Management API payload types

pub mod environment;
pub mod key_value_map;

pub use environment::{objectify, EnvironmentSpec, Property, PropertyList};
pub use key_value_map::KeyValueMapSpec;
