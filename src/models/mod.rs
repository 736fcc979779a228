//! Data models for the tutorials client.
//!
//! These models match the backend's JSON payloads for seamless interoperability.

mod tutorial;

pub use tutorial::*;
