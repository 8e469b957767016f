//! Utilities shared by the Huddle binaries and their tests.

pub mod logger;
pub mod time;
